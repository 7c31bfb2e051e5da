//! Nimbus Provider
//!
//! Lifecycle controllers that let a declarative host framework manage
//! Nimbus cloud platform entities. Each resource kind maps one-to-one
//! onto a remote entity: the controllers translate desired-state fields
//! into API parameter structs, invoke the platform API, and translate
//! responses back into local state fields. State persistence and
//! dependency ordering between resources belong to the host framework.

pub mod cidr;
pub mod data;
pub mod resolver;
pub mod resources;
pub mod retry;
pub mod schema;
pub mod tags;

#[cfg(test)]
pub mod fake;

pub use data::ResourceData;
pub use nimbus_api::{ApiConfig, CloudApi};
pub use nimbus_common::{Error, Result, Value};

use resources::affinity_group::AffinityGroupResource;
use resources::disk::DiskResource;
use resources::instance::InstanceResource;
use resources::network::NetworkResource;
use resources::network_acl::NetworkAclResource;
use resources::private_gateway::PrivateGatewayResource;
use resources::security_group::SecurityGroupResource;
use resources::vpc::VpcResource;
use resources::vpn_customer_gateway::VpnCustomerGatewayResource;
use resources::Resource;
use schema::FieldSchema;

/// All resource type names this provider serves.
pub const TYPE_NAMES: &[&str] = &[
    "nimbus_affinity_group",
    "nimbus_disk",
    "nimbus_instance",
    "nimbus_network",
    "nimbus_network_acl",
    "nimbus_private_gateway",
    "nimbus_security_group",
    "nimbus_vpc",
    "nimbus_vpn_customer_gateway",
];

/// The provider: dispatches lifecycle operations to the controller for a
/// resource type.
pub struct NimbusProvider {
    api: CloudApi,
}

impl NimbusProvider {
    pub fn new(api: CloudApi) -> Self {
        Self { api }
    }

    /// Connect to the platform described by `config`.
    pub fn connect(config: &ApiConfig) -> Result<Self> {
        Ok(Self::new(CloudApi::connect(config)?))
    }

    /// The field schema of a resource type.
    pub fn schema_of(type_name: &str) -> Option<&'static [FieldSchema]> {
        match type_name {
            "nimbus_affinity_group" => Some(AffinityGroupResource::schema()),
            "nimbus_disk" => Some(DiskResource::schema()),
            "nimbus_instance" => Some(InstanceResource::schema()),
            "nimbus_network" => Some(NetworkResource::schema()),
            "nimbus_network_acl" => Some(NetworkAclResource::schema()),
            "nimbus_private_gateway" => Some(PrivateGatewayResource::schema()),
            "nimbus_security_group" => Some(SecurityGroupResource::schema()),
            "nimbus_vpc" => Some(VpcResource::schema()),
            "nimbus_vpn_customer_gateway" => Some(VpnCustomerGatewayResource::schema()),
            _ => None,
        }
    }

    pub async fn create(&self, type_name: &str, d: &mut ResourceData) -> Result<()> {
        match type_name {
            "nimbus_affinity_group" => AffinityGroupResource::create(&self.api, d).await,
            "nimbus_disk" => DiskResource::create(&self.api, d).await,
            "nimbus_instance" => InstanceResource::create(&self.api, d).await,
            "nimbus_network" => NetworkResource::create(&self.api, d).await,
            "nimbus_network_acl" => NetworkAclResource::create(&self.api, d).await,
            "nimbus_private_gateway" => PrivateGatewayResource::create(&self.api, d).await,
            "nimbus_security_group" => SecurityGroupResource::create(&self.api, d).await,
            "nimbus_vpc" => VpcResource::create(&self.api, d).await,
            "nimbus_vpn_customer_gateway" => {
                VpnCustomerGatewayResource::create(&self.api, d).await
            }
            _ => Err(unknown_type(type_name)),
        }
    }

    pub async fn read(&self, type_name: &str, d: &mut ResourceData) -> Result<()> {
        match type_name {
            "nimbus_affinity_group" => AffinityGroupResource::read(&self.api, d).await,
            "nimbus_disk" => DiskResource::read(&self.api, d).await,
            "nimbus_instance" => InstanceResource::read(&self.api, d).await,
            "nimbus_network" => NetworkResource::read(&self.api, d).await,
            "nimbus_network_acl" => NetworkAclResource::read(&self.api, d).await,
            "nimbus_private_gateway" => PrivateGatewayResource::read(&self.api, d).await,
            "nimbus_security_group" => SecurityGroupResource::read(&self.api, d).await,
            "nimbus_vpc" => VpcResource::read(&self.api, d).await,
            "nimbus_vpn_customer_gateway" => VpnCustomerGatewayResource::read(&self.api, d).await,
            _ => Err(unknown_type(type_name)),
        }
    }

    pub async fn update(&self, type_name: &str, d: &mut ResourceData) -> Result<()> {
        match type_name {
            "nimbus_affinity_group" => AffinityGroupResource::update(&self.api, d).await,
            "nimbus_disk" => DiskResource::update(&self.api, d).await,
            "nimbus_instance" => InstanceResource::update(&self.api, d).await,
            "nimbus_network" => NetworkResource::update(&self.api, d).await,
            "nimbus_network_acl" => NetworkAclResource::update(&self.api, d).await,
            "nimbus_private_gateway" => PrivateGatewayResource::update(&self.api, d).await,
            "nimbus_security_group" => SecurityGroupResource::update(&self.api, d).await,
            "nimbus_vpc" => VpcResource::update(&self.api, d).await,
            "nimbus_vpn_customer_gateway" => {
                VpnCustomerGatewayResource::update(&self.api, d).await
            }
            _ => Err(unknown_type(type_name)),
        }
    }

    pub async fn delete(&self, type_name: &str, d: &mut ResourceData) -> Result<()> {
        match type_name {
            "nimbus_affinity_group" => AffinityGroupResource::delete(&self.api, d).await,
            "nimbus_disk" => DiskResource::delete(&self.api, d).await,
            "nimbus_instance" => InstanceResource::delete(&self.api, d).await,
            "nimbus_network" => NetworkResource::delete(&self.api, d).await,
            "nimbus_network_acl" => NetworkAclResource::delete(&self.api, d).await,
            "nimbus_private_gateway" => PrivateGatewayResource::delete(&self.api, d).await,
            "nimbus_security_group" => SecurityGroupResource::delete(&self.api, d).await,
            "nimbus_vpc" => VpcResource::delete(&self.api, d).await,
            "nimbus_vpn_customer_gateway" => {
                VpnCustomerGatewayResource::delete(&self.api, d).await
            }
            _ => Err(unknown_type(type_name)),
        }
    }

    /// Populate the full configuration of a resource from a bare remote
    /// ID, as required when adopting an existing entity.
    pub async fn import(&self, type_name: &str, id: &str) -> Result<ResourceData> {
        match type_name {
            "nimbus_affinity_group" => AffinityGroupResource::import(&self.api, id).await,
            "nimbus_disk" => DiskResource::import(&self.api, id).await,
            "nimbus_instance" => InstanceResource::import(&self.api, id).await,
            "nimbus_network" => NetworkResource::import(&self.api, id).await,
            "nimbus_network_acl" => NetworkAclResource::import(&self.api, id).await,
            "nimbus_private_gateway" => PrivateGatewayResource::import(&self.api, id).await,
            "nimbus_security_group" => SecurityGroupResource::import(&self.api, id).await,
            "nimbus_vpc" => VpcResource::import(&self.api, id).await,
            "nimbus_vpn_customer_gateway" => {
                VpnCustomerGatewayResource::import(&self.api, id).await
            }
            _ => Err(unknown_type(type_name)),
        }
    }
}

fn unknown_type(type_name: &str) -> Error {
    Error::InvalidValue {
        field: "type".to_string(),
        reason: format!("unknown resource type {type_name}"),
    }
}
