//! Capability traits, one per remote sub-resource category
//!
//! Lifecycle controllers depend on these traits rather than on a concrete
//! client, so tests can inject in-memory fakes per category. `find`-style
//! calls return `Ok(None)` when zero remote entities match the ID; that is
//! how controllers detect that an entity is gone.

use std::sync::Arc;

use async_trait::async_trait;
use nimbus_common::{Result, TagMap};

use crate::params::*;
use crate::types::*;

#[async_trait]
pub trait VirtualMachines: Send + Sync {
    async fn deploy(&self, params: &DeployInstanceParams) -> Result<Instance>;
    async fn find(&self, id: &str, project: Option<&str>) -> Result<Option<Instance>>;
    async fn start(&self, id: &str) -> Result<()>;
    async fn stop(&self, id: &str) -> Result<()>;
    async fn update(&self, params: &UpdateInstanceParams) -> Result<()>;
    async fn change_service_offering(&self, id: &str, service_offering_id: &str) -> Result<()>;
    async fn reset_ssh_key(&self, params: &ResetSshKeyParams) -> Result<()>;
    async fn destroy(&self, id: &str, expunge: bool) -> Result<()>;
}

#[async_trait]
pub trait Volumes: Send + Sync {
    async fn create(&self, params: &CreateVolumeParams) -> Result<Volume>;
    async fn find(&self, id: &str, project: Option<&str>) -> Result<Option<Volume>>;
    /// ROOT volumes of the given instance.
    async fn list_root(&self, virtual_machine_id: &str) -> Result<Vec<Volume>>;
    async fn resize(&self, params: &ResizeVolumeParams) -> Result<Volume>;
    async fn attach(&self, id: &str, virtual_machine_id: &str, device_id: Option<i64>)
        -> Result<Volume>;
    async fn detach(&self, id: &str) -> Result<()>;
    async fn delete(&self, id: &str) -> Result<()>;
}

#[async_trait]
pub trait Networks: Send + Sync {
    async fn create(&self, params: &CreateNetworkParams) -> Result<Network>;
    async fn find(&self, id: &str, project: Option<&str>) -> Result<Option<Network>>;
    async fn update(&self, params: &UpdateNetworkParams) -> Result<()>;
    async fn delete(&self, id: &str) -> Result<()>;
}

#[async_trait]
pub trait NetworkOfferings: Send + Sync {
    async fn find(&self, id: &str) -> Result<Option<NetworkOffering>>;
    async fn list_by_name(&self, name: &str) -> Result<Vec<NetworkOffering>>;
}

#[async_trait]
pub trait Vpcs: Send + Sync {
    async fn create(&self, params: &CreateVpcParams) -> Result<Vpc>;
    async fn find(&self, id: &str, project: Option<&str>) -> Result<Option<Vpc>>;
    async fn update(&self, params: &UpdateVpcParams) -> Result<()>;
    async fn delete(&self, id: &str) -> Result<()>;
}

#[async_trait]
pub trait VpcOfferings: Send + Sync {
    async fn find(&self, id: &str) -> Result<Option<VpcOffering>>;
    async fn list_by_name(&self, name: &str) -> Result<Vec<VpcOffering>>;
}

#[async_trait]
pub trait PrivateGateways: Send + Sync {
    async fn create(&self, params: &CreatePrivateGatewayParams) -> Result<PrivateGateway>;
    async fn find(&self, id: &str) -> Result<Option<PrivateGateway>>;
    async fn delete(&self, id: &str) -> Result<()>;
}

#[async_trait]
pub trait SecurityGroups: Send + Sync {
    async fn create(&self, params: &CreateSecurityGroupParams) -> Result<SecurityGroup>;
    async fn find(&self, id: &str, project: Option<&str>) -> Result<Option<SecurityGroup>>;
    async fn delete(&self, id: &str, project_id: Option<&str>) -> Result<()>;
}

#[async_trait]
pub trait AffinityGroups: Send + Sync {
    async fn create(&self, params: &CreateAffinityGroupParams) -> Result<AffinityGroup>;
    async fn find(&self, id: &str, project: Option<&str>) -> Result<Option<AffinityGroup>>;
    async fn delete(&self, id: &str, project_id: Option<&str>) -> Result<()>;
    /// Replace the full affinity-group membership of an instance. Exactly
    /// one of `ids`/`names` is supplied; an empty slice clears membership.
    async fn update_vm_groups(
        &self,
        virtual_machine_id: &str,
        ids: Option<&[String]>,
        names: Option<&[String]>,
    ) -> Result<()>;
}

#[async_trait]
pub trait NetworkAcls: Send + Sync {
    async fn create(&self, params: &CreateAclListParams) -> Result<NetworkAclList>;
    async fn find(&self, id: &str, project: Option<&str>) -> Result<Option<NetworkAclList>>;
    async fn delete(&self, id: &str) -> Result<()>;
    /// Point a network (or private gateway) at a different ACL list.
    async fn replace(&self, acl_id: &str, network_id: &str) -> Result<()>;
}

#[async_trait]
pub trait Addresses: Send + Sync {
    async fn associate(&self, params: &AssociateIpParams) -> Result<PublicIpAddress>;
    async fn find(&self, id: &str, project: Option<&str>) -> Result<Option<PublicIpAddress>>;
    async fn list(&self, params: &ListPublicIpsParams) -> Result<Vec<PublicIpAddress>>;
}

#[async_trait]
pub trait VpnGateways: Send + Sync {
    async fn create(&self, params: &CreateVpnCustomerGatewayParams) -> Result<VpnCustomerGateway>;
    async fn find(&self, id: &str) -> Result<Option<VpnCustomerGateway>>;
    async fn update(&self, params: &UpdateVpnCustomerGatewayParams) -> Result<()>;
    async fn delete(&self, id: &str) -> Result<()>;
}

#[async_trait]
pub trait ResourceTags: Send + Sync {
    async fn create(&self, resource_type: &str, resource_id: &str, tags: &TagMap) -> Result<()>;
    async fn delete(&self, resource_type: &str, resource_id: &str, tags: &TagMap) -> Result<()>;
}

#[async_trait]
pub trait Zones: Send + Sync {
    async fn find(&self, id: &str) -> Result<Option<Zone>>;
    async fn list_by_name(&self, name: &str) -> Result<Vec<Zone>>;
}

#[async_trait]
pub trait Templates: Send + Sync {
    /// Executable templates matching the name, scoped to a zone.
    async fn list_by_name(&self, zone_id: &str, name: &str) -> Result<Vec<Template>>;
}

#[async_trait]
pub trait ServiceOfferings: Send + Sync {
    async fn list_by_name(&self, name: &str) -> Result<Vec<ServiceOffering>>;
}

#[async_trait]
pub trait DiskOfferings: Send + Sync {
    async fn list_by_name(&self, name: &str) -> Result<Vec<DiskOffering>>;
}

#[async_trait]
pub trait Projects: Send + Sync {
    async fn list_by_name(&self, name: &str) -> Result<Vec<Project>>;
}

/// The remote client grouped by sub-resource category.
///
/// Mirrors how the platform SDK groups its services; every field can be
/// swapped for a fake independently.
#[derive(Clone)]
pub struct CloudApi {
    pub vms: Arc<dyn VirtualMachines>,
    pub volumes: Arc<dyn Volumes>,
    pub networks: Arc<dyn Networks>,
    pub network_offerings: Arc<dyn NetworkOfferings>,
    pub vpcs: Arc<dyn Vpcs>,
    pub vpc_offerings: Arc<dyn VpcOfferings>,
    pub private_gateways: Arc<dyn PrivateGateways>,
    pub security_groups: Arc<dyn SecurityGroups>,
    pub affinity_groups: Arc<dyn AffinityGroups>,
    pub acls: Arc<dyn NetworkAcls>,
    pub addresses: Arc<dyn Addresses>,
    pub vpn: Arc<dyn VpnGateways>,
    pub tags: Arc<dyn ResourceTags>,
    pub zones: Arc<dyn Zones>,
    pub templates: Arc<dyn Templates>,
    pub service_offerings: Arc<dyn ServiceOfferings>,
    pub disk_offerings: Arc<dyn DiskOfferings>,
    pub projects: Arc<dyn Projects>,
}

impl CloudApi {
    /// Build an API handle where one client implements every category.
    pub fn from_client<C>(client: Arc<C>) -> Self
    where
        C: VirtualMachines
            + Volumes
            + Networks
            + NetworkOfferings
            + Vpcs
            + VpcOfferings
            + PrivateGateways
            + SecurityGroups
            + AffinityGroups
            + NetworkAcls
            + Addresses
            + VpnGateways
            + ResourceTags
            + Zones
            + Templates
            + ServiceOfferings
            + DiskOfferings
            + Projects
            + 'static,
    {
        Self {
            vms: client.clone(),
            volumes: client.clone(),
            networks: client.clone(),
            network_offerings: client.clone(),
            vpcs: client.clone(),
            vpc_offerings: client.clone(),
            private_gateways: client.clone(),
            security_groups: client.clone(),
            affinity_groups: client.clone(),
            acls: client.clone(),
            addresses: client.clone(),
            vpn: client.clone(),
            tags: client.clone(),
            zones: client.clone(),
            templates: client.clone(),
            service_offerings: client.clone(),
            disk_offerings: client.clone(),
            projects: client,
        }
    }

    /// Connect to the platform over HTTP.
    pub fn connect(config: &crate::ApiConfig) -> Result<Self> {
        let client = Arc::new(crate::HttpClient::new(config)?);
        Ok(Self::from_client(client))
    }
}
