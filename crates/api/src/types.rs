//! Response entities returned by the Nimbus API
//!
//! Every struct mirrors the attribute set the platform reports for one
//! entity kind. Fields the provider does not map back are omitted; all
//! fields carry `#[serde(default)]` because the platform elides empty
//! attributes from responses.

use serde::{Deserialize, Serialize};

/// A key/value tag attached to a remote entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// A network interface attached to an instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nic {
    #[serde(default)]
    pub network_id: String,
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub ip6_address: String,
    #[serde(default)]
    pub ip6_cidr: String,
}

/// A group reference (affinity or security) reported on an instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupRef {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// A virtual machine instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub state: String,
    /// Initial password, only present directly after deploy.
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub nics: Vec<Nic>,
    #[serde(default)]
    pub affinity_groups: Vec<GroupRef>,
    #[serde(default)]
    pub security_groups: Vec<GroupRef>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub service_offering_id: String,
    #[serde(default)]
    pub service_offering_name: String,
    #[serde(default)]
    pub template_id: String,
    #[serde(default)]
    pub template_name: String,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub zone_id: String,
    #[serde(default)]
    pub zone_name: String,
}

/// A storage volume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: i64,
    #[serde(default)]
    pub device_id: i64,
    /// Empty when the volume is not attached.
    #[serde(default)]
    pub virtual_machine_id: String,
    #[serde(default)]
    pub disk_offering_id: String,
    #[serde(default)]
    pub disk_offering_name: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub zone_id: String,
    #[serde(default)]
    pub zone_name: String,
}

/// A guest network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_text: String,
    #[serde(default)]
    pub cidr: String,
    #[serde(default)]
    pub gateway: String,
    #[serde(default)]
    pub network_domain: String,
    #[serde(default)]
    pub vpc_id: String,
    #[serde(default)]
    pub acl_id: String,
    #[serde(default)]
    pub network_offering_id: String,
    #[serde(default)]
    pub network_offering_name: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub zone_id: String,
    #[serde(default)]
    pub zone_name: String,
}

/// A network offering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkOffering {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Whether explicit start/end IP pool bounds may be supplied.
    #[serde(default)]
    pub specify_ip_ranges: bool,
}

/// A virtual private cloud.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vpc {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_text: String,
    #[serde(default)]
    pub cidr: String,
    #[serde(default)]
    pub network_domain: String,
    #[serde(default)]
    pub vpc_offering_id: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub zone_id: String,
    #[serde(default)]
    pub zone_name: String,
}

/// A VPC offering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VpcOffering {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// A private gateway inside a VPC.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrivateGateway {
    pub id: String,
    #[serde(default)]
    pub gateway: String,
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub netmask: String,
    #[serde(default)]
    pub vlan: String,
    #[serde(default)]
    pub acl_id: String,
    #[serde(default)]
    pub vpc_id: String,
}

/// A security group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecurityGroup {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub project_id: String,
}

/// An affinity group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AffinityGroup {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "type")]
    pub group_type: String,
}

/// A network ACL list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkAclList {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub vpc_id: String,
}

/// A public IP address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicIpAddress {
    pub id: String,
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub associated_network_id: String,
    #[serde(default)]
    pub vpc_id: String,
    #[serde(default)]
    pub is_source_nat: bool,
}

/// A VPN customer gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VpnCustomerGateway {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cidr_list: String,
    #[serde(default)]
    pub esp_policy: String,
    #[serde(default)]
    pub gateway: String,
    #[serde(default)]
    pub ike_policy: String,
    #[serde(default)]
    pub ipsec_psk: String,
    #[serde(default)]
    pub dpd: bool,
    #[serde(default)]
    pub esp_lifetime: i64,
    #[serde(default)]
    pub ike_lifetime: i64,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub project_id: String,
}

/// A zone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// "Basic" or "Advanced".
    #[serde(default)]
    pub network_type: String,
}

/// A template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub zone_id: String,
}

/// A compute service offering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceOffering {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// A disk offering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskOffering {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// A project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub name: String,
}
