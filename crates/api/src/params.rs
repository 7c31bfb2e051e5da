//! Request parameter structs for mutating API commands
//!
//! Optional fields are omitted from the request body entirely when unset,
//! matching what the platform expects.

use std::collections::BTreeMap;

use serde::Serialize;

/// Parameters for deploying a new instance.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeployInstanceParams {
    pub service_offering_id: String,
    pub template_id: String,
    pub zone_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_vm: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// Root disk size in GiB.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_disk_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boot_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boot_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affinity_group_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affinity_group_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_group_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_group_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keypair: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keypairs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<String>,
    /// Base64-encoded user data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, String>>,
}

/// Parameters for in-place instance attribute updates.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateInstanceParams {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Base64-encoded user data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, String>>,
}

/// Parameters for resetting the SSH key material of a stopped instance.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResetSshKeyParams {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keypair: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keypairs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

/// Parameters for creating a volume.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateVolumeParams {
    pub name: String,
    pub disk_offering_id: String,
    pub zone_id: String,
    /// Size in GiB.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

/// Parameters for resizing a volume.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResizeVolumeParams {
    pub id: String,
    pub disk_offering_id: String,
    /// Size in GiB.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    pub shrink_ok: bool,
}

/// Parameters for creating a guest network.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateNetworkParams {
    pub name: String,
    pub network_offering_id: String,
    pub zone_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub netmask: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acl_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub bypass_vlan_overlap_check: bool,
}

/// Parameters for in-place network updates.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateNetworkParams {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_vm_cidr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_offering_id: Option<String>,
}

/// Parameters for creating a VPC.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateVpcParams {
    pub name: String,
    pub display_text: String,
    pub cidr: String,
    pub vpc_offering_id: String,
    pub zone_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

/// Parameters for in-place VPC updates.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateVpcParams {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_text: Option<String>,
}

/// Parameters for creating a private gateway.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreatePrivateGatewayParams {
    pub gateway: String,
    pub ip_address: String,
    pub netmask: String,
    pub vpc_id: String,
    pub vlan: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_network_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_offering_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acl_id: Option<String>,
    pub bypass_vlan_overlap_check: bool,
}

/// Parameters for creating a security group.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateSecurityGroupParams {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

/// Parameters for creating an affinity group.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateAffinityGroupParams {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub group_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

/// Parameters for creating a network ACL list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateAclListParams {
    pub name: String,
    pub description: String,
    pub vpc_id: String,
}

/// Parameters for associating a public IP address.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssociateIpParams {
    pub zone_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

/// Filters for listing public IP addresses.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListPublicIpsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_source_nat: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

/// Parameters for creating a VPN customer gateway.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateVpnCustomerGatewayParams {
    pub cidr_list: String,
    pub esp_policy: String,
    pub gateway: String,
    pub ike_policy: String,
    pub ipsec_psk: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dpd: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub esp_lifetime: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ike_lifetime: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

/// Parameters for updating a VPN customer gateway.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateVpnCustomerGatewayParams {
    pub id: String,
    pub cidr_list: String,
    pub esp_policy: String,
    pub gateway: String,
    pub ike_policy: String,
    pub ipsec_psk: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dpd: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub esp_lifetime: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ike_lifetime: Option<i64>,
}
