//! HTTP implementation of the capability traits
//!
//! Every command is a JSON POST to `{endpoint}/api/v1/{command}` with the
//! token in a header. Single-entity commands return the entity object,
//! list commands return `{"items": [...]}`, and failures return
//! `{"error": {"code", "text"}}`.

use std::time::Duration;

use async_trait::async_trait;
use nimbus_common::{Error, Result, TagMap};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ApiConfig;
use crate::params::*;
use crate::traits::*;
use crate::types::*;

/// Client for the Nimbus platform API
pub struct HttpClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl HttpClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| Error::Transport {
                op: "client setup".to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Issue one command and return the raw response body.
    async fn execute<P>(&self, command: &str, params: &P) -> Result<String>
    where
        P: Serialize + ?Sized,
    {
        let url = format!("{}/api/v1/{}", self.endpoint, command);
        debug!(command, "issuing API call");

        let response = self
            .http
            .post(&url)
            .header("X-Auth-Token", &self.token)
            .json(params)
            .send()
            .await
            .map_err(|e| Error::Transport {
                op: command.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| Error::Transport {
            op: command.to_string(),
            message: e.to_string(),
        })?;

        if status.is_success() {
            return Ok(body);
        }

        // The platform wraps failures in an error envelope; fall back to
        // the raw body when the envelope itself does not parse.
        match serde_json::from_str::<FaultEnvelope>(&body) {
            Ok(envelope) => Err(Error::Api {
                op: command.to_string(),
                code: envelope.error.code,
                text: envelope.error.text,
            }),
            Err(_) => Err(Error::Api {
                op: command.to_string(),
                code: status.as_u16(),
                text: body,
            }),
        }
    }

    async fn call<P, T>(&self, command: &str, params: &P) -> Result<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.execute(command, params).await?;
        serde_json::from_str(&body).map_err(|e| Error::Transport {
            op: command.to_string(),
            message: format!("decoding response: {e}"),
        })
    }

    async fn call_unit<P>(&self, command: &str, params: &P) -> Result<()>
    where
        P: Serialize + ?Sized,
    {
        self.execute(command, params).await.map(|_| ())
    }
}

#[derive(Deserialize)]
struct FaultEnvelope {
    error: Fault,
}

#[derive(Deserialize)]
struct Fault {
    #[serde(default)]
    code: u16,
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct Listing<T> {
    #[serde(default)]
    items: Vec<T>,
}

#[derive(Serialize)]
struct ById<'a> {
    id: &'a str,
}

#[derive(Serialize)]
struct FindById<'a> {
    id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    project: Option<&'a str>,
}

#[derive(Serialize)]
struct ByName<'a> {
    name: &'a str,
}

impl HttpClient {
    async fn find_one<T>(&self, command: &str, id: &str, project: Option<&str>) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let listing: Listing<T> = self.call(command, &FindById { id, project }).await?;
        Ok(listing.items.into_iter().next())
    }

    async fn list_named<T>(&self, command: &str, name: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let listing: Listing<T> = self.call(command, &ByName { name }).await?;
        Ok(listing.items)
    }
}

#[async_trait]
impl VirtualMachines for HttpClient {
    async fn deploy(&self, params: &DeployInstanceParams) -> Result<Instance> {
        self.call("deployInstance", params).await
    }

    async fn find(&self, id: &str, project: Option<&str>) -> Result<Option<Instance>> {
        self.find_one("listInstances", id, project).await
    }

    async fn start(&self, id: &str) -> Result<()> {
        self.call_unit("startInstance", &ById { id }).await
    }

    async fn stop(&self, id: &str) -> Result<()> {
        self.call_unit("stopInstance", &ById { id }).await
    }

    async fn update(&self, params: &UpdateInstanceParams) -> Result<()> {
        self.call_unit("updateInstance", params).await
    }

    async fn change_service_offering(&self, id: &str, service_offering_id: &str) -> Result<()> {
        #[derive(Serialize)]
        struct Params<'a> {
            id: &'a str,
            service_offering_id: &'a str,
        }
        self.call_unit(
            "changeServiceOffering",
            &Params {
                id,
                service_offering_id,
            },
        )
        .await
    }

    async fn reset_ssh_key(&self, params: &ResetSshKeyParams) -> Result<()> {
        self.call_unit("resetSshKey", params).await
    }

    async fn destroy(&self, id: &str, expunge: bool) -> Result<()> {
        #[derive(Serialize)]
        struct Params<'a> {
            id: &'a str,
            expunge: bool,
        }
        self.call_unit("destroyInstance", &Params { id, expunge })
            .await
    }
}

#[async_trait]
impl Volumes for HttpClient {
    async fn create(&self, params: &CreateVolumeParams) -> Result<Volume> {
        self.call("createVolume", params).await
    }

    async fn find(&self, id: &str, project: Option<&str>) -> Result<Option<Volume>> {
        self.find_one("listVolumes", id, project).await
    }

    async fn list_root(&self, virtual_machine_id: &str) -> Result<Vec<Volume>> {
        #[derive(Serialize)]
        struct Params<'a> {
            virtual_machine_id: &'a str,
            #[serde(rename = "type")]
            volume_type: &'a str,
        }
        let listing: Listing<Volume> = self
            .call(
                "listVolumes",
                &Params {
                    virtual_machine_id,
                    volume_type: "ROOT",
                },
            )
            .await?;
        Ok(listing.items)
    }

    async fn resize(&self, params: &ResizeVolumeParams) -> Result<Volume> {
        self.call("resizeVolume", params).await
    }

    async fn attach(
        &self,
        id: &str,
        virtual_machine_id: &str,
        device_id: Option<i64>,
    ) -> Result<Volume> {
        #[derive(Serialize)]
        struct Params<'a> {
            id: &'a str,
            virtual_machine_id: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            device_id: Option<i64>,
        }
        self.call(
            "attachVolume",
            &Params {
                id,
                virtual_machine_id,
                device_id,
            },
        )
        .await
    }

    async fn detach(&self, id: &str) -> Result<()> {
        self.call_unit("detachVolume", &ById { id }).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.call_unit("deleteVolume", &ById { id }).await
    }
}

#[async_trait]
impl Networks for HttpClient {
    async fn create(&self, params: &CreateNetworkParams) -> Result<Network> {
        self.call("createNetwork", params).await
    }

    async fn find(&self, id: &str, project: Option<&str>) -> Result<Option<Network>> {
        self.find_one("listNetworks", id, project).await
    }

    async fn update(&self, params: &UpdateNetworkParams) -> Result<()> {
        self.call_unit("updateNetwork", params).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.call_unit("deleteNetwork", &ById { id }).await
    }
}

#[async_trait]
impl NetworkOfferings for HttpClient {
    async fn find(&self, id: &str) -> Result<Option<NetworkOffering>> {
        self.find_one("listNetworkOfferings", id, None).await
    }

    async fn list_by_name(&self, name: &str) -> Result<Vec<NetworkOffering>> {
        self.list_named("listNetworkOfferings", name).await
    }
}

#[async_trait]
impl Vpcs for HttpClient {
    async fn create(&self, params: &CreateVpcParams) -> Result<Vpc> {
        self.call("createVpc", params).await
    }

    async fn find(&self, id: &str, project: Option<&str>) -> Result<Option<Vpc>> {
        self.find_one("listVpcs", id, project).await
    }

    async fn update(&self, params: &UpdateVpcParams) -> Result<()> {
        self.call_unit("updateVpc", params).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.call_unit("deleteVpc", &ById { id }).await
    }
}

#[async_trait]
impl VpcOfferings for HttpClient {
    async fn find(&self, id: &str) -> Result<Option<VpcOffering>> {
        self.find_one("listVpcOfferings", id, None).await
    }

    async fn list_by_name(&self, name: &str) -> Result<Vec<VpcOffering>> {
        self.list_named("listVpcOfferings", name).await
    }
}

#[async_trait]
impl PrivateGateways for HttpClient {
    async fn create(&self, params: &CreatePrivateGatewayParams) -> Result<PrivateGateway> {
        self.call("createPrivateGateway", params).await
    }

    async fn find(&self, id: &str) -> Result<Option<PrivateGateway>> {
        self.find_one("listPrivateGateways", id, None).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.call_unit("deletePrivateGateway", &ById { id }).await
    }
}

#[async_trait]
impl SecurityGroups for HttpClient {
    async fn create(&self, params: &CreateSecurityGroupParams) -> Result<SecurityGroup> {
        self.call("createSecurityGroup", params).await
    }

    async fn find(&self, id: &str, project: Option<&str>) -> Result<Option<SecurityGroup>> {
        self.find_one("listSecurityGroups", id, project).await
    }

    async fn delete(&self, id: &str, project_id: Option<&str>) -> Result<()> {
        #[derive(Serialize)]
        struct Params<'a> {
            id: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            project_id: Option<&'a str>,
        }
        self.call_unit("deleteSecurityGroup", &Params { id, project_id })
            .await
    }
}

#[async_trait]
impl AffinityGroups for HttpClient {
    async fn create(&self, params: &CreateAffinityGroupParams) -> Result<AffinityGroup> {
        self.call("createAffinityGroup", params).await
    }

    async fn find(&self, id: &str, project: Option<&str>) -> Result<Option<AffinityGroup>> {
        self.find_one("listAffinityGroups", id, project).await
    }

    async fn delete(&self, id: &str, project_id: Option<&str>) -> Result<()> {
        #[derive(Serialize)]
        struct Params<'a> {
            id: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            project_id: Option<&'a str>,
        }
        self.call_unit("deleteAffinityGroup", &Params { id, project_id })
            .await
    }

    async fn update_vm_groups(
        &self,
        virtual_machine_id: &str,
        ids: Option<&[String]>,
        names: Option<&[String]>,
    ) -> Result<()> {
        #[derive(Serialize)]
        struct Params<'a> {
            virtual_machine_id: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            affinity_group_ids: Option<&'a [String]>,
            #[serde(skip_serializing_if = "Option::is_none")]
            affinity_group_names: Option<&'a [String]>,
        }
        self.call_unit(
            "updateVmAffinityGroups",
            &Params {
                virtual_machine_id,
                affinity_group_ids: ids,
                affinity_group_names: names,
            },
        )
        .await
    }
}

#[async_trait]
impl NetworkAcls for HttpClient {
    async fn create(&self, params: &CreateAclListParams) -> Result<NetworkAclList> {
        self.call("createNetworkAclList", params).await
    }

    async fn find(&self, id: &str, project: Option<&str>) -> Result<Option<NetworkAclList>> {
        self.find_one("listNetworkAclLists", id, project).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.call_unit("deleteNetworkAclList", &ById { id }).await
    }

    async fn replace(&self, acl_id: &str, network_id: &str) -> Result<()> {
        #[derive(Serialize)]
        struct Params<'a> {
            acl_id: &'a str,
            network_id: &'a str,
        }
        self.call_unit("replaceNetworkAclList", &Params { acl_id, network_id })
            .await
    }
}

#[async_trait]
impl Addresses for HttpClient {
    async fn associate(&self, params: &AssociateIpParams) -> Result<PublicIpAddress> {
        self.call("associateIpAddress", params).await
    }

    async fn find(&self, id: &str, project: Option<&str>) -> Result<Option<PublicIpAddress>> {
        self.find_one("listPublicIpAddresses", id, project).await
    }

    async fn list(&self, params: &ListPublicIpsParams) -> Result<Vec<PublicIpAddress>> {
        let listing: Listing<PublicIpAddress> =
            self.call("listPublicIpAddresses", params).await?;
        Ok(listing.items)
    }
}

#[async_trait]
impl VpnGateways for HttpClient {
    async fn create(&self, params: &CreateVpnCustomerGatewayParams) -> Result<VpnCustomerGateway> {
        self.call("createVpnCustomerGateway", params).await
    }

    async fn find(&self, id: &str) -> Result<Option<VpnCustomerGateway>> {
        self.find_one("listVpnCustomerGateways", id, None).await
    }

    async fn update(&self, params: &UpdateVpnCustomerGatewayParams) -> Result<()> {
        self.call_unit("updateVpnCustomerGateway", params).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.call_unit("deleteVpnCustomerGateway", &ById { id })
            .await
    }
}

#[async_trait]
impl ResourceTags for HttpClient {
    async fn create(&self, resource_type: &str, resource_id: &str, tags: &TagMap) -> Result<()> {
        self.call_unit(
            "createTags",
            &TagsParams {
                resource_type,
                resource_id,
                tags,
            },
        )
        .await
    }

    async fn delete(&self, resource_type: &str, resource_id: &str, tags: &TagMap) -> Result<()> {
        self.call_unit(
            "deleteTags",
            &TagsParams {
                resource_type,
                resource_id,
                tags,
            },
        )
        .await
    }
}

#[derive(Serialize)]
struct TagsParams<'a> {
    resource_type: &'a str,
    resource_id: &'a str,
    tags: &'a TagMap,
}

#[async_trait]
impl Zones for HttpClient {
    async fn find(&self, id: &str) -> Result<Option<Zone>> {
        self.find_one("listZones", id, None).await
    }

    async fn list_by_name(&self, name: &str) -> Result<Vec<Zone>> {
        self.list_named("listZones", name).await
    }
}

#[async_trait]
impl Templates for HttpClient {
    async fn list_by_name(&self, zone_id: &str, name: &str) -> Result<Vec<Template>> {
        #[derive(Serialize)]
        struct Params<'a> {
            zone_id: &'a str,
            name: &'a str,
            template_filter: &'a str,
        }
        let listing: Listing<Template> = self
            .call(
                "listTemplates",
                &Params {
                    zone_id,
                    name,
                    template_filter: "executable",
                },
            )
            .await?;
        Ok(listing.items)
    }
}

#[async_trait]
impl ServiceOfferings for HttpClient {
    async fn list_by_name(&self, name: &str) -> Result<Vec<ServiceOffering>> {
        self.list_named("listServiceOfferings", name).await
    }
}

#[async_trait]
impl DiskOfferings for HttpClient {
    async fn list_by_name(&self, name: &str) -> Result<Vec<DiskOffering>> {
        self.list_named("listDiskOfferings", name).await
    }
}

#[async_trait]
impl Projects for HttpClient {
    async fn list_by_name(&self, name: &str) -> Result<Vec<Project>> {
        self.list_named("listProjects", name).await
    }
}
