//! Instance resource handler

use std::collections::BTreeSet;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use nimbus_api::{
    entity_gone, CloudApi, DeployInstanceParams, ResetSshKeyParams, UpdateInstanceParams,
};
use nimbus_common::error::ResultExt;
use nimbus_common::{Error, FieldType, Result};
use tracing::{debug, info};

use super::Resource;
use crate::data::ResourceData;
use crate::resolver::{self, IdKind};
use crate::schema::{self, FieldSchema};
use crate::tags;

/// Remote tag type for instances.
const TAG_TYPE: &str = "UserVm";

/// Fields that can only change while the instance is stopped.
const STOP_REQUIRED_FIELDS: &[&str] = &[
    "name",
    "service_offering",
    "affinity_group_ids",
    "affinity_group_names",
    "keypair",
    "keypairs",
    "user_data",
];

static SCHEMA: &[FieldSchema] = &[
    FieldSchema::computed("name", FieldType::String),
    FieldSchema::computed("display_name", FieldType::String),
    FieldSchema::required("service_offering", FieldType::String),
    FieldSchema::computed("network_id", FieldType::String).force_new(),
    FieldSchema::computed("ip_address", FieldType::String).force_new(),
    FieldSchema::computed("ip6_address", FieldType::String),
    FieldSchema::computed("ip6_cidr", FieldType::String),
    FieldSchema::required("template", FieldType::String).force_new(),
    FieldSchema::computed("root_disk_size", FieldType::Int).force_new(),
    FieldSchema::computed("group", FieldType::String),
    FieldSchema::optional("affinity_group_ids", FieldType::StringSet)
        .conflicts(&["affinity_group_names"]),
    FieldSchema::optional("affinity_group_names", FieldType::StringSet)
        .conflicts(&["affinity_group_ids"]),
    FieldSchema::optional("security_group_ids", FieldType::StringSet)
        .force_new()
        .conflicts(&["security_group_names"]),
    FieldSchema::optional("security_group_names", FieldType::StringSet)
        .force_new()
        .conflicts(&["security_group_ids"]),
    FieldSchema::computed("project", FieldType::String).force_new(),
    FieldSchema::required("zone", FieldType::String).force_new(),
    FieldSchema::optional("keypair", FieldType::String).conflicts(&["keypairs"]),
    FieldSchema::optional("keypairs", FieldType::StringList).conflicts(&["keypair"]),
    FieldSchema::optional("host_id", FieldType::String),
    FieldSchema::optional("cluster_id", FieldType::String),
    FieldSchema::optional("pod_id", FieldType::String),
    FieldSchema::optional("uefi", FieldType::Bool),
    FieldSchema::optional("start_vm", FieldType::Bool).force_new(),
    FieldSchema::optional("user_data", FieldType::String),
    FieldSchema::optional("details", FieldType::StringMap),
    FieldSchema::optional("properties", FieldType::StringMap),
    FieldSchema::optional("expunge", FieldType::Bool),
    FieldSchema::optional("tags", FieldType::StringMap),
];

pub struct InstanceResource;

#[async_trait]
impl Resource for InstanceResource {
    fn type_name() -> &'static str {
        "nimbus_instance"
    }

    fn schema() -> &'static [FieldSchema] {
        SCHEMA
    }

    async fn create(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        schema::validate(Self::type_name(), SCHEMA, d)?;

        let service_offering_id =
            resolver::resolve_id(api, IdKind::ServiceOffering, d.get_str("service_offering"))
                .await?;
        let zone_id = resolver::resolve_id(api, IdKind::Zone, d.get_str("zone")).await?;

        // The zone entity itself decides whether a default network must be
        // named explicitly.
        let zone = api.zones.find(&zone_id).await?.ok_or_else(|| Error::NotFound {
            kind: "zone",
            name: zone_id.clone(),
        })?;

        let template_id = resolver::resolve_template_id(api, &zone.id, d.get_str("template")).await?;

        let name = d.get_str_ok("name").map(str::to_string);

        let mut params = DeployInstanceParams {
            service_offering_id,
            template_id,
            zone_id: zone.id.clone(),
            start_vm: Some(d.get_bool_or("start_vm", true)),
            name: name.clone(),
            display_name: d
                .get_str_ok("display_name")
                .map(str::to_string)
                .or_else(|| name.clone()),
            ..Default::default()
        };

        if let Some(details) = d.get_map("details") {
            params.details = Some(details.clone());
        }
        if let Some(properties) = d.get_map("properties") {
            params.properties = Some(properties.clone());
        }
        if let Some(size) = d.get_int_ok("root_disk_size") {
            params.root_disk_size = Some(size);
        }
        if d.get_bool("uefi") {
            params.boot_type = Some("UEFI".to_string());
            params.boot_mode = Some("Legacy".to_string());
        }

        if zone.network_type == "Advanced" {
            params.network_ids = Some(vec![d.get_str("network_id").to_string()]);
        }

        if let Some(ip) = d.get_str_ok("ip_address") {
            params.ip_address = Some(ip.to_string());
        }
        if let Some(group) = d.get_str_ok("group") {
            params.group = Some(group.to_string());
        }

        if let Some(ids) = d.get_set("affinity_group_ids") {
            params.affinity_group_ids = Some(ids.iter().cloned().collect());
        }
        if let Some(names) = d.get_set("affinity_group_names") {
            params.affinity_group_names = Some(names.iter().cloned().collect());
        }
        if let Some(ids) = d.get_set("security_group_ids") {
            params.security_group_ids = Some(ids.iter().cloned().collect());
        }
        if let Some(names) = d.get_set("security_group_names") {
            params.security_group_names = Some(names.iter().cloned().collect());
        }

        params.project_id = resolver::project_id_of(api, d).await?;

        if let Some(keypair) = d.get_str_ok("keypair") {
            params.keypair = Some(keypair.to_string());
        }
        if let Some(keypairs) = d.get_list("keypairs") {
            params.keypairs = Some(keypairs.clone());
        }
        if let Some(host_id) = d.get_str_ok("host_id") {
            params.host_id = Some(host_id.to_string());
        }
        if let Some(pod_id) = d.get_str_ok("pod_id") {
            params.pod_id = Some(pod_id.to_string());
        }
        if let Some(cluster_id) = d.get_str_ok("cluster_id") {
            params.cluster_id = Some(cluster_id.to_string());
        }
        if let Some(user_data) = d.get_str_ok("user_data") {
            params.user_data = Some(normalize_user_data(user_data));
        }

        info!(name = d.get_str("name"), zone = %zone.id, "deploying instance");
        let vm = api
            .vms
            .deploy(&params)
            .await
            .ctx_with(|| format!("creating the new instance {}", d.get_str("name")))?;

        d.set_id(&vm.id);

        tags::set_tags(api, TAG_TYPE, &vm.id, d)
            .await
            .ctx_with(|| format!("setting tags on the new instance {}", d.get_str("name")))?;

        // Connection details for any downstream provisioning steps.
        if let Some(nic) = vm.nics.first() {
            d.set_conn_info("host", &nic.ip_address);
        }
        d.set_conn_info("password", &vm.password);

        Self::read(api, d).await
    }

    async fn read(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        let id = d.require_id()?.to_string();

        let Some(vm) = api.vms.find(&id, d.get_str_ok("project")).await? else {
            debug!(name = d.get_str("name"), "instance no longer exists");
            d.clear_id();
            return Ok(());
        };

        d.set("name", vm.name.as_str());
        d.set("display_name", vm.display_name.as_str());
        d.set("group", vm.group.as_str());

        // A failed destroy can leave an instance without any NIC.
        if let Some(nic) = vm.nics.first() {
            d.set("network_id", nic.network_id.as_str());
            d.set("ip_address", nic.ip_address.as_str());
            if !nic.ip6_address.is_empty() {
                d.set("ip6_address", nic.ip6_address.as_str());
                d.set("ip6_cidr", nic.ip6_cidr.as_str());
            }
        }

        // The root disk size is only reported on the ROOT volume, in bytes.
        let root_volumes = api.volumes.list_root(&id).await?;
        if root_volumes.len() == 1 {
            d.set("root_disk_size", root_volumes[0].size >> 30);
        } else {
            debug!(name = %vm.name, "failed to find the root disk of the instance");
        }

        if d.get_set("affinity_group_ids").is_some() {
            let groups: BTreeSet<String> =
                vm.affinity_groups.iter().map(|g| g.id.clone()).collect();
            d.set("affinity_group_ids", groups);
        }
        if d.get_set("affinity_group_names").is_some() {
            let groups: BTreeSet<String> =
                vm.affinity_groups.iter().map(|g| g.name.clone()).collect();
            d.set("affinity_group_names", groups);
        }
        if d.get_set("security_group_ids").is_some() {
            let groups: BTreeSet<String> =
                vm.security_groups.iter().map(|g| g.id.clone()).collect();
            d.set("security_group_ids", groups);
        }
        if d.get_set("security_group_names").is_some() {
            let groups: BTreeSet<String> =
                vm.security_groups.iter().map(|g| g.name.clone()).collect();
            d.set("security_group_names", groups);
        }

        d.set("tags", tags::to_map(&vm.tags));

        resolver::set_value_or_id(
            d,
            "service_offering",
            &vm.service_offering_name,
            &vm.service_offering_id,
        );
        resolver::set_value_or_id(d, "template", &vm.template_name, &vm.template_id);
        resolver::set_value_or_id(d, "project", &vm.project, &vm.project_id);
        resolver::set_value_or_id(d, "zone", &vm.zone_name, &vm.zone_id);

        Ok(())
    }

    async fn update(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        schema::validate(Self::type_name(), SCHEMA, d)?;

        let id = d.require_id()?.to_string();
        let name = d.get_str("name").to_string();

        if d.has_change("display_name") {
            debug!(%name, "display name changed, starting update");
            let params = UpdateInstanceParams {
                id: id.clone(),
                display_name: Some(d.get_str("display_name").to_string()),
                ..Default::default()
            };
            api.vms
                .update(&params)
                .await
                .ctx_with(|| format!("updating the display name for instance {name}"))?;
        }

        if d.has_change("group") {
            debug!(%name, "group changed, starting update");
            let params = UpdateInstanceParams {
                id: id.clone(),
                group: Some(d.get_str("group").to_string()),
                ..Default::default()
            };
            api.vms
                .update(&params)
                .await
                .ctx_with(|| format!("updating the group for instance {name}"))?;
        }

        if STOP_REQUIRED_FIELDS.iter().any(|f| d.has_change(f)) {
            // These attributes only change while the instance is stopped;
            // a failure below leaves it stopped, nothing is rolled back.
            api.vms
                .stop(&id)
                .await
                .ctx_with(|| format!("stopping instance {name} before making changes"))?;

            if d.has_change("name") {
                debug!(id = %id, new_name = %name, "name changed, starting update");
                let params = UpdateInstanceParams {
                    id: id.clone(),
                    name: Some(name.clone()),
                    ..Default::default()
                };
                api.vms
                    .update(&params)
                    .await
                    .ctx_with(|| format!("updating the name for instance {name}"))?;
            }

            if d.has_change("service_offering") {
                debug!(%name, "service offering changed, starting update");
                let offering_id = resolver::resolve_id(
                    api,
                    IdKind::ServiceOffering,
                    d.get_str("service_offering"),
                )
                .await?;
                api.vms
                    .change_service_offering(&id, &offering_id)
                    .await
                    .ctx_with(|| {
                        format!("changing the service offering for instance {name}")
                    })?;
            }

            if d.has_change("affinity_group_ids") {
                let groups: Vec<String> = d
                    .get_set("affinity_group_ids")
                    .map(|s| s.iter().cloned().collect())
                    .unwrap_or_default();
                api.affinity_groups
                    .update_vm_groups(&id, Some(&groups), None)
                    .await
                    .ctx_with(|| format!("updating the affinity groups for instance {name}"))?;
            }

            if d.has_change("affinity_group_names") {
                let groups: Vec<String> = d
                    .get_set("affinity_group_names")
                    .map(|s| s.iter().cloned().collect())
                    .unwrap_or_default();
                api.affinity_groups
                    .update_vm_groups(&id, None, Some(&groups))
                    .await
                    .ctx_with(|| format!("updating the affinity groups for instance {name}"))?;
            }

            if d.has_change("keypair") || d.has_change("keypairs") {
                debug!(%name, "SSH keypair(s) changed, starting update");
                let params = ResetSshKeyParams {
                    id: id.clone(),
                    keypair: d.get_str_ok("keypair").map(str::to_string),
                    keypairs: d.get_list("keypairs").cloned(),
                    project_id: resolver::project_id_of(api, d).await?,
                };
                api.vms
                    .reset_ssh_key(&params)
                    .await
                    .ctx_with(|| format!("changing the SSH keypair(s) for instance {name}"))?;
            }

            if d.has_change("user_data") {
                debug!(%name, "user data changed, starting update");
                let params = UpdateInstanceParams {
                    id: id.clone(),
                    user_data: Some(normalize_user_data(d.get_str("user_data"))),
                    ..Default::default()
                };
                api.vms
                    .update(&params)
                    .await
                    .ctx_with(|| format!("updating user data for instance {name}"))?;
            }

            api.vms
                .start(&id)
                .await
                .ctx_with(|| format!("starting instance {name} after making changes"))?;
        }

        if d.has_change("tags") {
            tags::update_tags(api, TAG_TYPE, &id, d)
                .await
                .ctx_with(|| format!("updating tags on instance {name}"))?;
        }

        if d.has_change("details") {
            let params = UpdateInstanceParams {
                id: id.clone(),
                details: Some(d.get_map("details").cloned().unwrap_or_default()),
                ..Default::default()
            };
            api.vms
                .update(&params)
                .await
                .ctx_with(|| format!("updating details for instance {name}"))?;
        }

        Self::read(api, d).await
    }

    async fn delete(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        let id = d.require_id()?.to_string();

        info!(name = d.get_str("name"), "destroying instance");
        if let Err(err) = api.vms.destroy(&id, d.get_bool("expunge")).await {
            // Destroying an instance that is already gone is a no-op.
            if entity_gone(&err, &id) {
                return Ok(());
            }
            return Err(err.ctx(format!("destroying instance {}", d.get_str("name"))));
        }

        Ok(())
    }

    async fn import(api: &CloudApi, id: &str) -> Result<ResourceData> {
        let mut d = ResourceData::import(id);
        // An imported instance is assumed to be running already.
        d.set("start_vm", true);
        Self::read(api, &mut d).await?;
        Ok(d)
    }
}

/// The platform expects user data as base64; values that are not already
/// valid base64 are encoded before sending.
fn normalize_user_data(user_data: &str) -> String {
    if BASE64.decode(user_data).is_ok() {
        user_data.to_string()
    } else {
        BASE64.encode(user_data)
    }
}
