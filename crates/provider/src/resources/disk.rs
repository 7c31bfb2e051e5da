//! Disk resource handler

use async_trait::async_trait;
use nimbus_api::{entity_gone, CloudApi, CreateVolumeParams, ResizeVolumeParams};
use nimbus_common::error::ResultExt;
use nimbus_common::{FieldType, Result};
use tracing::{debug, info};

use super::Resource;
use crate::data::ResourceData;
use crate::resolver::{self, IdKind};
use crate::retry::retry;
use crate::schema::{self, FieldSchema};
use crate::tags;

/// Remote tag type for volumes.
const TAG_TYPE: &str = "Volume";

/// The platform briefly locks an instance during concurrent operations
/// and rejects attach calls meanwhile.
const ATTACH_ATTEMPTS: u32 = 10;

static SCHEMA: &[FieldSchema] = &[
    FieldSchema::required("name", FieldType::String).force_new(),
    FieldSchema::computed("attach", FieldType::Bool),
    FieldSchema::computed("device_id", FieldType::Int),
    FieldSchema::optional("disk_offering", FieldType::String),
    FieldSchema::computed("size", FieldType::Int),
    FieldSchema::optional("shrink_ok", FieldType::Bool),
    FieldSchema::computed("virtual_machine_id", FieldType::String),
    FieldSchema::computed("project", FieldType::String).force_new(),
    FieldSchema::required("zone", FieldType::String).force_new(),
    FieldSchema::optional("reattach_on_change", FieldType::Bool),
    FieldSchema::optional("tags", FieldType::StringMap),
];

pub struct DiskResource;

#[async_trait]
impl Resource for DiskResource {
    fn type_name() -> &'static str {
        "nimbus_disk"
    }

    fn schema() -> &'static [FieldSchema] {
        SCHEMA
    }

    async fn create(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        schema::validate(Self::type_name(), SCHEMA, d)?;

        let name = d.get_str("name").to_string();

        let disk_offering_id =
            resolver::resolve_id(api, IdKind::DiskOffering, d.get_str("disk_offering")).await?;
        let zone_id = resolver::resolve_id(api, IdKind::Zone, d.get_str("zone")).await?;

        let mut params = CreateVolumeParams {
            name: name.clone(),
            disk_offering_id,
            zone_id,
            ..Default::default()
        };
        if let Some(size) = d.get_int_ok("size") {
            params.size = Some(size);
        }
        params.project_id = resolver::project_id_of(api, d).await?;

        info!(%name, "creating volume");
        let volume = api
            .volumes
            .create(&params)
            .await
            .ctx_with(|| format!("creating the new disk {name}"))?;

        d.set_id(&volume.id);

        tags::set_tags(api, TAG_TYPE, &volume.id, d)
            .await
            .ctx_with(|| format!("setting tags on the new disk {name}"))?;

        if d.get_bool("attach") {
            attach(api, d)
                .await
                .ctx_with(|| format!("attaching the new disk {name} to virtual machine"))?;
        }

        Self::read(api, d).await
    }

    async fn read(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        let id = d.require_id()?.to_string();

        let Some(volume) = api.volumes.find(&id, d.get_str_ok("project")).await? else {
            debug!(name = d.get_str("name"), "volume no longer exists");
            d.clear_id();
            return Ok(());
        };

        d.set("name", volume.name.as_str());
        // A non-empty virtual machine ID means the volume is attached.
        d.set("attach", !volume.virtual_machine_id.is_empty());
        d.set("size", volume.size >> 30);
        d.set("tags", tags::to_map(&volume.tags));

        resolver::set_value_or_id(
            d,
            "disk_offering",
            &volume.disk_offering_name,
            &volume.disk_offering_id,
        );
        resolver::set_value_or_id(d, "project", &volume.project, &volume.project_id);
        resolver::set_value_or_id(d, "zone", &volume.zone_name, &volume.zone_id);

        if !volume.virtual_machine_id.is_empty() {
            d.set("device_id", volume.device_id);
            d.set("virtual_machine_id", volume.virtual_machine_id.as_str());
        }

        Ok(())
    }

    async fn update(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        schema::validate(Self::type_name(), SCHEMA, d)?;

        let name = d.get_str("name").to_string();

        if d.has_change("disk_offering") || d.has_change("size") {
            if d.get_bool("reattach_on_change") {
                // Re-attach happens at the end of this function.
                detach(api, d)
                    .await
                    .ctx_with(|| format!("detaching disk {name} from virtual machine"))?;
            }

            let disk_offering_id =
                resolver::resolve_id(api, IdKind::DiskOffering, d.get_str("disk_offering")).await?;

            let mut params = ResizeVolumeParams {
                id: d.require_id()?.to_string(),
                disk_offering_id,
                shrink_ok: d.get_bool("shrink_ok"),
                ..Default::default()
            };
            if d.has_change("size") {
                params.size = Some(d.get_int("size"));
            }

            let volume = api
                .volumes
                .resize(&params)
                .await
                .ctx_with(|| format!("changing disk offering/size for disk {name}"))?;

            d.set_id(&volume.id);
        }

        // A different device or target instance needs a detach first; the
        // re-attach below picks up the new placement.
        if d.has_change("device_id") || d.has_change("virtual_machine_id") {
            detach(api, d)
                .await
                .ctx_with(|| format!("detaching disk {name} from virtual machine"))?;
        }

        if d.get_bool("attach") {
            attach(api, d)
                .await
                .ctx_with(|| format!("attaching disk {name} to virtual machine"))?;
        } else {
            detach(api, d)
                .await
                .ctx_with(|| format!("detaching disk {name} from virtual machine"))?;
        }

        if d.has_change("tags") {
            tags::update_tags(api, TAG_TYPE, d.require_id()?, d)
                .await
                .ctx_with(|| format!("updating tags on disk {name}"))?;
        }

        Self::read(api, d).await
    }

    async fn delete(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        detach(api, d).await?;

        let id = d.require_id()?.to_string();
        info!(name = d.get_str("name"), "deleting volume");
        if let Err(err) = api.volumes.delete(&id).await {
            // Deleting a volume that is already gone is a no-op.
            if entity_gone(&err, &id) {
                return Ok(());
            }
            return Err(err);
        }

        Ok(())
    }
}

/// Attach the volume to its configured instance, unless it is attached
/// already. Attach calls race other operations on the instance and are
/// retried within a fixed budget.
async fn attach(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
    let Some(vm_id) = d.get_str_ok("virtual_machine_id").map(str::to_string) else {
        return Ok(());
    };

    if is_attached(api, d).await? {
        return Ok(());
    }

    let id = d.require_id()?.to_string();
    let device_id = d.get_int_ok("device_id");

    let volume = retry(ATTACH_ATTEMPTS, || {
        api.volumes.attach(&id, &vm_id, device_id)
    })
    .await?;

    d.set_id(&volume.id);
    Ok(())
}

/// Detach the volume if it is attached; a no-op otherwise. When the
/// hypervisor refuses a live detach the owning instance is stopped,
/// the detach retried, and the instance started again.
async fn detach(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
    if !is_attached(api, d).await? {
        return Ok(());
    }

    let id = d.require_id()?.to_string();

    match api.volumes.detach(&id).await {
        Ok(()) => Ok(()),
        Err(err) => {
            let Some(vm_id) = d.get_str_ok("virtual_machine_id").map(str::to_string) else {
                return Err(err);
            };

            debug!(volume = %id, instance = %vm_id, "live detach failed, stopping the instance");
            api.vms.stop(&vm_id).await?;
            api.volumes.detach(&id).await?;
            api.vms.start(&vm_id).await?;
            Ok(())
        }
    }
}

async fn is_attached(api: &CloudApi, d: &ResourceData) -> Result<bool> {
    let id = d.require_id()?;
    let volume = api.volumes.find(id, d.get_str_ok("project")).await?;
    Ok(volume.is_some_and(|v| !v.virtual_machine_id.is_empty()))
}
