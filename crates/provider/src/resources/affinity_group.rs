//! Affinity group resource handler

use async_trait::async_trait;
use nimbus_api::{entity_gone, CloudApi, CreateAffinityGroupParams};
use nimbus_common::error::ResultExt;
use nimbus_common::{FieldType, Result};
use tracing::debug;

use super::Resource;
use crate::data::ResourceData;
use crate::resolver;
use crate::schema::{self, FieldSchema};

static SCHEMA: &[FieldSchema] = &[
    FieldSchema::required("name", FieldType::String).force_new(),
    FieldSchema::computed("description", FieldType::String).force_new(),
    FieldSchema::required("type", FieldType::String).force_new(),
    FieldSchema::optional("project", FieldType::String).force_new(),
];

pub struct AffinityGroupResource;

#[async_trait]
impl Resource for AffinityGroupResource {
    fn type_name() -> &'static str {
        "nimbus_affinity_group"
    }

    fn schema() -> &'static [FieldSchema] {
        SCHEMA
    }

    async fn create(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        schema::validate(Self::type_name(), SCHEMA, d)?;

        let name = d.get_str("name").to_string();

        let params = CreateAffinityGroupParams {
            name: name.clone(),
            description: d.get_str_ok("description").unwrap_or(&name).to_string(),
            group_type: d.get_str("type").to_string(),
            project_id: resolver::project_id_of(api, d).await?,
        };

        debug!(%name, "creating affinity group");
        let group = api
            .affinity_groups
            .create(&params)
            .await
            .ctx_with(|| format!("creating affinity group {name}"))?;

        debug!(%name, "affinity group successfully created");
        d.set_id(&group.id);

        Self::read(api, d).await
    }

    async fn read(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        let id = d.require_id()?.to_string();

        debug!(name = d.get_str("name"), "retrieving affinity group");
        let Some(group) = api.affinity_groups.find(&id, d.get_str_ok("project")).await? else {
            debug!(name = d.get_str("name"), "affinity group no longer exists");
            d.clear_id();
            return Ok(());
        };

        d.set("name", group.name.as_str());
        d.set("description", group.description.as_str());
        d.set("type", group.group_type.as_str());

        Ok(())
    }

    async fn delete(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        let id = d.require_id()?.to_string();
        let project_id = resolver::project_id_of(api, d).await?;

        if let Err(err) = api
            .affinity_groups
            .delete(&id, project_id.as_deref())
            .await
        {
            // Deleting a group that is already gone is a no-op.
            if entity_gone(&err, &id) {
                return Ok(());
            }
            return Err(err.ctx(format!(
                "deleting affinity group {}",
                d.get_str("name")
            )));
        }

        Ok(())
    }
}
