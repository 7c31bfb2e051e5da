//! Security group resource handler

use async_trait::async_trait;
use nimbus_api::{entity_gone, CloudApi, CreateSecurityGroupParams};
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
    FieldSchema::computed("project", FieldType::String).force_new(),
];

pub struct SecurityGroupResource;

#[async_trait]
impl Resource for SecurityGroupResource {
    fn type_name() -> &'static str {
        "nimbus_security_group"
    }

    fn schema() -> &'static [FieldSchema] {
        SCHEMA
    }

    async fn create(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        schema::validate(Self::type_name(), SCHEMA, d)?;

        let name = d.get_str("name").to_string();

        let params = CreateSecurityGroupParams {
            name: name.clone(),
            description: d.get_str_ok("description").unwrap_or(&name).to_string(),
            project_id: resolver::project_id_of(api, d).await?,
        };

        let group = api
            .security_groups
            .create(&params)
            .await
            .ctx_with(|| format!("creating security group {name}"))?;

        d.set_id(&group.id);

        Self::read(api, d).await
    }

    async fn read(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        let id = d.require_id()?.to_string();

        let Some(group) = api.security_groups.find(&id, d.get_str_ok("project")).await? else {
            debug!(name = d.get_str("name"), "security group no longer exists");
            d.clear_id();
            return Ok(());
        };

        d.set("name", group.name.as_str());
        d.set("description", group.description.as_str());

        resolver::set_value_or_id(d, "project", &group.project, &group.project_id);

        Ok(())
    }

    async fn delete(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        let id = d.require_id()?.to_string();
        let project_id = resolver::project_id_of(api, d).await?;

        if let Err(err) = api
            .security_groups
            .delete(&id, project_id.as_deref())
            .await
        {
            // Deleting a group that is already gone is a no-op.
            if entity_gone(&err, &id) {
                return Ok(());
            }
            return Err(err.ctx(format!(
                "deleting security group {}",
                d.get_str("name")
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use nimbus_common::Error;

    use super::*;
    use crate::fake::FakeCloud;

    #[tokio::test]
    async fn create_defaults_the_description_to_the_name() {
        let fake = Arc::new(FakeCloud::new());
        let api = fake.clone().api();

        let mut d = ResourceData::new();
        d.set("name", "web-sg");
        SecurityGroupResource::create(&api, &mut d).await.unwrap();

        let creates = fake.security_group_creates.lock().unwrap();
        assert_eq!(creates[0].description, "web-sg");
        drop(creates);
        assert_eq!(d.get_str("description"), "web-sg");
    }

    #[tokio::test]
    async fn update_is_not_supported() {
        let fake = Arc::new(FakeCloud::new());
        let api = fake.clone().api();

        let mut d = ResourceData::import("sg-1");
        let err = SecurityGroupResource::update(&api, &mut d).await.unwrap_err();
        assert!(matches!(err, Error::Unsupported { op: "update", .. }));
    }

    #[tokio::test]
    async fn delete_is_idempotent_for_a_gone_group() {
        let fake = Arc::new(FakeCloud::new());
        fake.fail(
            "deleteSecurityGroup",
            Error::Api {
                op: "deleteSecurityGroup".to_string(),
                code: 431,
                text: "Invalid parameter id value=sg-9 due to incorrect long value format, \
                       or entity does not exist"
                    .to_string(),
            },
        );
        let api = fake.clone().api();

        let mut d = ResourceData::import("sg-9");
        SecurityGroupResource::delete(&api, &mut d).await.unwrap();
    }
}
