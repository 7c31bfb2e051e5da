//! Network ACL list resource handler

use async_trait::async_trait;
use nimbus_api::{entity_gone, CloudApi, CreateAclListParams};
use nimbus_common::error::ResultExt;
use nimbus_common::{FieldType, Result};
use tracing::debug;

use super::Resource;
use crate::data::ResourceData;
use crate::retry::retry;
use crate::schema::{self, FieldSchema};

/// ACL list deletion races other operations on the same VPC.
const DELETE_ATTEMPTS: u32 = 3;

static SCHEMA: &[FieldSchema] = &[
    FieldSchema::required("name", FieldType::String).force_new(),
    FieldSchema::computed("description", FieldType::String).force_new(),
    FieldSchema::optional("project", FieldType::String).force_new(),
    FieldSchema::required("vpc_id", FieldType::String).force_new(),
];

pub struct NetworkAclResource;

#[async_trait]
impl Resource for NetworkAclResource {
    fn type_name() -> &'static str {
        "nimbus_network_acl"
    }

    fn schema() -> &'static [FieldSchema] {
        SCHEMA
    }

    async fn create(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        schema::validate(Self::type_name(), SCHEMA, d)?;

        let name = d.get_str("name").to_string();

        let params = CreateAclListParams {
            name: name.clone(),
            description: d.get_str_ok("description").unwrap_or(&name).to_string(),
            vpc_id: d.get_str("vpc_id").to_string(),
        };

        let acl = api
            .acls
            .create(&params)
            .await
            .ctx_with(|| format!("creating network ACL list {name}"))?;

        d.set_id(&acl.id);

        Self::read(api, d).await
    }

    async fn read(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        let id = d.require_id()?.to_string();

        let Some(acl) = api.acls.find(&id, d.get_str_ok("project")).await? else {
            debug!(name = d.get_str("name"), "network ACL list no longer exists");
            d.clear_id();
            return Ok(());
        };

        d.set("name", acl.name.as_str());
        d.set("description", acl.description.as_str());
        d.set("vpc_id", acl.vpc_id.as_str());

        Ok(())
    }

    async fn delete(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        let id = d.require_id()?.to_string();

        let result = retry(DELETE_ATTEMPTS, || api.acls.delete(&id)).await;
        if let Err(err) = result {
            // Deleting an ACL list that is already gone is a no-op.
            if entity_gone(&err, &id) {
                return Ok(());
            }
            return Err(err.ctx(format!(
                "deleting network ACL list {}",
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

    fn locked_error() -> Error {
        Error::Api {
            op: "deleteNetworkAclList".to_string(),
            code: 431,
            text: "cannot delete while an operation is in progress".to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn delete_retries_through_a_transient_lock() {
        let fake = Arc::new(FakeCloud::new());
        fake.fail_times("deleteNetworkAclList", 2, locked_error);
        let api = fake.clone().api();

        let mut d = ResourceData::import("acl-1");
        NetworkAclResource::delete(&api, &mut d).await.unwrap();

        assert_eq!(
            fake.calls()
                .iter()
                .filter(|c| *c == "deleteNetworkAclList")
                .count(),
            3
        );
    }

    #[tokio::test(start_paused = true)]
    async fn delete_does_not_exceed_the_attempt_budget() {
        let fake = Arc::new(FakeCloud::new());
        fake.fail_times("deleteNetworkAclList", 10, locked_error);
        let api = fake.clone().api();

        let mut d = ResourceData::import("acl-1");
        NetworkAclResource::delete(&api, &mut d).await.unwrap_err();

        assert_eq!(
            fake.calls()
                .iter()
                .filter(|c| *c == "deleteNetworkAclList")
                .count(),
            DELETE_ATTEMPTS as usize
        );
    }

    #[tokio::test(start_paused = true)]
    async fn delete_is_idempotent_after_exhausting_retries_on_a_gone_list() {
        let fake = Arc::new(FakeCloud::new());
        fake.fail_times("deleteNetworkAclList", DELETE_ATTEMPTS as usize, || {
            Error::Api {
                op: "deleteNetworkAclList".to_string(),
                code: 431,
                text: "Invalid parameter id value=acl-9 due to incorrect long value format, \
                       or entity does not exist"
                    .to_string(),
            }
        });
        let api = fake.clone().api();

        let mut d = ResourceData::import("acl-9");
        NetworkAclResource::delete(&api, &mut d).await.unwrap();
    }

    #[tokio::test]
    async fn create_reads_back_the_vpc_binding() {
        let fake = Arc::new(FakeCloud::new());
        let api = fake.clone().api();

        let mut d = ResourceData::new();
        d.set("name", "web-acl");
        d.set("vpc_id", "vpc-1");
        NetworkAclResource::create(&api, &mut d).await.unwrap();

        assert!(d.id().is_some());
        assert_eq!(d.get_str("vpc_id"), "vpc-1");
        assert_eq!(d.get_str("description"), "web-acl");
    }
}
