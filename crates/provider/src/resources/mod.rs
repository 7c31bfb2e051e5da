//! Resource lifecycle controllers
//!
//! One controller per Nimbus entity kind. Each implements the CRUD
//! operations against the remote API, with resource-specific field
//! mapping and, where needed, multi-step state transitions.

pub mod affinity_group;
pub mod disk;
pub mod instance;
pub mod network;
pub mod network_acl;
pub mod private_gateway;
pub mod security_group;
pub mod vpc;
pub mod vpn_customer_gateway;

use async_trait::async_trait;
use nimbus_api::CloudApi;
use nimbus_common::{Error, Result};

use crate::data::ResourceData;
use crate::schema::FieldSchema;

/// Trait for resource lifecycle operations
#[async_trait]
pub trait Resource {
    /// Resource type name
    fn type_name() -> &'static str;

    /// The declared configuration fields of this resource
    fn schema() -> &'static [FieldSchema];

    /// Create the remote entity and record its identity
    async fn create(api: &CloudApi, d: &mut ResourceData) -> Result<()>;

    /// Refresh the configuration from the remote entity. Clears the
    /// identity and succeeds when the entity no longer exists.
    async fn read(api: &CloudApi, d: &mut ResourceData) -> Result<()>;

    /// Apply changed fields in place. Resources without in-place updates
    /// keep this default; the host framework recreates them instead.
    async fn update(api: &CloudApi, d: &mut ResourceData) -> Result<()> {
        let _ = (api, d);
        Err(Error::Unsupported {
            resource: Self::type_name(),
            op: "update",
        })
    }

    /// Delete the remote entity. Deleting an entity that is already gone
    /// is a successful no-op.
    async fn delete(api: &CloudApi, d: &mut ResourceData) -> Result<()>;

    /// Populate the full configuration from a bare remote ID.
    async fn import(api: &CloudApi, id: &str) -> Result<ResourceData> {
        let mut d = ResourceData::import(id);
        Self::read(api, &mut d).await?;
        Ok(d)
    }
}
