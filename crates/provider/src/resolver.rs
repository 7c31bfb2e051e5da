//! Name-to-ID resolution for dependent references
//!
//! Configuration fields referencing another entity (offerings, zones,
//! templates, projects) accept either a human-readable name or an already
//! resolved ID. The write path resolves everything to IDs before building
//! a request; the read path writes back whichever form the configuration
//! used.

use nimbus_api::CloudApi;
use nimbus_common::{Error, Result};
use uuid::Uuid;

use crate::data::ResourceData;

/// Categories whose names can be resolved to IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Zone,
    ServiceOffering,
    DiskOffering,
    NetworkOffering,
    VpcOffering,
    Project,
}

impl IdKind {
    fn name(self) -> &'static str {
        match self {
            IdKind::Zone => "zone",
            IdKind::ServiceOffering => "service_offering",
            IdKind::DiskOffering => "disk_offering",
            IdKind::NetworkOffering => "network_offering",
            IdKind::VpcOffering => "vpc_offering",
            IdKind::Project => "project",
        }
    }
}

/// Whether a value is already a resolved Nimbus ID.
pub fn is_id(value: &str) -> bool {
    Uuid::parse_str(value).is_ok()
}

/// Resolve a name-or-ID value to an ID for the given category.
pub async fn resolve_id(api: &CloudApi, kind: IdKind, value: &str) -> Result<String> {
    if is_id(value) {
        return Ok(value.to_string());
    }

    let ids: Vec<String> = match kind {
        IdKind::Zone => api
            .zones
            .list_by_name(value)
            .await?
            .into_iter()
            .filter(|z| z.name.eq_ignore_ascii_case(value))
            .map(|z| z.id)
            .collect(),
        IdKind::ServiceOffering => api
            .service_offerings
            .list_by_name(value)
            .await?
            .into_iter()
            .filter(|o| o.name.eq_ignore_ascii_case(value))
            .map(|o| o.id)
            .collect(),
        IdKind::DiskOffering => api
            .disk_offerings
            .list_by_name(value)
            .await?
            .into_iter()
            .filter(|o| o.name.eq_ignore_ascii_case(value))
            .map(|o| o.id)
            .collect(),
        IdKind::NetworkOffering => api
            .network_offerings
            .list_by_name(value)
            .await?
            .into_iter()
            .filter(|o| o.name.eq_ignore_ascii_case(value))
            .map(|o| o.id)
            .collect(),
        IdKind::VpcOffering => api
            .vpc_offerings
            .list_by_name(value)
            .await?
            .into_iter()
            .filter(|o| o.name.eq_ignore_ascii_case(value))
            .map(|o| o.id)
            .collect(),
        IdKind::Project => api
            .projects
            .list_by_name(value)
            .await?
            .into_iter()
            .filter(|p| p.name.eq_ignore_ascii_case(value))
            .map(|p| p.id)
            .collect(),
    };

    pick(kind.name(), value, ids)
}

/// Resolve a template name-or-ID, scoped to a zone.
pub async fn resolve_template_id(api: &CloudApi, zone_id: &str, value: &str) -> Result<String> {
    if is_id(value) {
        return Ok(value.to_string());
    }

    let ids: Vec<String> = api
        .templates
        .list_by_name(zone_id, value)
        .await?
        .into_iter()
        .filter(|t| t.name.eq_ignore_ascii_case(value))
        .map(|t| t.id)
        .collect();

    pick("template", value, ids)
}

/// The resolved project ID for a configuration, when one is set.
pub async fn project_id_of(api: &CloudApi, d: &ResourceData) -> Result<Option<String>> {
    match d.get_str_ok("project") {
        Some(project) => Ok(Some(resolve_id(api, IdKind::Project, project).await?)),
        None => Ok(None),
    }
}

/// Write back either the entity name or its ID, preserving the form the
/// configuration already uses. A configuration holding an ID keeps the ID;
/// otherwise the name is preferred, falling back to the ID when the remote
/// reports no name.
pub fn set_value_or_id(d: &mut ResourceData, key: &str, name: &str, id: &str) {
    if is_id(d.get_str(key)) || name.is_empty() {
        d.set(key, id);
    } else {
        d.set(key, name);
    }
}

fn pick(kind: &'static str, name: &str, mut ids: Vec<String>) -> Result<String> {
    match ids.len() {
        0 => Err(Error::NotFound {
            kind,
            name: name.to_string(),
        }),
        1 => Ok(ids.remove(0)),
        count => Err(Error::AmbiguousName {
            kind,
            name: name.to_string(),
            count,
        }),
    }
}
