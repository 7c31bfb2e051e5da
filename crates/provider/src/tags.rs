//! Tag synchronization
//!
//! Tags are reconciled independently of other entity fields: the create
//! path applies the full desired mapping in one call, the update path
//! computes the symmetric difference against the prior mapping and issues
//! minimal delete/create calls.

use nimbus_api::{CloudApi, Tag};
use nimbus_common::{Result, TagMap, Value};
use tracing::debug;

use crate::data::ResourceData;

/// Apply the desired tags of a freshly created entity. Assumes no tags
/// exist remotely yet.
pub async fn set_tags(
    api: &CloudApi,
    resource_type: &str,
    id: &str,
    d: &ResourceData,
) -> Result<()> {
    let Some(tags) = d.get_map("tags") else {
        return Ok(());
    };
    api.tags.create(resource_type, id, tags).await
}

/// Reconcile the remote tags with the desired mapping, deleting what was
/// removed or changed and creating what is new or changed.
pub async fn update_tags(
    api: &CloudApi,
    resource_type: &str,
    id: &str,
    d: &ResourceData,
) -> Result<()> {
    let old = d
        .prior("tags")
        .and_then(Value::as_map)
        .cloned()
        .unwrap_or_default();
    let new = d.get_map("tags").cloned().unwrap_or_default();

    let (remove, create) = diff_tags(&old, &new);
    debug!(
        resource_type,
        id,
        removing = remove.len(),
        creating = create.len(),
        "reconciling tags"
    );

    if !remove.is_empty() {
        api.tags.delete(resource_type, id, &remove).await?;
    }
    if !create.is_empty() {
        api.tags.create(resource_type, id, &create).await?;
    }
    Ok(())
}

/// Tags present in `old` but absent or changed in `new` are removed; tags
/// present in `new` but absent or changed in `old` are created.
fn diff_tags(old: &TagMap, new: &TagMap) -> (TagMap, TagMap) {
    let remove = old
        .iter()
        .filter(|(k, v)| new.get(*k) != Some(v))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    let create = new
        .iter()
        .filter(|(k, v)| old.get(*k) != Some(v))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    (remove, create)
}

/// The tag list of a remote entity as a plain mapping.
pub fn to_map(tags: &[Tag]) -> TagMap {
    tags.iter()
        .map(|t| (t.key.clone(), t.value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag_map(entries: &[(&str, &str)]) -> TagMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn diff_is_the_symmetric_difference() {
        let old = tag_map(&[("env", "staging"), ("team", "core"), ("stale", "yes")]);
        let new = tag_map(&[("env", "prod"), ("team", "core"), ("fresh", "yes")]);

        let (remove, create) = diff_tags(&old, &new);
        assert_eq!(remove, tag_map(&[("env", "staging"), ("stale", "yes")]));
        assert_eq!(create, tag_map(&[("env", "prod"), ("fresh", "yes")]));
    }

    #[test]
    fn unchanged_mappings_produce_no_calls() {
        let tags = tag_map(&[("env", "prod")]);
        let (remove, create) = diff_tags(&tags, &tags);
        assert!(remove.is_empty());
        assert!(create.is_empty());
    }
}
