//! Remote error classification
//!
//! The platform reports a missing entity with one fixed wording, and uses
//! the very same wording when a concurrent operation holds a lock on the
//! entity. All string matching against that message lives behind
//! [`entity_gone`] so a change in the platform's wording surfaces in
//! exactly one place (and in the tests pinning it).

use nimbus_common::Error;

/// Whether `err` is the platform's "entity does not exist" response for
/// the given entity ID.
///
/// Compatibility risk: the platform emits this wording both for a truly
/// missing entity and for an entity briefly locked by another in-flight
/// operation. Callers on delete paths treat it as idempotent success;
/// callers on racy mutation paths retry instead.
pub fn entity_gone(err: &Error, id: &str) -> bool {
    match err.root() {
        Error::Api { text, .. } => text.contains(&format!(
            "Invalid parameter id value={id} due to incorrect long value format, \
             or entity does not exist"
        )),
        _ => false,
    }
}
