//! Resource schema metadata and configuration validation
//!
//! Every resource declares a static field table: type, whether the caller
//! must supply it, whether a change forces recreation, and which other
//! fields it conflicts with. Validation runs before any remote call and
//! reports every conflicting pair it finds, not just the first.

use nimbus_common::{Error, FieldType, Result};

use crate::data::ResourceData;

/// Declaration of one configuration field.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub name: &'static str,
    pub ty: FieldType,
    /// The caller must supply this field.
    pub required: bool,
    /// The remote API may assign or refine this field.
    pub computed: bool,
    /// A change to this field requires recreating the entity.
    pub force_new: bool,
    pub conflicts_with: &'static [&'static str],
}

impl FieldSchema {
    pub const fn required(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            required: true,
            computed: false,
            force_new: false,
            conflicts_with: &[],
        }
    }

    pub const fn optional(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            required: false,
            computed: false,
            force_new: false,
            conflicts_with: &[],
        }
    }

    /// Optional and filled in from the remote entity when not supplied.
    pub const fn computed(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            required: false,
            computed: true,
            force_new: false,
            conflicts_with: &[],
        }
    }

    pub const fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub const fn conflicts(mut self, fields: &'static [&'static str]) -> Self {
        self.conflicts_with = fields;
        self
    }
}

/// Validate a configuration against its schema.
///
/// Checks required fields, value types, and mutual exclusivity. Runs
/// before any remote request is built.
pub fn validate(
    resource: &'static str,
    schema: &'static [FieldSchema],
    data: &ResourceData,
) -> Result<()> {
    let mut conflicts: Vec<(&'static str, &'static str)> = Vec::new();

    for field in schema {
        match data.get(field.name) {
            Some(value) => {
                if !value.matches(field.ty) {
                    return Err(Error::InvalidValue {
                        field: field.name.to_string(),
                        reason: format!("expected a {:?} value", field.ty),
                    });
                }
            }
            None if field.required => {
                return Err(Error::MissingField {
                    resource,
                    field: field.name,
                });
            }
            None => {}
        }

        if data.get_ok(field.name).is_none() {
            continue;
        }
        for &other in field.conflicts_with {
            if data.get_ok(other).is_some() && !conflicts.contains(&(other, field.name)) {
                conflicts.push((field.name, other));
            }
        }
    }

    if !conflicts.is_empty() {
        return Err(Error::ConflictingFields {
            resource,
            pairs: conflicts,
        });
    }

    Ok(())
}
