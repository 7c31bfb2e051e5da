//! Resource configuration data
//!
//! A [`ResourceData`] is the flat typed field mapping one lifecycle
//! operation works on: the desired configuration, the prior state the host
//! framework diffed it against, the remote identity, and the connection
//! metadata side channel populated after an instance deploy.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use nimbus_common::{Error, Result, Value};

#[derive(Debug, Clone, Default)]
pub struct ResourceData {
    id: Option<String>,
    fields: HashMap<String, Value>,
    prior: HashMap<String, Value>,
    conn_info: HashMap<String, String>,
}

impl ResourceData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Data carrying only a remote identity, as handed to an import.
    pub fn import(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The remote identity, which must have been assigned already.
    pub fn require_id(&self) -> Result<&str> {
        self.id.as_deref().ok_or_else(|| Error::InvalidValue {
            field: "id".to_string(),
            reason: "resource has no remote identity".to_string(),
        })
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// Forget the remote identity. Reads call this when the remote entity
    /// no longer exists, signaling the host framework to recreate it.
    pub fn clear_id(&mut self) {
        self.id = None;
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The value for `key`, treating zero values as unset.
    pub fn get_ok(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_zero())
    }

    pub fn get_str(&self, key: &str) -> &str {
        self.get(key).and_then(Value::as_str).unwrap_or("")
    }

    pub fn get_str_ok(&self, key: &str) -> Option<&str> {
        self.get_ok(key).and_then(Value::as_str)
    }

    pub fn get_int(&self, key: &str) -> i64 {
        self.get(key).and_then(Value::as_int).unwrap_or(0)
    }

    pub fn get_int_ok(&self, key: &str) -> Option<i64> {
        self.get_ok(key).and_then(Value::as_int)
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    pub fn get_set(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.get_ok(key).and_then(Value::as_set)
    }

    pub fn get_list(&self, key: &str) -> Option<&Vec<String>> {
        self.get_ok(key).and_then(Value::as_list)
    }

    pub fn get_map(&self, key: &str) -> Option<&BTreeMap<String, String>> {
        self.get_ok(key).and_then(Value::as_map)
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.fields.insert(key.to_string(), value.into());
    }

    /// The value `key` held before this operation, if any.
    pub fn prior(&self, key: &str) -> Option<&Value> {
        self.prior.get(key)
    }

    /// Record the prior state the desired configuration is diffed against.
    pub fn set_prior(&mut self, key: &str, value: impl Into<Value>) {
        self.prior.insert(key.to_string(), value.into());
    }

    /// Whether `key` differs between the prior state and the desired
    /// configuration.
    pub fn has_change(&self, key: &str) -> bool {
        self.prior.get(key) != self.fields.get(key)
    }

    /// Connection metadata for downstream provisioning steps.
    pub fn set_conn_info(&mut self, key: &str, value: impl Into<String>) {
        self.conn_info.insert(key.to_string(), value.into());
    }

    pub fn conn_info(&self) -> &HashMap<String, String> {
        &self.conn_info
    }
}
