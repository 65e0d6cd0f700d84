//! Actions: the typed units a pipeline instance is made of.
//!
//! An action carries a `type` discriminant and an opaque payload. Nothing in
//! this crate looks inside the payload; validation is purely structural and
//! keyed on the type tag alone.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single pipeline action.
///
/// Serializes as `{ "type": ..., "payload": ... }`. Any further top-level
/// fields a domain attaches are kept in [`Action::extra`] in their original
/// order, so an action survives a JSON round trip untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Discriminant tag matched against `ContractStep::action_type`.
    #[serde(rename = "type")]
    pub action_type: String,
    /// Domain-defined data, never examined.
    #[serde(default)]
    pub payload: Value,
    /// Additional domain fields.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl Action {
    /// Create an action of the given type with a null payload.
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            payload: Value::Null,
            extra: IndexMap::new(),
        }
    }

    /// Set the payload.
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }

    /// Attach an extra top-level field.
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.extra.insert(name.into(), value);
        self
    }

    /// Decode an ordered action sequence from a JSON array.
    pub fn list_from_json(json: &str) -> Result<Vec<Action>, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Decode a single action from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_builder() {
        let action = Action::new("write")
            .with_payload(json!({"component": "Button"}))
            .with_field("origin", json!("tool"));

        assert_eq!(action.action_type, "write");
        assert_eq!(action.payload["component"], "Button");
        assert_eq!(action.extra.get("origin"), Some(&json!("tool")));
    }

    #[test]
    fn test_action_json_uses_type_key() {
        let action = Action::new("init").with_payload(json!({}));
        let value: Value = serde_json::from_str(&action.to_json().unwrap()).unwrap();

        assert_eq!(value, json!({"type": "init", "payload": {}}));
    }

    #[test]
    fn test_missing_payload_defaults_to_null() {
        let action = Action::from_json(r#"{"type": "verify"}"#).unwrap();
        assert_eq!(action.payload, Value::Null);
        assert!(action.extra.is_empty());
    }

    #[test]
    fn test_extra_fields_are_preserved_in_order() {
        let json = r#"{"type":"a","payload":1,"zeta":true,"alpha":false}"#;
        let action = Action::from_json(json).unwrap();

        let keys: Vec<&str> = action.extra.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
        assert_eq!(action.to_json().unwrap(), json);
    }

    #[test]
    fn test_missing_type_is_rejected() {
        assert!(Action::from_json(r#"{"payload": {}}"#).is_err());
    }

    #[test]
    fn test_list_from_json() {
        let actions = Action::list_from_json(r#"[{"type":"a"},{"type":"b"}]"#).unwrap();
        let types: Vec<&str> = actions.iter().map(|a| a.action_type.as_str()).collect();
        assert_eq!(types, vec!["a", "b"]);
    }
}
