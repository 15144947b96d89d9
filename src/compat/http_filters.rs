//! HTTP filter chain translation.
//!
//! Legacy documents carry an ordered list of named HTTP filters, each with
//! an opaque type-specific sub-document. The translator does not interpret
//! those payloads: it re-wraps each one in the canonical deprecated-config
//! envelope and preserves list order, which is the filter execution order.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::document::Object;
use crate::errors::{Error, Result};

/// Canonical envelope for an uninterpreted legacy filter payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeprecatedFilterConfig {
    /// Marks the payload as carried over from the legacy format.
    pub deprecated_v1: bool,
    /// The original sub-document, verbatim.
    pub value: Value,
}

/// Canonical HTTP filter chain entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpFilterEntry {
    pub name: String,
    /// The legacy filter placement tag (`decoder`, `encoder`, `both`),
    /// copied through uninterpreted.
    pub legacy_type: String,
    pub config: DeprecatedFilterConfig,
}

/// Translate the ordered legacy filter list into canonical entries.
pub fn translate_http_filters(entries: &[Object<'_>]) -> Result<Vec<HttpFilterEntry>> {
    entries.iter().map(translate_http_filter).collect()
}

fn translate_http_filter(entry: &Object<'_>) -> Result<HttpFilterEntry> {
    let name = entry.get_str("name")?.to_string();
    let legacy_type = entry.get_str("type")?.to_string();

    let payload = entry.raw("config").ok_or_else(|| Error::missing_field(entry.scope("config")))?;
    if !payload.is_object() {
        return Err(Error::type_mismatch(entry.scope("config"), "object"));
    }

    // Schema validation has already pinned the payload to an object, so a
    // parse failure here is an invariant violation, not operator error.
    let wrapper = json!({ "deprecated_v1": true, "value": payload });
    let config: DeprecatedFilterConfig = serde_json::from_value(wrapper)
        .map_err(|err| Error::malformed_sub_config(name.as_str(), err.to_string()))?;

    Ok(HttpFilterEntry { name, legacy_type, config })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn objects(value: &Value) -> Vec<Object<'_>> {
        Object::from_value("http_connection_manager", value)
            .expect("object")
            .get_object_array("filters")
            .expect("filters array")
    }

    #[test]
    fn wraps_payload_verbatim() {
        let doc = json!({
            "filters": [
                { "name": "router", "type": "decoder", "config": { "dynamic_stats": true } }
            ]
        });
        let entries = translate_http_filters(&objects(&doc)).expect("translate");

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "router");
        assert_eq!(entries[0].legacy_type, "decoder");
        assert!(entries[0].config.deprecated_v1);
        assert_eq!(entries[0].config.value, json!({ "dynamic_stats": true }));
    }

    #[test]
    fn preserves_list_order() {
        let doc = json!({
            "filters": [
                { "name": "buffer", "type": "decoder", "config": {} },
                { "name": "rate_limit", "type": "decoder", "config": { "domain": "edge" } },
                { "name": "router", "type": "decoder", "config": {} }
            ]
        });
        let entries = translate_http_filters(&objects(&doc)).expect("translate");

        let names: Vec<&str> = entries.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, ["buffer", "rate_limit", "router"]);
    }

    #[test]
    fn empty_payload_object_is_legal() {
        let doc = json!({
            "filters": [{ "name": "health_check", "type": "both", "config": {} }]
        });
        let entries = translate_http_filters(&objects(&doc)).expect("translate");
        assert_eq!(entries[0].config.value, json!({}));
    }

    #[test]
    fn non_object_payload_is_fatal() {
        let doc = json!({
            "filters": [{ "name": "router", "type": "decoder", "config": "oops" }]
        });
        let err = translate_http_filters(&objects(&doc)).expect_err("payload must be object");
        assert!(matches!(err, Error::TypeMismatch { ref field, .. }
            if field == "http_connection_manager.filters[0].config"));
    }

    #[test]
    fn missing_name_is_fatal() {
        let doc = json!({
            "filters": [{ "type": "decoder", "config": {} }]
        });
        let err = translate_http_filters(&objects(&doc)).expect_err("name required");
        assert!(matches!(err, Error::MissingField { .. }));
    }

    #[test]
    fn nested_payload_survives_untouched() {
        let payload = json!({
            "routes": [{ "prefix": "/api", "weights": [1, 2, 3] }],
            "deprecated_v1": "a payload key that must not collide with the envelope"
        });
        let doc = json!({
            "filters": [{ "name": "custom", "type": "both", "config": payload }]
        });
        let entries = translate_http_filters(&objects(&doc)).expect("translate");
        assert_eq!(entries[0].config.value["deprecated_v1"],
            "a payload key that must not collide with the envelope");
        assert_eq!(entries[0].config.value["routes"][0]["prefix"], "/api");
    }
}
