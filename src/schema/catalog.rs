//! Named JSON Schema definitions for legacy document shapes.
//!
//! The catalog pins the structural contract of each legacy document kind:
//! which top-level fields exist, their JSON types, and which are required.
//! Token sets for enum-valued fields (codec type, tracing operation name,
//! client cert policy, access log filter discriminators) are deliberately
//! not constrained here: the translators check them and report the
//! offending token in the error.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde_json::{json, Value};

/// Schema name for the legacy HTTP connection manager network filter.
pub const HTTP_CONN_MANAGER: &str = "http_connection_manager";

pub(crate) static SCHEMAS: Lazy<HashMap<&'static str, Value>> =
    Lazy::new(|| HashMap::from([(HTTP_CONN_MANAGER, http_conn_manager_schema())]));

fn http_conn_manager_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "required": ["codec_type", "stat_prefix"],
        "properties": {
            "codec_type": { "type": "string" },
            "stat_prefix": { "type": "string", "minLength": 1 },
            "rds": { "type": "object" },
            "route_config": { "type": "object" },
            "filters": {
                "type": "array",
                "items": {
                    "type": "object",
                    "additionalProperties": false,
                    "required": ["name", "type", "config"],
                    "properties": {
                        "name": { "type": "string", "minLength": 1 },
                        "type": { "type": "string" },
                        "config": { "type": "object" }
                    }
                }
            },
            "add_user_agent": { "type": "boolean" },
            "tracing": {
                "type": "object",
                "additionalProperties": false,
                "required": ["operation_name"],
                "properties": {
                    "operation_name": { "type": "string" },
                    "request_headers_for_tags": {
                        "type": "array",
                        "items": { "type": "string" }
                    }
                }
            },
            "http1_settings": { "type": "object" },
            "http2_settings": { "type": "object" },
            "server_name": { "type": "string" },
            "idle_timeout_s": { "type": "integer", "minimum": 0 },
            "drain_timeout_ms": { "type": "integer", "minimum": 0 },
            "access_log": {
                "type": "array",
                "items": {
                    "type": "object",
                    "additionalProperties": false,
                    "required": ["path"],
                    "properties": {
                        "path": { "type": "string", "minLength": 1 },
                        "format": { "type": "string" },
                        "filter": { "type": "object" }
                    }
                }
            },
            "use_remote_address": { "type": "boolean" },
            "generate_request_id": { "type": "boolean" },
            "forward_client_cert": { "type": "string" },
            "set_current_client_cert_details": {
                "type": "array",
                "items": { "type": "string" }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_contains_connection_manager_schema() {
        let schema = SCHEMAS.get(HTTP_CONN_MANAGER).expect("schema registered");
        assert_eq!(schema.get("type"), Some(&json!("object")));
        assert!(schema.get("required").is_some());
    }

    #[test]
    fn enum_tokens_are_left_to_translators() {
        let schema = SCHEMAS.get(HTTP_CONN_MANAGER).expect("schema registered");
        let codec = &schema["properties"]["codec_type"];
        assert!(codec.get("enum").is_none());
    }
}
