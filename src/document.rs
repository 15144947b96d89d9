//! Read-only typed access to legacy JSON documents
//!
//! Legacy configuration arrives as loosely-typed JSON. This module wraps a
//! borrowed `serde_json` object with accessors that either return the value
//! at the requested type or fail with a typed error naming the full field
//! path. Defaultable accessors mirror the legacy loader's "absent means
//! default" convention.

use serde_json::{Map, Value};

use crate::errors::{Error, Result};

/// Borrowed view over one JSON object in a legacy document.
///
/// Carries a context label (e.g. `http_connection_manager.access_log[0]`)
/// that is extended on every descent, so errors name the exact field path.
#[derive(Debug, Clone)]
pub struct Object<'a> {
    context: String,
    fields: &'a Map<String, Value>,
}

impl<'a> Object<'a> {
    /// Wrap a JSON value that must be an object.
    pub fn from_value(context: impl Into<String>, value: &'a Value) -> Result<Self> {
        let context = context.into();
        match value.as_object() {
            Some(fields) => Ok(Self { context, fields }),
            None => Err(Error::type_mismatch(context, "object")),
        }
    }

    /// The context label of this object.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Full path of a field under this object, for error reporting.
    pub fn scope(&self, key: &str) -> String {
        format!("{}.{}", self.context, key)
    }

    /// Whether a field is present (regardless of its type).
    pub fn has(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Raw access to a field's JSON value, for opaque passthrough.
    pub fn raw(&self, key: &str) -> Option<&'a Value> {
        self.fields.get(key)
    }

    /// Required string field.
    pub fn get_str(&self, key: &str) -> Result<&'a str> {
        match self.fields.get(key) {
            Some(value) => {
                value.as_str().ok_or_else(|| Error::type_mismatch(self.scope(key), "string"))
            }
            None => Err(Error::missing_field(self.scope(key))),
        }
    }

    /// Optional string field.
    pub fn get_str_opt(&self, key: &str) -> Result<Option<&'a str>> {
        match self.fields.get(key) {
            Some(value) => value
                .as_str()
                .map(Some)
                .ok_or_else(|| Error::type_mismatch(self.scope(key), "string")),
            None => Ok(None),
        }
    }

    /// String field with a default for absence.
    pub fn get_str_or(&self, key: &str, default: &'a str) -> Result<&'a str> {
        Ok(self.get_str_opt(key)?.unwrap_or(default))
    }

    /// Required integer field.
    pub fn get_i64(&self, key: &str) -> Result<i64> {
        match self.fields.get(key) {
            Some(value) => {
                value.as_i64().ok_or_else(|| Error::type_mismatch(self.scope(key), "integer"))
            }
            None => Err(Error::missing_field(self.scope(key))),
        }
    }

    /// Optional integer field.
    pub fn get_i64_opt(&self, key: &str) -> Result<Option<i64>> {
        match self.fields.get(key) {
            Some(value) => value
                .as_i64()
                .map(Some)
                .ok_or_else(|| Error::type_mismatch(self.scope(key), "integer")),
            None => Ok(None),
        }
    }

    /// Optional boolean field.
    pub fn get_bool_opt(&self, key: &str) -> Result<Option<bool>> {
        match self.fields.get(key) {
            Some(value) => value
                .as_bool()
                .map(Some)
                .ok_or_else(|| Error::type_mismatch(self.scope(key), "boolean")),
            None => Ok(None),
        }
    }

    /// Boolean field with a default for absence.
    pub fn get_bool_or(&self, key: &str, default: bool) -> Result<bool> {
        Ok(self.get_bool_opt(key)?.unwrap_or(default))
    }

    /// Required object field.
    pub fn get_object(&self, key: &str) -> Result<Object<'a>> {
        match self.get_object_opt(key)? {
            Some(object) => Ok(object),
            None => Err(Error::missing_field(self.scope(key))),
        }
    }

    /// Optional object field.
    pub fn get_object_opt(&self, key: &str) -> Result<Option<Object<'a>>> {
        match self.fields.get(key) {
            Some(value) => Object::from_value(self.scope(key), value).map(Some),
            None => Ok(None),
        }
    }

    /// Required array-of-objects field; element contexts are indexed.
    pub fn get_object_array(&self, key: &str) -> Result<Vec<Object<'a>>> {
        match self.fields.get(key) {
            Some(value) => self.object_elements(key, value),
            None => Err(Error::missing_field(self.scope(key))),
        }
    }

    /// Array-of-objects field, absent meaning empty.
    pub fn get_object_array_or_empty(&self, key: &str) -> Result<Vec<Object<'a>>> {
        match self.fields.get(key) {
            Some(value) => self.object_elements(key, value),
            None => Ok(Vec::new()),
        }
    }

    /// Array-of-strings field, absent meaning empty.
    pub fn get_string_array_or_empty(&self, key: &str) -> Result<Vec<String>> {
        let items = match self.fields.get(key) {
            Some(value) => {
                value.as_array().ok_or_else(|| Error::type_mismatch(self.scope(key), "array"))?
            }
            None => return Ok(Vec::new()),
        };

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    Error::type_mismatch(format!("{}[{}]", self.scope(key), index), "string")
                })
            })
            .collect()
    }

    fn object_elements(&self, key: &str, value: &'a Value) -> Result<Vec<Object<'a>>> {
        let items =
            value.as_array().ok_or_else(|| Error::type_mismatch(self.scope(key), "array"))?;

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                Object::from_value(format!("{}[{}]", self.scope(key), index), item)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn required_accessors_report_full_path() {
        let doc = json!({ "stat_prefix": "ingress_http" });
        let object = Object::from_value("http_connection_manager", &doc).expect("object");

        assert_eq!(object.get_str("stat_prefix").expect("string"), "ingress_http");

        let err = object.get_str("codec_type").expect_err("absent field");
        assert!(matches!(err, Error::MissingField { ref field }
            if field == "http_connection_manager.codec_type"));
    }

    #[test]
    fn wrong_type_is_reported_not_coerced() {
        let doc = json!({ "value": "five" });
        let object = Object::from_value("filter", &doc).expect("object");

        let err = object.get_i64("value").expect_err("string is not integer");
        assert!(matches!(err, Error::TypeMismatch { ref field, ref expected }
            if field == "filter.value" && expected == "integer"));
    }

    #[test]
    fn defaultable_accessors_only_default_on_absence() {
        let doc = json!({ "use_remote_address": true });
        let object = Object::from_value("cfg", &doc).expect("object");

        assert!(object.get_bool_or("use_remote_address", false).expect("present"));
        assert!(!object.get_bool_or("add_user_agent", false).expect("absent"));
        assert_eq!(object.get_str_or("runtime_key", "").expect("absent"), "");
    }

    #[test]
    fn array_elements_get_indexed_contexts() {
        let doc = json!({ "filters": [{ "type": "runtime" }, 42] });
        let object = Object::from_value("root", &doc).expect("object");

        let err = object.get_object_array("filters").expect_err("non-object element");
        assert!(matches!(err, Error::TypeMismatch { ref field, .. }
            if field == "root.filters[1]"));
    }

    #[test]
    fn string_array_defaults_to_empty() {
        let doc = json!({});
        let object = Object::from_value("root", &doc).expect("object");
        assert!(object.get_string_array_or_empty("headers").expect("absent").is_empty());
    }

    #[test]
    fn non_object_value_is_rejected() {
        let doc = json!([1, 2, 3]);
        let err = Object::from_value("root", &doc).expect_err("array is not object");
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }
}
