//! HTTP/1 and HTTP/2 protocol option translation.
//!
//! Both settings blocks are optional in the legacy format; every field
//! inside them is individually defaultable.

use serde::{Deserialize, Serialize};

use crate::document::Object;
use crate::errors::{Error, Result};

/// Canonical HTTP/1 protocol options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Http1Settings {
    /// Accept absolute URLs in request lines (proxy-style requests).
    #[serde(default)]
    pub allow_absolute_url: bool,
}

/// Canonical HTTP/2 protocol options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Http2Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hpack_table_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrent_streams: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_stream_window_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_connection_window_size: Option<u32>,
}

/// Translate a legacy `http1_settings` block.
pub fn translate_http1_settings(config: &Object<'_>) -> Result<Http1Settings> {
    Ok(Http1Settings { allow_absolute_url: config.get_bool_or("allow_absolute_url", false)? })
}

/// Translate a legacy `http2_settings` block.
pub fn translate_http2_settings(config: &Object<'_>) -> Result<Http2Settings> {
    Ok(Http2Settings {
        hpack_table_size: optional_u32(config, "hpack_table_size")?,
        max_concurrent_streams: optional_u32(config, "max_concurrent_streams")?,
        initial_stream_window_size: optional_u32(config, "initial_stream_window_size")?,
        initial_connection_window_size: optional_u32(config, "initial_connection_window_size")?,
    })
}

fn optional_u32(config: &Object<'_>, key: &str) -> Result<Option<u32>> {
    match config.get_i64_opt(key)? {
        Some(raw) => u32::try_from(raw)
            .map(Some)
            .map_err(|_| Error::type_mismatch(config.scope(key), "unsigned 32-bit integer")),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn http1_defaults_when_empty() {
        let doc = json!({});
        let settings =
            translate_http1_settings(&Object::from_value("http1_settings", &doc).expect("object"))
                .expect("translate");
        assert!(!settings.allow_absolute_url);
    }

    #[test]
    fn http1_reads_allow_absolute_url() {
        let doc = json!({ "allow_absolute_url": true });
        let settings =
            translate_http1_settings(&Object::from_value("http1_settings", &doc).expect("object"))
                .expect("translate");
        assert!(settings.allow_absolute_url);
    }

    #[test]
    fn http2_reads_window_settings() {
        let doc = json!({
            "hpack_table_size": 4096,
            "max_concurrent_streams": 100,
            "initial_stream_window_size": 65535
        });
        let settings =
            translate_http2_settings(&Object::from_value("http2_settings", &doc).expect("object"))
                .expect("translate");

        assert_eq!(settings.hpack_table_size, Some(4096));
        assert_eq!(settings.max_concurrent_streams, Some(100));
        assert_eq!(settings.initial_stream_window_size, Some(65535));
        assert_eq!(settings.initial_connection_window_size, None);
    }

    #[test]
    fn http2_rejects_out_of_range_values() {
        let doc = json!({ "max_concurrent_streams": -1 });
        let err =
            translate_http2_settings(&Object::from_value("http2_settings", &doc).expect("object"))
                .expect_err("negative value");
        assert!(matches!(err, Error::TypeMismatch { ref field, .. }
            if field == "http2_settings.max_concurrent_streams"));
    }
}
