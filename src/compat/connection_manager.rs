//! Legacy HTTP connection manager translation.
//!
//! The orchestrator for the whole transform: validates the legacy document
//! against its named schema, then composes the codec type, route source,
//! filter chain, tracing, protocol options, timeouts, access logs, and
//! client certificate policy into one [`ConnectionManagerConfig`]. The
//! translation is all-or-nothing: the first failure aborts the call and no
//! partial configuration is returned.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::compat::access_log::{translate_access_log, AccessLogEntry};
use crate::compat::http_filters::{translate_http_filters, HttpFilterEntry};
use crate::compat::protocol::{
    translate_http1_settings, translate_http2_settings, Http1Settings, Http2Settings,
};
use crate::compat::route::{optional_millis, translate_rds, translate_route_table, RouteSource};
use crate::document::Object;
use crate::errors::{Error, Result};
use crate::schema::{catalog, CatalogValidator, SchemaValidator};

/// Downstream codec selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodecType {
    Auto,
    Http1,
    Http2,
}

impl CodecType {
    fn from_token(field: &str, token: &str) -> Result<Self> {
        match token.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "http1" => Ok(Self::Http1),
            "http2" => Ok(Self::Http2),
            _ => Err(Error::unknown_enum_value(field, token)),
        }
    }
}

/// Span naming scheme for traced requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TracingOperationName {
    Ingress,
    Egress,
}

impl TracingOperationName {
    fn from_token(field: &str, token: &str) -> Result<Self> {
        match token.to_ascii_lowercase().as_str() {
            "ingress" => Ok(Self::Ingress),
            "egress" => Ok(Self::Egress),
            _ => Err(Error::unknown_enum_value(field, token)),
        }
    }
}

/// Canonical tracing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TracingConfig {
    pub operation_name: TracingOperationName,
    /// Request headers captured as span tags, in document order, duplicates
    /// preserved.
    #[serde(default)]
    pub request_headers_for_tags: Vec<String>,
}

/// What to do with the downstream client certificate header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForwardClientCertDetails {
    #[default]
    Sanitize,
    ForwardOnly,
    AppendForward,
    SanitizeSet,
    AlwaysForwardOnly,
}

impl ForwardClientCertDetails {
    fn from_token(field: &str, token: &str) -> Result<Self> {
        match token.to_ascii_lowercase().as_str() {
            "sanitize" => Ok(Self::Sanitize),
            "forward_only" => Ok(Self::ForwardOnly),
            "append_forward" => Ok(Self::AppendForward),
            "sanitize_set" => Ok(Self::SanitizeSet),
            "always_forward_only" => Ok(Self::AlwaysForwardOnly),
            _ => Err(Error::unknown_enum_value(field, token)),
        }
    }
}

/// Which client certificate details are set on the forwarded header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClientCertDetails {
    #[serde(default)]
    pub subject: bool,
    #[serde(default)]
    pub san: bool,
}

/// Canonical HTTP connection manager configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionManagerConfig {
    pub codec_type: CodecType,
    pub stat_prefix: String,
    pub route_source: RouteSource,
    pub filters: Vec<HttpFilterEntry>,
    pub add_user_agent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracing: Option<TracingConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http1_settings: Option<Http1Settings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http2_settings: Option<Http2Settings>,
    pub server_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle_timeout: Option<Duration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drain_timeout: Option<Duration>,
    pub access_logs: Vec<AccessLogEntry>,
    pub use_remote_address: bool,
    pub generate_request_id: bool,
    pub forward_client_cert: ForwardClientCertDetails,
    pub set_current_client_cert_details: ClientCertDetails,
}

impl ConnectionManagerConfig {
    /// Translate a legacy document using the built-in schema catalog.
    pub fn from_legacy(document: &Value) -> Result<Self> {
        translate_connection_manager(document, CatalogValidator::shared())
    }
}

/// Translate a legacy HTTP connection manager document.
///
/// The document is validated in full against the
/// [`catalog::HTTP_CONN_MANAGER`] schema before any field is read; after
/// that, each section is translated in document-definition order. Any
/// failure aborts the whole call.
pub fn translate_connection_manager(
    document: &Value,
    validator: &dyn SchemaValidator,
) -> Result<ConnectionManagerConfig> {
    validator.validate(catalog::HTTP_CONN_MANAGER, document)?;

    let config = Object::from_value("http_connection_manager", document)?;

    let codec_type =
        CodecType::from_token(&config.scope("codec_type"), config.get_str("codec_type")?)?;
    let stat_prefix = config.get_str("stat_prefix")?.to_string();

    let route_source =
        match (config.get_object_opt("rds")?, config.get_object_opt("route_config")?) {
            (Some(_), Some(_)) => {
                return Err(Error::conflicting_route_source(config.context()));
            }
            (Some(rds), None) => RouteSource::Rds(translate_rds(&rds)?),
            (None, Some(table)) => RouteSource::Inline(translate_route_table(&table)?),
            (None, None) => RouteSource::None,
        };

    let filters = translate_http_filters(&config.get_object_array_or_empty("filters")?)?;

    let add_user_agent = config.get_bool_or("add_user_agent", false)?;

    let tracing = match config.get_object_opt("tracing")? {
        Some(tracing) => Some(translate_tracing(&tracing)?),
        None => None,
    };

    let http1_settings = match config.get_object_opt("http1_settings")? {
        Some(settings) => Some(translate_http1_settings(&settings)?),
        None => None,
    };
    let http2_settings = match config.get_object_opt("http2_settings")? {
        Some(settings) => Some(translate_http2_settings(&settings)?),
        None => None,
    };

    let server_name = config.get_str_or("server_name", "")?.to_string();
    let idle_timeout = optional_seconds(&config, "idle_timeout_s")?;
    let drain_timeout = optional_millis(&config, "drain_timeout_ms")?;

    let access_logs = config
        .get_object_array_or_empty("access_log")?
        .iter()
        .map(translate_access_log)
        .collect::<Result<Vec<_>>>()?;

    let use_remote_address = config.get_bool_or("use_remote_address", false)?;
    // Absent means enabled in the legacy runtime.
    let generate_request_id = config.get_bool_or("generate_request_id", true)?;

    let forward_client_cert = ForwardClientCertDetails::from_token(
        &config.scope("forward_client_cert"),
        config.get_str_or("forward_client_cert", "sanitize")?,
    )?;

    let set_current_client_cert_details = translate_cert_details(&config)?;

    tracing::debug!(
        stat_prefix = %stat_prefix,
        filters = filters.len(),
        access_logs = access_logs.len(),
        "translated legacy http connection manager"
    );

    Ok(ConnectionManagerConfig {
        codec_type,
        stat_prefix,
        route_source,
        filters,
        add_user_agent,
        tracing,
        http1_settings,
        http2_settings,
        server_name,
        idle_timeout,
        drain_timeout,
        access_logs,
        use_remote_address,
        generate_request_id,
        forward_client_cert,
        set_current_client_cert_details,
    })
}

fn translate_tracing(config: &Object<'_>) -> Result<TracingConfig> {
    let operation_name = TracingOperationName::from_token(
        &config.scope("operation_name"),
        config.get_str("operation_name")?,
    )?;
    let request_headers_for_tags = config.get_string_array_or_empty("request_headers_for_tags")?;

    Ok(TracingConfig { operation_name, request_headers_for_tags })
}

fn translate_cert_details(config: &Object<'_>) -> Result<ClientCertDetails> {
    let mut details = ClientCertDetails::default();

    for token in config.get_string_array_or_empty("set_current_client_cert_details")? {
        // These tokens are case sensitive, unlike every other enum field in
        // the legacy format. Preserved as-is: normalizing would accept
        // documents the legacy loader rejected.
        match token.as_str() {
            "Subject" => details.subject = true,
            "SAN" => details.san = true,
            other => {
                return Err(Error::unknown_enum_value(
                    config.scope("set_current_client_cert_details"),
                    other,
                ))
            }
        }
    }

    Ok(details)
}

fn optional_seconds(config: &Object<'_>, key: &str) -> Result<Option<Duration>> {
    match config.get_i64_opt(key)? {
        Some(secs) if secs >= 0 => Ok(Some(Duration::from_secs(secs as u64))),
        Some(_) => Err(Error::type_mismatch(config.scope(key), "non-negative integer")),
        None => Ok(None),
    }
}
