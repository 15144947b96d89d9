//! Access log sink and filter translation.
//!
//! A legacy access log entry names a sink path, an optional format string,
//! and an optional filter: a boolean predicate tree deciding whether a
//! request is recorded. The filter expression language is compiled
//! recursively into a closed variant tree, bottom-up, preserving child
//! order. Unknown discriminators are fatal, and nesting is capped so
//! operator-supplied documents cannot grow the stack without bound.

use serde::{Deserialize, Serialize};

use crate::compat::comparison::{translate_comparison, ComparisonThreshold};
use crate::document::Object;
use crate::errors::{Error, Result};

/// Maximum nesting depth accepted for access log filter trees.
pub const MAX_FILTER_DEPTH: usize = 32;

/// Compiled access log filter predicate.
///
/// Closed sum over the legacy filter expression language; one constructor
/// per discriminator token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccessLogFilter {
    /// Compare the response status code against a threshold.
    StatusCode { comparison: ComparisonThreshold },
    /// Compare the request duration against a threshold.
    Duration { comparison: ComparisonThreshold },
    /// Log a runtime-controlled fraction of requests.
    Runtime { key: String },
    /// Log when any child filter matches.
    #[serde(rename = "logical_or")]
    Or { filters: Vec<AccessLogFilter> },
    /// Log when every child filter matches.
    #[serde(rename = "logical_and")]
    And { filters: Vec<AccessLogFilter> },
    /// Log only requests that are not health checks.
    #[serde(rename = "not_healthcheck")]
    NotHealthCheck,
    /// Log only traceable requests.
    TraceableRequest,
}

/// Canonical access log sink descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessLogEntry {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<AccessLogFilter>,
}

/// Compile a legacy filter expression object into an [`AccessLogFilter`].
pub fn compile_filter(config: &Object<'_>) -> Result<AccessLogFilter> {
    compile_filter_at(config, 0)
}

fn compile_filter_at(config: &Object<'_>, depth: usize) -> Result<AccessLogFilter> {
    if depth >= MAX_FILTER_DEPTH {
        return Err(Error::filter_tree_too_deep(config.context(), MAX_FILTER_DEPTH));
    }

    match config.get_str("type")? {
        "status_code" => Ok(AccessLogFilter::StatusCode { comparison: translate_comparison(config)? }),
        "duration" => Ok(AccessLogFilter::Duration { comparison: translate_comparison(config)? }),
        "runtime" => Ok(AccessLogFilter::Runtime { key: config.get_str("key")?.to_string() }),
        "logical_or" => Ok(AccessLogFilter::Or { filters: compile_children(config, depth)? }),
        "logical_and" => Ok(AccessLogFilter::And { filters: compile_children(config, depth)? }),
        "not_healthcheck" => Ok(AccessLogFilter::NotHealthCheck),
        "traceable_request" => Ok(AccessLogFilter::TraceableRequest),
        other => Err(Error::unknown_filter_type(config.scope("type"), other)),
    }
}

fn compile_children(config: &Object<'_>, depth: usize) -> Result<Vec<AccessLogFilter>> {
    let children = config.get_object_array("filters")?;
    if children.is_empty() {
        // An empty combinator would silently log everything or nothing.
        return Err(Error::type_mismatch(
            config.scope("filters"),
            "non-empty array of filter objects",
        ));
    }

    children.iter().map(|child| compile_filter_at(child, depth + 1)).collect()
}

/// Translate one legacy access log entry into an [`AccessLogEntry`].
pub fn translate_access_log(config: &Object<'_>) -> Result<AccessLogEntry> {
    let path = config.get_str("path")?.to_string();
    let format = config.get_str_opt("format")?.map(str::to_string);
    let filter = match config.get_object_opt("filter")? {
        Some(filter) => Some(compile_filter(&filter)?),
        None => None,
    };

    Ok(AccessLogEntry { path, format, filter })
}
