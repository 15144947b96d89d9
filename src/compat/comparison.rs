//! Comparison threshold translation.
//!
//! Status-code and duration access log filters share a comparison shape in
//! the legacy format: an operator token, an integer threshold, and an
//! optional runtime override key. The operator set is closed; anything
//! outside it is rejected rather than assumed.

use serde::{Deserialize, Serialize};

use crate::document::Object;
use crate::errors::{Error, Result};

/// Comparison operator allowed by the legacy format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonOp {
    /// Legacy token `">="`
    #[serde(rename = ">=")]
    Ge,
    /// Legacy token `"="`
    #[serde(rename = "=")]
    Eq,
}

/// Canonical comparison threshold for status-code and duration filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonThreshold {
    pub op: ComparisonOp,
    pub value: i64,
    /// Runtime key overriding `value` at run time; empty when not given.
    #[serde(default)]
    pub runtime_key: String,
}

/// Translate a legacy comparison object into a [`ComparisonThreshold`].
pub fn translate_comparison(config: &Object<'_>) -> Result<ComparisonThreshold> {
    let op = match config.get_str("op")? {
        ">=" => ComparisonOp::Ge,
        "=" => ComparisonOp::Eq,
        other => return Err(Error::invalid_operator(config.scope("op"), other)),
    };

    let value = config.get_i64("value")?;
    let runtime_key = config.get_str_or("runtime_key", "")?.to_string();

    Ok(ComparisonThreshold { op, value, runtime_key })
}
