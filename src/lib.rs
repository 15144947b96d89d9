//! # Gantry
//!
//! Gantry translates legacy, loosely-typed JSON proxy configuration
//! documents into the canonical, strongly-typed configuration model the
//! proxy's filter-chain runtime consumes. The legacy format is being phased
//! out but is still accepted; this crate is the compatibility boundary.
//!
//! ## Architecture
//!
//! The translation is a pure, synchronous, single-pass transform:
//!
//! ```text
//! legacy JSON document → schema validation → typed translators → ConnectionManagerConfig
//! ```
//!
//! A document is first validated in full against a fixed named schema
//! ([`schema`]); only then do the translators in [`compat`] read fields
//! through the typed document view in [`document`]. Any failure aborts the
//! whole call with a typed [`Error`] naming the field path and offending
//! token; no partial configuration ever escapes to the data plane.
//!
//! ## Example
//!
//! ```rust
//! use gantry::ConnectionManagerConfig;
//! use serde_json::json;
//!
//! let legacy = json!({
//!     "codec_type": "auto",
//!     "stat_prefix": "ingress_http",
//!     "access_log": [{ "path": "/dev/stdout" }]
//! });
//!
//! let config = ConnectionManagerConfig::from_legacy(&legacy)?;
//! assert_eq!(config.stat_prefix, "ingress_http");
//! # Ok::<(), gantry::Error>(())
//! ```

pub mod compat;
pub mod document;
pub mod errors;
pub mod schema;

// Re-export commonly used types and traits
pub use compat::{
    translate_connection_manager, AccessLogEntry, AccessLogFilter, CodecType,
    ComparisonThreshold, ConnectionManagerConfig, ForwardClientCertDetails, HttpFilterEntry,
    RouteSource,
};
pub use errors::{Error, Result};
pub use schema::{CatalogValidator, SchemaValidator};

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
