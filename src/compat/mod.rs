//! Legacy configuration translation layer.
//!
//! Translators for the legacy JSON configuration format, one module per
//! document section. Each translator is a pure function from a typed
//! document view to a canonical configuration type; the connection manager
//! module orchestrates them into the single whole-document transform.
//!
//! Composition is leaf-to-root:
//!
//! ```text
//! comparison ─┐
//!             ├─ access_log ─┐
//! http_filters ──────────────┤
//! route ─────────────────────┼─ connection_manager
//! protocol ──────────────────┘
//! ```

pub mod access_log;
pub mod comparison;
pub mod connection_manager;
pub mod http_filters;
pub mod protocol;
pub mod route;

pub use access_log::{compile_filter, translate_access_log, AccessLogEntry, AccessLogFilter};
pub use comparison::{translate_comparison, ComparisonOp, ComparisonThreshold};
pub use connection_manager::{
    translate_connection_manager, ClientCertDetails, CodecType, ConnectionManagerConfig,
    ForwardClientCertDetails, TracingConfig, TracingOperationName,
};
pub use http_filters::{translate_http_filters, DeprecatedFilterConfig, HttpFilterEntry};
pub use protocol::{
    translate_http1_settings, translate_http2_settings, Http1Settings, Http2Settings,
};
pub use route::{
    translate_rds, translate_route_table, RdsConfig, RouteAction, RouteMatch, RouteRule,
    RouteSource, RouteTableConfig, SslRequirement, VirtualHostConfig,
};
