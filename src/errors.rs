//! # Error Handling
//!
//! Error types for legacy configuration translation using `thiserror`.
//! Every variant carries the field path and/or offending token so a rejected
//! reload can be diagnosed from the error alone. All errors are fatal to the
//! translation call that produced them; no partial output is ever returned.

/// Custom result type for translation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type covering every way a legacy document can be rejected
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The document failed validation against a named schema
    #[error("document failed schema '{schema}' validation: {detail}")]
    SchemaViolation { schema: String, detail: String },

    /// A required field is absent
    #[error("missing required field '{field}'")]
    MissingField { field: String },

    /// A field is present but has the wrong shape
    #[error("field '{field}' has the wrong type: expected {expected}")]
    TypeMismatch { field: String, expected: String },

    /// A comparison filter used an operator outside the allowed set
    #[error("invalid comparison operator '{token}' at '{field}': expected \">=\" or \"=\"")]
    InvalidOperator { field: String, token: String },

    /// An enum-valued field carried a token outside its allowed set
    #[error("unknown value '{token}' for field '{field}'")]
    UnknownEnumValue { field: String, token: String },

    /// An access log filter used an unrecognized type discriminator
    #[error("unknown access log filter type '{token}' at '{field}'")]
    UnknownFilterType { field: String, token: String },

    /// Both a dynamic route reference and an inline route table were given
    #[error("'{field}' must have either rds or route_config but not both")]
    ConflictingRouteSource { field: String },

    /// An opaque per-filter sub-document could not be re-wrapped
    #[error("malformed config for http filter '{name}': {detail}")]
    MalformedSubConfig { name: String, detail: String },

    /// An access log filter tree exceeded the nesting cap
    #[error("access log filter tree at '{field}' exceeds {limit} nested levels")]
    FilterTreeTooDeep { field: String, limit: usize },
}

impl Error {
    /// Create a schema violation error
    pub fn schema_violation<S: Into<String>, D: Into<String>>(schema: S, detail: D) -> Self {
        Self::SchemaViolation { schema: schema.into(), detail: detail.into() }
    }

    /// Create a missing field error
    pub fn missing_field<F: Into<String>>(field: F) -> Self {
        Self::MissingField { field: field.into() }
    }

    /// Create a type mismatch error
    pub fn type_mismatch<F: Into<String>, E: Into<String>>(field: F, expected: E) -> Self {
        Self::TypeMismatch { field: field.into(), expected: expected.into() }
    }

    /// Create an invalid operator error
    pub fn invalid_operator<F: Into<String>, T: Into<String>>(field: F, token: T) -> Self {
        Self::InvalidOperator { field: field.into(), token: token.into() }
    }

    /// Create an unknown enum value error
    pub fn unknown_enum_value<F: Into<String>, T: Into<String>>(field: F, token: T) -> Self {
        Self::UnknownEnumValue { field: field.into(), token: token.into() }
    }

    /// Create an unknown filter type error
    pub fn unknown_filter_type<F: Into<String>, T: Into<String>>(field: F, token: T) -> Self {
        Self::UnknownFilterType { field: field.into(), token: token.into() }
    }

    /// Create a conflicting route source error
    pub fn conflicting_route_source<F: Into<String>>(field: F) -> Self {
        Self::ConflictingRouteSource { field: field.into() }
    }

    /// Create a malformed sub-config error
    pub fn malformed_sub_config<N: Into<String>, D: Into<String>>(name: N, detail: D) -> Self {
        Self::MalformedSubConfig { name: name.into(), detail: detail.into() }
    }

    /// Create a filter tree depth error
    pub fn filter_tree_too_deep<F: Into<String>>(field: F, limit: usize) -> Self {
        Self::FilterTreeTooDeep { field: field.into(), limit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_carry_context() {
        let error = Error::missing_field("http_connection_manager.stat_prefix");
        assert_eq!(
            error.to_string(),
            "missing required field 'http_connection_manager.stat_prefix'"
        );

        let error = Error::unknown_enum_value("http_connection_manager.codec_type", "http3");
        assert!(error.to_string().contains("http3"));
        assert!(error.to_string().contains("codec_type"));
    }

    #[test]
    fn invalid_operator_names_allowed_set() {
        let error = Error::invalid_operator("filter.op", "!=");
        let message = error.to_string();
        assert!(message.contains("!="));
        assert!(message.contains(">="));
    }

    #[test]
    fn conflicting_route_source_message() {
        let error = Error::conflicting_route_source("http_connection_manager");
        assert!(error.to_string().contains("either rds or route_config"));
    }
}
