//! Schema-based validation of legacy documents.
//!
//! Translation begins with a whole-document validation pass against a fixed
//! named schema, before any field is read. Validation is a pluggable
//! capability behind the [`SchemaValidator`] trait so its source and
//! versioning can evolve independently of the translators; the built-in
//! [`CatalogValidator`] resolves names from [`catalog`] and compiles each
//! schema once, caching the compiled validator for concurrent reuse.

pub mod catalog;

use std::sync::Arc;

use dashmap::DashMap;
use jsonschema::{Draft, Validator};
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::errors::{Error, Result};

/// Validates a document against a named schema.
pub trait SchemaValidator: Send + Sync {
    /// Check `document` against the schema registered under `schema`.
    ///
    /// Returns `Error::SchemaViolation` carrying every violation found, or
    /// `Ok(())` if the document conforms.
    fn validate(&self, schema: &str, document: &Value) -> Result<()>;
}

/// Built-in validator backed by the fixed schema catalog.
#[derive(Debug, Default)]
pub struct CatalogValidator {
    compiled: DashMap<String, Arc<Validator>>,
}

impl CatalogValidator {
    /// Create a validator with an empty compilation cache.
    pub fn new() -> Self {
        Self { compiled: DashMap::new() }
    }

    /// Process-wide shared instance, compiled lazily on first use.
    pub fn shared() -> &'static CatalogValidator {
        static SHARED: Lazy<CatalogValidator> = Lazy::new(CatalogValidator::new);
        &SHARED
    }

    fn get_or_compile(&self, name: &str) -> Result<Arc<Validator>> {
        if let Some(validator) = self.compiled.get(name) {
            return Ok(Arc::clone(&validator));
        }

        let schema = catalog::SCHEMAS
            .get(name)
            .ok_or_else(|| Error::schema_violation(name, "no schema registered under this name"))?;

        let validator =
            Validator::options().with_draft(Draft::Draft7).build(schema).map_err(|err| {
                Error::schema_violation(name, format!("schema failed to compile: {}", err))
            })?;

        let validator = Arc::new(validator);
        self.compiled.insert(name.to_string(), Arc::clone(&validator));

        Ok(validator)
    }
}

impl SchemaValidator for CatalogValidator {
    fn validate(&self, schema: &str, document: &Value) -> Result<()> {
        let validator = self.get_or_compile(schema)?;

        let violations: Vec<String> = validator
            .iter_errors(document)
            .map(|err| {
                let path = err.instance_path.to_string();
                if path.is_empty() {
                    err.to_string()
                } else {
                    format!("{}: {}", path, err)
                }
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            tracing::debug!(schema, count = violations.len(), "legacy document rejected by schema");
            Err(Error::schema_violation(schema, violations.join("; ")))
        }
    }
}
