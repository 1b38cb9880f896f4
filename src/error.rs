//! Error types for xsd-typegraph
//!
//! The core is a pure function of (schema set, policies): every error raised
//! here is fatal for the build, and identical input always fails identically.
//! Soft inconsistencies (duplicate property names and the like) are resolved
//! by the builder and never surface as errors.

use std::fmt;
use thiserror::Error;

/// Result type alias using the crate [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for type graph construction
#[derive(Error, Debug)]
pub enum Error {
    /// A referenced XML namespace has no output mapping after all fallbacks
    #[error("configuration error: no output namespace mapped for '{namespace}'{}", document_suffix(.document))]
    Configuration {
        /// The XML namespace that could not be mapped
        namespace: String,
        /// The document the namespace was referenced from, if known
        document: Option<String>,
    },

    /// A schema construct the builder has no handled case for
    #[error("unsupported construct: {0}")]
    UnsupportedConstruct(String),

    /// Build error with context
    #[error("build error: {0}")]
    Build(#[from] BuildError),

    /// I/O error (configuration and schema set files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn document_suffix(document: &Option<String>) -> String {
    match document {
        Some(s) => format!(" (referenced from '{}')", s),
        None => String::new(),
    }
}

impl Error {
    /// Create a configuration error for an unmapped namespace
    pub fn configuration(namespace: impl Into<String>, document: Option<&str>) -> Self {
        Error::Configuration {
            namespace: namespace.into(),
            document: document.map(str::to_string),
        }
    }

    /// Create an unsupported-construct error naming the construct
    pub fn unsupported(construct: impl fmt::Display) -> Self {
        Error::UnsupportedConstruct(construct.to_string())
    }
}

/// Type graph build error with context
#[derive(Debug, Clone)]
pub struct BuildError {
    /// Error message
    pub message: String,
    /// Qualified name of the construct being built
    pub construct: Option<String>,
    /// Location (document identity) of the construct
    pub location: Option<String>,
}

impl BuildError {
    /// Create a new build error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            construct: None,
            location: None,
        }
    }

    /// Set the construct being built
    pub fn with_construct(mut self, construct: impl Into<String>) -> Self {
        self.construct = Some(construct.into());
        self
    }

    /// Set the location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref construct) = self.construct {
            write!(f, "\n\nConstruct: {}", construct)?;
        }

        if let Some(ref loc) = self.location {
            write!(f, "\n\nLocation: {}", loc)?;
        }

        Ok(())
    }
}

impl std::error::Error for BuildError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_names_namespace() {
        let err = Error::configuration("urn:missing", Some("a.xsd"));
        let msg = err.to_string();
        assert!(msg.contains("urn:missing"));
        assert!(msg.contains("a.xsd"));

        let err = Error::configuration("urn:missing", None);
        assert!(!err.to_string().contains("referenced from"));
    }

    #[test]
    fn test_build_error_display() {
        let err = BuildError::new("base type is not a complex type")
            .with_construct("{urn:a}Derived")
            .with_location("a.xsd");

        let msg = format!("{}", err);
        assert!(msg.contains("base type is not a complex type"));
        assert!(msg.contains("Construct: {urn:a}Derived"));
        assert!(msg.contains("Location: a.xsd"));
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = BuildError::new("test").into();
        assert!(matches!(err, Error::Build(_)));
    }
}
