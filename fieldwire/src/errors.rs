use std::borrow::Cow;

use thiserror::Error;

/// Symbolic validation codes carried by [`ValidationIssue`].
pub mod codes {
    /// A list value does not name an existing option of its field.
    pub const INCLUSION: &str = "validation.inclusion";
    /// A raw value cannot be parsed into its format's domain type.
    pub const INVALID: &str = "validation.invalid";
    /// A string value violates its configured length bounds.
    pub const LENGTH: &str = "validation.length";
    /// A string value does not match the field's regular expression.
    pub const REGEX: &str = "validation.regex";
    /// A patch payload does not have the expected document shape.
    pub const INVALID_PAYLOAD: &str = "patch.invalid_payload";
}

/// Top-level error type returned by fieldwire builders and maintenance operations.
#[derive(Debug, Error)]
pub enum WireError {
    /// Validation failed for one or more fields.
    #[error("validation failed")]
    Validation(#[from] ValidationError),

    /// A stored field format token is not part of the supported set.
    #[error("unsupported custom field format: {format}")]
    UnsupportedFormat { format: String },

    /// A derived representer was requested with an incomplete context. This is
    /// a caller bug and is raised eagerly at build time.
    #[error("representer configuration error: {message}")]
    Configuration { message: Cow<'static, str> },

    /// Target entity was not found when performing a mutation.
    #[error("entity not found")]
    NotFound { entity_id: Option<String> },

    /// A destructive maintenance operation failed; the message is safe to
    /// show to end users in place of the underlying fault.
    #[error("{message}")]
    Advisory { message: Cow<'static, str> },
}

impl WireError {
    pub fn configuration(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn advisory(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Advisory {
            message: message.into(),
        }
    }
}

/// Collection of validation issues encountered while checking raw values.
#[derive(Debug, Error)]
#[error("validation errors: {issues:?}")]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn new<I>(issues: I) -> Self
    where
        I: IntoIterator<Item = ValidationIssue>,
    {
        Self {
            issues: issues.into_iter().collect(),
        }
    }

    /// Convenience helper for constructing a single-field validation error.
    pub fn single(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new([ValidationIssue::new(field, code, message)])
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Detailed validation failure for a single wire property.
///
/// Issues are returned, not raised, so callers can aggregate them across
/// fields into one multi-field error response.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Convenience alias for operations whose failures are validation issues.
pub type ValidationResult<T> = Result<T, ValidationError>;
