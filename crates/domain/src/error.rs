//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`RefHubError`]
//! via `From`.

/// Top-level error returned by services and ports.
#[derive(Debug, thiserror::Error)]
pub enum RefHubError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error("storage error: {0}")]
    Storage(Box<dyn std::error::Error + Send + Sync>),
}

impl RefHubError {
    /// Short machine-readable name of the error category.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::Storage(_) => "storage",
        }
    }
}

/// Domain invariant violations and malformed input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("translation name for `{0}` must not be empty")]
    EmptyTranslationName(String),

    #[error("duplicate translation for language `{0}`")]
    DuplicateTranslation(String),

    #[error("more than one default translation")]
    MultipleDefaultTranslations,

    #[error("invalid ISO 639-3 language code `{0}`")]
    InvalidLanguage(String),

    #[error("invalid identifier `{0}`")]
    InvalidId(String),

    #[error("missing identifier")]
    MissingId,

    #[error("missing entity")]
    MissingEntity,

    #[error("page size must be greater than zero")]
    InvalidPageSize,

    #[error("unknown sort direction `{0}`")]
    InvalidSortDirection(String),

    #[error("unknown sort property `{0}`")]
    UnknownSortProperty(String),

    #[error("malformed request: {0}")]
    MalformedRequest(String),
}

/// A lookup by id did not match anything.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_validation_error_into_refhub_error() {
        let err: RefHubError = ValidationError::EmptyName.into();
        assert!(matches!(
            err,
            RefHubError::Validation(ValidationError::EmptyName)
        ));
        assert_eq!(err.kind(), "validation");
    }

    #[test]
    fn should_render_not_found_message() {
        let err: RefHubError = NotFoundError {
            entity: "Region",
            id: "abc".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Region not found: abc");
        assert_eq!(err.kind(), "not_found");
    }

    #[test]
    fn should_report_storage_kind() {
        let err = RefHubError::Storage("disk full".into());
        assert_eq!(err.kind(), "storage");
        assert_eq!(err.to_string(), "storage error: disk full");
    }
}
