use std::io;
use thiserror::Error;

/// Errors that can occur while configuring or assembling a module descriptor
#[derive(Error, Debug)]
pub enum DescriptorError {
    #[error("Invalid argument: '{argument}' must not be absent")]
    InvalidArgument { argument: String },

    #[error("Missing required field '{field}'")]
    MissingRequiredField { field: String },

    #[error("Invalid module name '{0}': expected dot-separated tokens with an optional '/<major>' suffix")]
    InvalidModuleName(String),

    #[error(transparent)]
    Resolution(#[from] ResolveError),
}

impl DescriptorError {
    pub(crate) fn invalid_argument(argument: &str) -> Self {
        DescriptorError::InvalidArgument {
            argument: argument.to_string(),
        }
    }

    pub(crate) fn missing_field(field: &str) -> Self {
        DescriptorError::MissingRequiredField {
            field: field.to_string(),
        }
    }
}

/// Failure reported by a [`crate::FileResolver`] for a path reference
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cannot resolve '{reference}': {reason}")]
pub struct ResolveError {
    pub reference: String,
    pub reason: String,
}

/// Errors that can occur while reading or writing manifest files
#[derive(Error, Debug)]
pub enum ManifestIoError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed manifest at line {line}: {message}")]
    Parse { line: usize, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_display() {
        let err = DescriptorError::missing_field("moduleName");
        assert_eq!(err.to_string(), "Missing required field 'moduleName'");
    }

    #[test]
    fn test_resolution_error_is_transparent() {
        let inner = ResolveError {
            reference: "LICENSE".to_string(),
            reason: "no such project directory".to_string(),
        };
        let err = DescriptorError::from(inner.clone());
        assert_eq!(err.to_string(), inner.to_string());
        assert!(matches!(err, DescriptorError::Resolution(e) if e == inner));
    }
}
