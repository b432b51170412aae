//! Solution field validation

use thiserror::Error;

/// Errors that can occur during solution validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolutionValidationError {
    #[error("Solution name cannot be empty")]
    EmptyName,

    #[error("Solution name exceeds maximum length of {0} characters")]
    NameTooLong(usize),

    #[error("Solution ID must be a 36-character UUID: '{0}'")]
    InvalidSolutionId(String),

    #[error("Metadata exceeds maximum length of {0} characters")]
    MetadataTooLong(usize),

    #[error("Type code exceeds maximum length of {0} characters")]
    TypeCodeTooLong(usize),

    #[error("Origin URI exceeds maximum length of {0} characters")]
    OriginTooLong(usize),
}

/// NAME column is VARCHAR(100)
pub const MAX_NAME_LENGTH: usize = 100;
/// METADATA column is VARCHAR(1024)
pub const MAX_METADATA_LENGTH: usize = 1024;
/// MODEL_TYPE_CD / TOOLKIT_TYPE_CD columns are CHAR(2)
pub const MAX_TYPE_CODE_LENGTH: usize = 2;
/// ORIGIN column is VARCHAR(512)
pub const MAX_ORIGIN_LENGTH: usize = 512;

/// Validate a solution name: non-empty, fits the NAME column
pub fn validate_name(name: &str) -> Result<(), SolutionValidationError> {
    if name.is_empty() {
        return Err(SolutionValidationError::EmptyName);
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(SolutionValidationError::NameTooLong(MAX_NAME_LENGTH));
    }
    Ok(())
}

/// Validate the JSON metadata text fits its column
pub fn validate_metadata(metadata: &str) -> Result<(), SolutionValidationError> {
    if metadata.chars().count() > MAX_METADATA_LENGTH {
        return Err(SolutionValidationError::MetadataTooLong(
            MAX_METADATA_LENGTH,
        ));
    }
    Ok(())
}

/// Validate a model/toolkit type code fits its column.
///
/// Only the length is checked here; the valid value set is defined by
/// server-side reference data, not by this crate.
pub fn validate_type_code(code: &str) -> Result<(), SolutionValidationError> {
    if code.chars().count() > MAX_TYPE_CODE_LENGTH {
        return Err(SolutionValidationError::TypeCodeTooLong(
            MAX_TYPE_CODE_LENGTH,
        ));
    }
    Ok(())
}

/// Validate a federation origin URI fits its column
pub fn validate_origin(origin: &str) -> Result<(), SolutionValidationError> {
    if origin.chars().count() > MAX_ORIGIN_LENGTH {
        return Err(SolutionValidationError::OriginTooLong(MAX_ORIGIN_LENGTH));
    }
    Ok(())
}
