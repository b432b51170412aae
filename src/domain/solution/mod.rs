//! Solution aggregate: entity, validation, and repository contract

mod entity;
mod repository;
mod validation;

pub use entity::{Solution, SolutionId};
pub use repository::SolutionRepository;
pub use validation::{
    validate_metadata, validate_name, validate_origin, validate_type_code, SolutionValidationError,
    MAX_METADATA_LENGTH, MAX_NAME_LENGTH, MAX_ORIGIN_LENGTH, MAX_TYPE_CODE_LENGTH,
};
