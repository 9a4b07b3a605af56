//! Shared building blocks used across domains.

pub mod validation;

pub use validation::{FieldError, ValidationError};
