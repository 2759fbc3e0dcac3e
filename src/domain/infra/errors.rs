//! Infrastructure definition errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InfraError {
    #[error("context variable '{0}' must not be null")]
    MissingContext(&'static str),

    #[error("Table name must not be empty")]
    EmptyTableName,

    #[error("Capacity units must be positive, got {0}")]
    InvalidCapacity(u32),
}
