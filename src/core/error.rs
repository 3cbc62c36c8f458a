//! Error types for the engine boundaries.
//!
//! Lookup misses and out-of-bounds offsets are not errors; they come back as
//! `None`/`false`. These enums cover the cases a caller has to act on.

use thiserror::Error;

use crate::domain::elements::ElementKind;

/// Failure inside one particle's `process` call. The scheduler logs it and
/// skips that particle for the tick.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BehaviorError {
    #[error("no particle at ({x}, {y})")]
    MissingParticle { x: i32, y: i32 },
    #[error("{kind} particle carries state belonging to another element")]
    StateMismatch { kind: ElementKind },
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("The imported file has an invalid grid data format")]
    MissingCells,
    #[error("invalid cell record: {0}")]
    InvalidGrid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("element '{0}' is already registered")]
    DuplicateElement(&'static str),
    #[error("environmental tool '{0}' is already registered")]
    DuplicateTool(&'static str),
}
