//! Core building blocks shared by every layer: error types and small utilities.

pub mod error;
pub mod utils;
