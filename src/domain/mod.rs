//! Domain model: element ids and descriptors, particles and the registry.

pub mod content;
pub mod elements;
pub mod particle;
