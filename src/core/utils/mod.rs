//! Utilities: deterministic RNG, ABGR colour helpers and the console logger.

pub mod color;
pub mod logger;
pub mod random;
