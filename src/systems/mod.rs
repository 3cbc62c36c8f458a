//! Systems: element behaviors and the shared physics they lean on.

pub mod behaviors;
pub mod combustion;
pub mod explosion;
pub mod temperature;
pub mod tools;
