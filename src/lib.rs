//! Sandbox Engine - falling-sand cellular automaton in WASM
//!
//! Architecture:
//! - core/        - errors, rng, colours, logger
//! - spatial/     - the cell grid
//! - domain/      - elements, particles, registry
//! - systems/     - behaviours, heat, combustion, explosions, tools
//! - simulation/  - WorldCore, tick loop, persistence, wasm facade

pub mod core;
pub mod spatial;
pub mod domain;
pub mod systems;
pub mod simulation;

// Short paths for the common types
pub use spatial::grid;
pub use domain::elements;
pub use systems::behaviors;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    crate::core::utils::logger::init(log::LevelFilter::Info);
    log::info!("sandbox engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Every element name the engine knows, as a JSON array
#[wasm_bindgen]
pub fn element_names() -> String {
    let names: Vec<&str> = elements::ElementKind::ALL.iter().map(|k| k.name()).collect();
    serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
}

// Re-export main types
pub use crate::core::error::{BehaviorError, RegistryError, SaveError};
pub use domain::content::ElementRegistry;
pub use domain::elements::{ElementDescriptor, ElementKind};
pub use domain::particle::{ElementState, Particle};
pub use simulation::{
    ImportSummary, Notification, PerfStats, SaveFile, Severity, SimulationConfig, UiState, World, WorldCore,
};
pub use systems::behaviors::{ElementBehavior, UpdateContext};
pub use systems::tools::{EnvironmentalTool, ToolRegistry, WindDirection};
