use wasm_bindgen::prelude::*;

/// Counters for the last tick
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) tick: u64,
    pub(super) particles_processed: u32,
    pub(super) behavior_failures: u32,
    pub(super) gravity_drops: u32,
    pub(super) tool_applications: u32,
    pub(super) boundary_removals: u32,
    pub(super) particle_count: u32,
    pub(super) grid_size: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn tick(&self) -> u64 { self.tick }
    #[wasm_bindgen(getter)]
    pub fn particles_processed(&self) -> u32 { self.particles_processed }
    #[wasm_bindgen(getter)]
    pub fn behavior_failures(&self) -> u32 { self.behavior_failures }
    #[wasm_bindgen(getter)]
    pub fn gravity_drops(&self) -> u32 { self.gravity_drops }
    #[wasm_bindgen(getter)]
    pub fn tool_applications(&self) -> u32 { self.tool_applications }
    #[wasm_bindgen(getter)]
    pub fn boundary_removals(&self) -> u32 { self.boundary_removals }
    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.particle_count }
    #[wasm_bindgen(getter)]
    pub fn grid_size(&self) -> u32 { self.grid_size }
}
