//! Simulation - the world, its tick loop and the host-facing surface.
//!
//! `WorldCore` owns every piece of mutable state: grid, registries, config,
//! rng and tick counter. Native callers drive it directly; the `World` facade
//! wraps it for JavaScript. Operations live in small sub-modules as free
//! functions over `&mut WorldCore`.

use std::collections::VecDeque;

use crate::core::error::SaveError;
use crate::core::utils::random::Rng;
use crate::domain::content::ElementRegistry;
use crate::domain::particle::Particle;
use crate::spatial::grid::Grid;
use crate::systems::tools::{ToolInfo, ToolRegistry, WindDirection};

#[path = "perf/perf_timer.rs"]
mod perf_timer;

#[path = "perf/perf_stats.rs"]
mod perf_stats;

#[path = "perf/frame_limiter.rs"]
mod frame_limiter;

#[path = "init/config.rs"]
mod config;

#[path = "init/init.rs"]
mod init;

#[path = "init/settings.rs"]
mod settings;

#[path = "step/step.rs"]
mod step;

#[path = "step/sweep.rs"]
mod sweep;

#[path = "step/gravity.rs"]
mod gravity;

#[path = "step/phenomena.rs"]
mod phenomena;

#[path = "commands/commands.rs"]
mod commands;

#[path = "commands/notifications.rs"]
mod notifications;

#[path = "save/save.rs"]
mod save;

#[path = "render/render.rs"]
mod render;

mod facade;

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;

pub use config::{SimulationConfig, UiState, MAX_BRUSH, MIN_BRUSH};
pub use facade::World;
pub use notifications::{Notification, Severity};
pub use perf_stats::PerfStats;
pub use save::{CellData, GridData, ImportSummary, SaveFile, SaveMetadata};

use frame_limiter::FrameLimiter;

/// World state and the operations on it
pub struct WorldCore {
    grid: Grid,
    registry: ElementRegistry,
    tools: ToolRegistry,
    config: SimulationConfig,
    rng: Rng,
    tick: u64,
    notifications: VecDeque<Notification>,
    perf_stats: PerfStats,
    frame_limiter: FrameLimiter,
    pixels: Vec<u32>,
}

impl WorldCore {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_seed(width, height, SimulationConfig::default().seed)
    }

    pub fn with_seed(width: u32, height: u32, seed: u32) -> Self {
        Self::with_registry(width, height, ElementRegistry::with_builtin(), seed)
    }

    /// World over a caller-built registry
    pub fn with_registry(width: u32, height: u32, registry: ElementRegistry, seed: u32) -> Self {
        init::create_world_core(width, height, registry, seed)
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    /// Id of the last tick run; 0 before the first
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn particle_count(&self) -> usize {
        self.grid.particle_count()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Particle> {
        self.grid.get(x, y)
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Particle> {
        self.grid.get_mut(x, y)
    }

    // === Tick ===

    /// Run one tick. Returns false while paused.
    pub fn step(&mut self) -> bool {
        step::step(self)
    }

    /// Run a tick if the frame limiter accepts a frame at `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> bool {
        step::frame(self, now_ms)
    }

    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    // === Placement ===

    /// Place one particle, respecting occupancy unless override mode is on
    pub fn place(&mut self, x: i32, y: i32, name: &str) -> bool {
        commands::place(self, x, y, name)
    }

    /// Stamp the current element in a disc around `(cx, cy)`
    pub fn paint(&mut self, cx: i32, cy: i32) -> u32 {
        let name = self.config.current_element.clone();
        commands::create_particles_with_brush(self, cx, cy, &name)
    }

    pub fn create_particles_with_brush(&mut self, cx: i32, cy: i32, name: &str) -> u32 {
        commands::create_particles_with_brush(self, cx, cy, name)
    }

    pub fn erase_in_radius(&mut self, cx: i32, cy: i32, radius: i32) -> u32 {
        commands::erase_in_radius(self, cx, cy, radius)
    }

    pub fn toggle_switch(&mut self, x: i32, y: i32) -> bool {
        commands::toggle_switch(self, x, y)
    }

    pub fn clear(&mut self) {
        commands::clear(self)
    }

    /// Reallocate the grid. Contents are discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        commands::resize(self, width, height)
    }

    // === Selection and tools ===

    pub fn select_element(&mut self, name: &str) -> bool {
        commands::select_element(self, name)
    }

    pub fn select_tool(&mut self, name: &str) -> bool {
        commands::select_tool(self, name)
    }

    pub fn deselect_tools(&mut self) {
        self.tools.deselect_all();
    }

    pub fn set_tool_applying(&mut self, applying: bool) {
        settings::set_tool_applying(self, applying)
    }

    pub fn set_tool_strength(&mut self, strength: u32) {
        settings::set_tool_strength(self, strength)
    }

    pub fn set_wind_direction(&mut self, direction: WindDirection) {
        settings::set_wind_direction(self, direction)
    }

    pub fn get_all_environmental_tools(&self) -> Vec<ToolInfo> {
        self.tools.get_all_environmental_tools()
    }

    pub fn get_environmental_tool(&self, name: &str) -> Option<ToolInfo> {
        self.tools.get_environmental_tool(name)
    }

    // === Settings ===

    pub fn set_paused(&mut self, paused: bool) {
        settings::set_paused(self, paused)
    }

    pub fn is_paused(&self) -> bool {
        self.config.paused
    }

    pub fn set_brush_size(&mut self, size: u32) {
        settings::set_brush_size(self, size)
    }

    pub fn set_override_mode(&mut self, enabled: bool) {
        settings::set_override_mode(self, enabled)
    }

    pub fn set_no_boundaries(&mut self, enabled: bool) {
        settings::set_no_boundaries(self, enabled)
    }

    pub fn set_enable_shadows(&mut self, enabled: bool) {
        settings::set_enable_shadows(self, enabled)
    }

    pub fn set_show_sleeping_particles(&mut self, enabled: bool) {
        settings::set_show_sleeping_particles(self, enabled)
    }

    pub fn set_target_fps(&mut self, fps: u32) {
        settings::set_target_fps(self, fps)
    }

    pub fn set_cursor(&mut self, x: i32, y: i32) {
        settings::set_cursor(self, Some((x, y)))
    }

    pub fn clear_cursor(&mut self) {
        settings::set_cursor(self, None)
    }

    // === Persistence ===

    pub fn ui_state(&self) -> UiState {
        save::ui_state(self)
    }

    pub fn save_file(&self) -> SaveFile {
        save::save_file(self)
    }

    /// Serialise grid, UI state and metadata. Queues a notification.
    pub fn export_json(&mut self) -> Result<String, SaveError> {
        save::export_json(self)
    }

    /// Replace the grid from a save payload. On error the world is untouched.
    pub fn import_json(&mut self, json: &str) -> Result<ImportSummary, SaveError> {
        save::import_json(self, json)
    }

    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        notifications::push(self, message.into(), severity)
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        notifications::drain(self)
    }

    // === Rendering ===

    /// Fill `out` (row-major, one ABGR pixel per cell). Returns pixels written.
    pub fn render_into(&self, out: &mut [u32]) -> usize {
        render::render_into(self, out)
    }

    /// Render into the world's own pixel buffer
    pub fn render(&mut self) -> &[u32] {
        render::render(self)
    }
}
