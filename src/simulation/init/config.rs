use serde::{Deserialize, Serialize};

use crate::systems::tools::WindDirection;

pub const MIN_BRUSH: u32 = 1;
pub const MAX_BRUSH: u32 = 50;

/// Everything the host used to keep in globals: run state, brush and toggles
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub paused: bool,
    /// Brush diameter; the disc radius is half of it
    pub brush_size: u32,
    /// Place over occupied cells
    pub override_mode: bool,
    /// Particles fall out of the bottom and gases escape from the top
    pub no_boundaries: bool,
    pub current_element: String,
    pub enable_shadows: bool,
    pub show_sleeping_particles: bool,
    pub target_fps: u32,
    /// Last known pointer cell
    pub cursor: Option<(i32, i32)>,
    pub seed: u32,
}

impl SimulationConfig {
    #[inline]
    pub fn brush_radius(&self) -> i32 {
        (self.brush_size / 2) as i32
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            paused: false,
            brush_size: 5,
            override_mode: false,
            no_boundaries: false,
            current_element: "sand".to_string(),
            enable_shadows: false,
            show_sleeping_particles: false,
            target_fps: 60,
            cursor: None,
            seed: 12345,
        }
    }
}

/// The `ui` section of a save file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UiState {
    pub current_element: String,
    pub brush_size: u32,
    pub paused: bool,
    pub current_env_tool: Option<String>,
    pub wind_direction: WindDirection,
    pub env_tool_strength: u32,
    pub no_boundaries: bool,
    pub override_gravity: bool,
    pub enable_shadows: bool,
    pub show_sleeping_particles: bool,
}

impl Default for UiState {
    fn default() -> Self {
        let config = SimulationConfig::default();
        Self {
            current_element: config.current_element,
            brush_size: config.brush_size,
            paused: false,
            current_env_tool: None,
            wind_direction: WindDirection::default(),
            env_tool_strength: 5,
            no_boundaries: false,
            override_gravity: false,
            enable_shadows: false,
            show_sleeping_particles: false,
        }
    }
}
