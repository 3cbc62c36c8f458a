use std::collections::VecDeque;

use crate::core::utils::random::Rng;
use crate::domain::content::ElementRegistry;
use crate::spatial::grid::Grid;
use crate::systems::tools::ToolRegistry;

use super::frame_limiter::FrameLimiter;
use super::perf_stats::PerfStats;
use super::{SimulationConfig, WorldCore};

pub(super) fn create_world_core(width: u32, height: u32, registry: ElementRegistry, seed: u32) -> WorldCore {
    let config = SimulationConfig { seed, ..SimulationConfig::default() };
    WorldCore {
        grid: Grid::new(width, height),
        registry,
        tools: ToolRegistry::with_builtin(),
        frame_limiter: FrameLimiter::new(config.target_fps),
        rng: Rng::new(seed),
        config,
        tick: 0,
        notifications: VecDeque::new(),
        perf_stats: PerfStats::default(),
        pixels: vec![0u32; (width as usize) * (height as usize)],
    }
}
