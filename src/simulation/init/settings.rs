use crate::systems::tools::WindDirection;

use super::config::{MAX_BRUSH, MIN_BRUSH};
use super::perf_stats::PerfStats;
use super::WorldCore;

pub(super) fn get_perf_stats(world: &WorldCore) -> PerfStats {
    world.perf_stats.clone()
}

pub(super) fn set_paused(world: &mut WorldCore, paused: bool) {
    world.config.paused = paused;
}

pub(super) fn set_brush_size(world: &mut WorldCore, size: u32) {
    world.config.brush_size = size.clamp(MIN_BRUSH, MAX_BRUSH);
}

pub(super) fn set_override_mode(world: &mut WorldCore, enabled: bool) {
    world.config.override_mode = enabled;
}

pub(super) fn set_no_boundaries(world: &mut WorldCore, enabled: bool) {
    world.config.no_boundaries = enabled;
}

pub(super) fn set_enable_shadows(world: &mut WorldCore, enabled: bool) {
    world.config.enable_shadows = enabled;
}

pub(super) fn set_show_sleeping_particles(world: &mut WorldCore, enabled: bool) {
    world.config.show_sleeping_particles = enabled;
}

pub(super) fn set_target_fps(world: &mut WorldCore, fps: u32) {
    let fps = fps.max(1);
    world.config.target_fps = fps;
    world.frame_limiter.set_target_fps(fps);
}

pub(super) fn set_cursor(world: &mut WorldCore, cursor: Option<(i32, i32)>) {
    world.config.cursor = cursor;
}

pub(super) fn set_tool_strength(world: &mut WorldCore, strength: u32) {
    world.tools.set_strength(strength);
}

pub(super) fn set_wind_direction(world: &mut WorldCore, direction: WindDirection) {
    world.tools.set_direction(direction);
}

pub(super) fn set_tool_applying(world: &mut WorldCore, applying: bool) {
    world.tools.set_applying(applying);
}
