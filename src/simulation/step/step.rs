use crate::systems::tools::ToolContext;

use super::perf_timer::PerfTimer;
use super::{gravity, phenomena, sweep, WorldCore};

/// Tool applications per tick while the pointer is held
const TOOL_APPLICATIONS: u32 = 3;

pub(super) fn step(world: &mut WorldCore) -> bool {
    if world.config.paused {
        return false;
    }
    let timer = PerfTimer::start();
    world.tick += 1;
    world.perf_stats.reset();

    world.perf_stats.tool_applications = tool_pass(world);

    let swept = sweep::sweep(world);
    world.perf_stats.particles_processed = swept.processed;
    world.perf_stats.behavior_failures = swept.failures;

    world.perf_stats.gravity_drops = gravity::residual_gravity(world);
    world.perf_stats.boundary_removals = phenomena::boundaries(world);

    world.perf_stats.tick = world.tick;
    world.perf_stats.particle_count = world.grid.particle_count() as u32;
    world.perf_stats.grid_size = world.grid.size() as u32;
    world.perf_stats.step_ms = timer.elapsed_ms();
    true
}

pub(super) fn frame(world: &mut WorldCore, now_ms: f64) -> bool {
    if world.config.paused || !world.frame_limiter.accept(now_ms) {
        return false;
    }
    step(world)
}

/// Apply the active tool around the cursor, jittered by one cell per application
fn tool_pass(world: &mut WorldCore) -> u32 {
    if !world.tools.any_active() || world.grid.size() == 0 {
        return 0;
    }
    let Some((cx, cy)) = world.config.cursor else {
        return 0;
    };
    let radius = world.config.brush_radius();
    let mut applied = 0;
    for _ in 0..TOOL_APPLICATIONS {
        let x = (cx + world.rng.range(-1, 1)).clamp(0, world.grid.width() as i32 - 1);
        let y = (cy + world.rng.range(-1, 1)).clamp(0, world.grid.height() as i32 - 1);
        let mut ctx = ToolContext {
            grid: &mut world.grid,
            registry: &world.registry,
            rng: &mut world.rng,
            tick: world.tick,
        };
        applied += world.tools.apply_active(&mut ctx, x, y, radius);
    }
    applied
}
