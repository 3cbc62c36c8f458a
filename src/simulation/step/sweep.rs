//! Particle sweep: bottom row first, alternating scan direction per row.

use crate::systems::behaviors::UpdateContext;

use super::WorldCore;

#[derive(Debug, Default, Clone, Copy)]
pub(super) struct SweepCounts {
    pub processed: u32,
    pub failures: u32,
}

pub(super) fn sweep(world: &mut WorldCore) -> SweepCounts {
    let mut counts = SweepCounts::default();
    let (w, h) = (world.grid.width() as i32, world.grid.height() as i32);
    let tick = world.tick;

    for y in (0..h).rev() {
        for i in 0..w {
            let x = if y % 2 == 0 { i } else { w - 1 - i };

            let Some(p) = world.grid.get_mut(x, y) else {
                continue;
            };
            if p.is_processed(tick) {
                continue;
            }
            let kind = p.kind;
            // Unregistered kinds stay unstamped and fall through to residual gravity
            let Some(behavior) = world.registry.behavior(kind) else {
                continue;
            };
            let previous = p.last_tick_processed();
            p.mark_processed(tick);

            let mut ctx = UpdateContext {
                grid: &mut world.grid,
                registry: &world.registry,
                config: &world.config,
                rng: &mut world.rng,
                tick,
                x,
                y,
            };
            match behavior.process(&mut ctx) {
                Ok(()) => counts.processed += 1,
                Err(err) => {
                    let (px, py) = (ctx.x, ctx.y);
                    log::warn!("{kind} at ({x}, {y}) skipped this tick: {err}");
                    counts.failures += 1;
                    if let Some(p) = world.grid.get_mut(px, py) {
                        if p.kind == kind && p.is_processed(tick) {
                            p.restore_stamp(previous);
                        }
                    }
                }
            }
        }
    }
    counts
}
