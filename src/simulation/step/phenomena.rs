//! Global phenomena: what happens at the world's edges.

use crate::domain::elements::ElementKind;
use crate::domain::particle::Particle;

use super::WorldCore;

const TOP_DRIFT_CHANCE: f32 = 0.1;

/// Falls or drifts out through the floor
fn leaves_bottom(p: &Particle) -> bool {
    p.matter.falls() || p.matter.is_gas || p.is(ElementKind::Fire) || p.kind.is_effect()
}

/// Rises out through the ceiling
fn leaves_top(p: &Particle) -> bool {
    p.matter.is_gas || p.is(ElementKind::HeatEffect) || (p.kind.is_effect() && p.velocity.y < 0.0)
}

/// Returns the number of particles that left the world
pub(super) fn boundaries(world: &mut WorldCore) -> u32 {
    let (w, h) = (world.grid.width() as i32, world.grid.height() as i32);
    if w == 0 || h == 0 {
        return 0;
    }
    let bottom = h - 1;

    if world.config.no_boundaries {
        let mut removed = 0;
        for x in 0..w {
            if world.grid.get(x, bottom).is_some_and(leaves_bottom) {
                world.grid.take(x, bottom);
                removed += 1;
            }
            if world.grid.get(x, 0).is_some_and(leaves_top) {
                world.grid.take(x, 0);
                removed += 1;
            }
        }
        return removed;
    }

    for x in 0..w {
        if !world.grid.get(x, 0).is_some_and(|p| p.matter.is_gas) {
            continue;
        }
        if !world.rng.chance(TOP_DRIFT_CHANCE) {
            continue;
        }
        let dx = if world.rng.coin() { 1 } else { -1 };
        if world.grid.is_empty(x + dx, 0) {
            world.grid.move_particle(x, 0, x + dx, 0);
        }
    }
    0
}
