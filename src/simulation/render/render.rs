//! Pixel extraction: one ABGR word per cell, row-major.

use crate::core::utils::color::{self, rgb, BG_COLOR};

use super::WorldCore;

const SHADOW_FACTOR: f32 = 0.8;
const SLEEP_TINT: u32 = rgb(40, 80, 220);

pub(super) fn render_into(world: &WorldCore, out: &mut [u32]) -> usize {
    let w = world.grid.width() as i32;
    let n = out.len().min(world.grid.size());
    let shadows = world.config.enable_shadows;
    let sleeping = world.config.show_sleeping_particles && world.tick > 0;

    for (i, px) in out.iter_mut().take(n).enumerate() {
        let (x, y) = ((i as i32) % w, (i as i32) / w);
        let Some(p) = world.grid.get(x, y) else {
            *px = BG_COLOR;
            continue;
        };
        let mut c = world.registry.behavior(p.kind).map_or(p.color, |b| b.render(p, world.tick));
        if shadows && world.grid.get(x, y - 1).is_some() {
            c = color::scale(c, SHADOW_FACTOR);
        }
        // Particles the last sweep did not update
        if sleeping && !p.is_processed(world.tick) {
            c = color::blend(c, SLEEP_TINT, 0.4);
        }
        *px = c;
    }
    n
}

pub(super) fn render(world: &mut WorldCore) -> &[u32] {
    let mut pixels = std::mem::take(&mut world.pixels);
    pixels.resize(world.grid.size(), BG_COLOR);
    render_into(world, &mut pixels);
    world.pixels = pixels;
    &world.pixels
}
