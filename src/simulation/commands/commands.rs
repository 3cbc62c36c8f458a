use crate::domain::elements::ElementKind;
use crate::domain::particle::ElementState;
use crate::spatial::grid::Grid;

use super::WorldCore;

const ERASER: &str = "eraser";

/// In-bounds cells of the disc `dx² + dy² <= r²`
fn disc(grid: &Grid, cx: i32, cy: i32, r: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
    let r = r.max(0);
    let r2 = r * r;
    (-r..=r)
        .flat_map(move |dy| (-r..=r).map(move |dx| (dx, dy)))
        .filter(move |&(dx, dy)| dx * dx + dy * dy <= r2)
        .map(move |(dx, dy)| (cx + dx, cy + dy))
        .filter(move |&(x, y)| grid.in_bounds(x, y))
}

fn flip_switch(world: &mut WorldCore, x: i32, y: i32) -> bool {
    match world.grid.get_mut(x, y) {
        Some(p) if p.kind == ElementKind::Switch => {
            p.activated = !p.activated;
            if let ElementState::Conductor { charge } = &mut p.state {
                if !p.activated {
                    *charge = 0.0;
                }
            }
            true
        }
        _ => false,
    }
}

/// Registered element for `name`, logging misses
fn resolve(world: &WorldCore, name: &str) -> Option<ElementKind> {
    match ElementKind::from_name(name) {
        Some(kind) if world.registry.is_registered(kind) => Some(kind),
        _ => {
            log::warn!("unknown element '{name}'");
            None
        }
    }
}

pub(super) fn place(world: &mut WorldCore, x: i32, y: i32, name: &str) -> bool {
    if !world.grid.in_bounds(x, y) {
        return false;
    }
    let Some(kind) = resolve(world, name) else {
        return false;
    };
    if !world.config.override_mode && !world.grid.is_empty(x, y) {
        return false;
    }
    let Some(p) = world.registry.create(kind, &mut world.rng) else {
        return false;
    };
    world.grid.replace(x, y, p).is_ok()
}

/// Stamp `name` in a disc of radius `brush_size / 2`. Returns the number of
/// cells changed.
pub(super) fn create_particles_with_brush(world: &mut WorldCore, cx: i32, cy: i32, name: &str) -> u32 {
    if world.tools.any_active() {
        return 0;
    }
    let radius = world.config.brush_radius();
    if name == ERASER {
        return erase_in_radius(world, cx, cy, radius);
    }
    let Some(kind) = resolve(world, name) else {
        return 0;
    };

    let cells: Vec<(i32, i32)> = disc(&world.grid, cx, cy, radius).collect();
    let mut changed = 0;
    for (x, y) in cells {
        if kind == ElementKind::Switch && flip_switch(world, x, y) {
            changed += 1;
            continue;
        }
        let occupied = !world.grid.is_empty(x, y);
        if occupied && (kind == ElementKind::Switch || !world.config.override_mode) {
            continue;
        }
        if let Some(p) = world.registry.create(kind, &mut world.rng) {
            if world.grid.replace(x, y, p).is_ok() {
                changed += 1;
            }
        }
    }
    changed
}

pub(super) fn erase_in_radius(world: &mut WorldCore, cx: i32, cy: i32, radius: i32) -> u32 {
    let cells: Vec<(i32, i32)> = disc(&world.grid, cx, cy, radius).collect();
    cells.into_iter().filter(|&(x, y)| world.grid.take(x, y).is_some()).count() as u32
}

pub(super) fn toggle_switch(world: &mut WorldCore, x: i32, y: i32) -> bool {
    flip_switch(world, x, y)
}

pub(super) fn clear(world: &mut WorldCore) {
    world.grid.clear();
    log::info!("grid cleared");
}

pub(super) fn resize(world: &mut WorldCore, width: u32, height: u32) {
    world.grid = Grid::new(width, height);
    world.pixels = vec![0u32; world.grid.size()];
    log::info!("grid resized to {width}x{height}");
}

/// Make `name` the brush element and drop any selected tool
pub(super) fn select_element(world: &mut WorldCore, name: &str) -> bool {
    if name != ERASER && resolve(world, name).is_none() {
        return false;
    }
    world.config.current_element = name.to_string();
    world.tools.deselect_all();
    true
}

pub(super) fn select_tool(world: &mut WorldCore, name: &str) -> bool {
    world.tools.select(name)
}
