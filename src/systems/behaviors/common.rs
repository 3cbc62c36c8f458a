//! Shared movement rules for powders, liquids and gases.

use super::UpdateContext;
use crate::core::error::BehaviorError;
use crate::core::utils::random::Rng;
use crate::domain::particle::Particle;

pub const NEIGHBORS_8: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Up, right, down, left
pub const CARDINALS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Liquid flow parameters
#[derive(Debug, Clone, Copy)]
pub struct Flow {
    /// Chance per tick to spread sideways when blocked below
    pub spread: f32,
    /// Chance per tick to skip moving entirely
    pub viscosity: f32,
}

impl Flow {
    pub const fn new(spread: f32, viscosity: f32) -> Self {
        Self { spread, viscosity }
    }
}

#[inline]
fn is_trail(p: &Particle) -> bool {
    let m = p.matter;
    !(m.is_gas || m.is_liquid || m.is_powder || m.is_solid)
}

/// Falling mover of `density` may enter the target: empty, a trail, a gas, or a lighter liquid
pub fn can_sink_into(ctx: &UpdateContext, dx: i32, dy: i32, density: f32) -> bool {
    if !ctx.in_bounds(dx, dy) {
        return false;
    }
    match ctx.get(dx, dy) {
        None => true,
        Some(t) => is_trail(t) || t.matter.is_gas || (t.matter.is_liquid && t.density < density),
    }
}

/// Rising mover of `density` may enter the target: empty, a trail, or a heavier gas
pub fn can_rise_into(ctx: &UpdateContext, dx: i32, dy: i32, density: f32) -> bool {
    if !ctx.in_bounds(dx, dy) {
        return false;
    }
    match ctx.get(dx, dy) {
        None => true,
        Some(t) => is_trail(t) || (t.matter.is_gas && t.density > density),
    }
}

/// Down, then the two diagonals in random order. Returns whether it moved.
pub fn fall_powder(ctx: &mut UpdateContext) -> Result<bool, BehaviorError> {
    let density = ctx.particle()?.density;
    if can_sink_into(ctx, 0, 1, density) {
        return Ok(ctx.swap_by(0, 1));
    }
    let (a, b) = ctx.rng.sides();
    for dx in [a, b] {
        if can_sink_into(ctx, dx, 1, density) && ctx.is_empty(dx, 0) {
            return Ok(ctx.swap_by(dx, 1));
        }
    }
    Ok(false)
}

/// Down, diagonals, then sideways with `flow.spread` chance
pub fn flow_liquid(ctx: &mut UpdateContext, flow: Flow) -> Result<bool, BehaviorError> {
    let density = ctx.particle()?.density;
    if flow.viscosity > 0.0 && ctx.chance(flow.viscosity) {
        return Ok(false);
    }
    if can_sink_into(ctx, 0, 1, density) {
        return Ok(ctx.swap_by(0, 1));
    }
    let (a, b) = ctx.rng.sides();
    for dx in [a, b] {
        if can_sink_into(ctx, dx, 1, density) {
            return Ok(ctx.swap_by(dx, 1));
        }
    }
    if ctx.chance(flow.spread) {
        for dx in [a, b] {
            if can_sink_into(ctx, dx, 0, density) {
                return Ok(ctx.swap_by(dx, 0));
            }
        }
    }
    Ok(false)
}

/// Up, up-diagonals, then sideways drift with `drift` chance
pub fn rise_gas(ctx: &mut UpdateContext, drift: f32) -> Result<bool, BehaviorError> {
    let density = ctx.particle()?.density;
    let (a, b) = ctx.rng.sides();
    if ctx.chance(drift) && ctx.is_empty(a, 0) {
        return Ok(ctx.move_by(a, 0));
    }
    if can_rise_into(ctx, 0, -1, density) {
        return Ok(ctx.swap_by(0, -1));
    }
    for dx in [a, b] {
        if can_rise_into(ctx, dx, -1, density) {
            return Ok(ctx.swap_by(dx, -1));
        }
    }
    if ctx.chance(0.5) {
        for dx in [a, b] {
            if ctx.is_empty(dx, 0) {
                return Ok(ctx.move_by(dx, 0));
            }
        }
    }
    Ok(false)
}

/// Fall straight down into an empty cell when nothing holds the particle
pub fn drop_unsupported(ctx: &mut UpdateContext) -> bool {
    ctx.is_empty(0, 1) && ctx.move_by(0, 1)
}

/// Count down the lifetime. Returns true once it has run out.
pub fn expire(ctx: &mut UpdateContext) -> Result<bool, BehaviorError> {
    let p = ctx.particle_mut()?;
    match p.lifetime {
        Some(0) => Ok(true),
        Some(n) => {
            p.lifetime = Some(n - 1);
            Ok(n == 1)
        }
        None => Ok(false),
    }
}

/// Lifetime in `lo..=hi` ticks
pub fn lifetime(p: &mut Particle, rng: &mut Rng, lo: i32, hi: i32) {
    p.lifetime = Some(rng.range(lo, hi) as u32);
}

/// Powders and solids piled straight above this particle, up to `max`
pub fn stacked_above(ctx: &UpdateContext, max: i32) -> i32 {
    let mut n = 0;
    while n < max {
        match ctx.get(0, -(n + 1)) {
            Some(p) if p.matter.is_powder || p.matter.is_solid => n += 1,
            _ => break,
        }
    }
    n
}
