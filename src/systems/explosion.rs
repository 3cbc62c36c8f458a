//! Explosion - radius-based blast shared by every explosive element.
//!
//! `effect = 1 - dist / radius`. The core band (< 0.3 r) is wiped to fire or
//! nothing, the mid band (< 0.7 r) is damaged or destroyed, the outer band is
//! heated and pushed outward. Explosives caught in a blast are scheduled for
//! the following tick instead of detonating on the spot.

use crate::core::error::BehaviorError;
use crate::domain::elements::ElementKind;
use crate::systems::behaviors::UpdateContext;
use crate::systems::combustion::ignite;

const CORE_BAND: f32 = 0.3;
const MID_BAND: f32 = 0.7;

#[derive(Debug, Clone, Copy)]
pub struct Blast {
    pub radius: f32,
    /// Peak heat added to damaged cells
    pub heat: f32,
    /// What the detonation point turns into
    pub core: ElementKind,
}

impl Blast {
    pub const fn new(radius: f32, heat: f32, core: ElementKind) -> Self {
        Self { radius, heat, core }
    }
}

struct Push {
    dx: i32,
    dy: i32,
    dist: f32,
}

/// Blow up the particle at the context position. Callers return right after.
pub fn detonate(ctx: &mut UpdateContext, blast: &Blast) -> Result<(), BehaviorError> {
    let tick = ctx.tick;
    let r = blast.radius.ceil() as i32;
    let mut pushes = Vec::new();

    ctx.transform(blast.core);

    for dy in -r..=r {
        for dx in -r..=r {
            if (dx == 0 && dy == 0) || !ctx.in_bounds(dx, dy) {
                continue;
            }
            let dist = ((dx * dx + dy * dy) as f32).sqrt();
            if dist >= blast.radius {
                continue;
            }
            let effect = 1.0 - dist / blast.radius;

            if let Some(kind) = ctx.kind_at(dx, dy) {
                if ctx.descriptor_of(kind).is_some_and(|d| d.explosive) {
                    if let Some(charge) = ctx.get_mut(dx, dy).and_then(|p| p.state.charge_mut()) {
                        if charge.scheduled_at.is_none() {
                            charge.scheduled_at = Some(tick);
                        }
                    }
                    continue;
                }
                if kind == ElementKind::Fuse {
                    if let Some(p) = ctx.get_mut(dx, dy) {
                        ignite(p);
                    }
                    continue;
                }
            }

            if dist < blast.radius * CORE_BAND {
                if ctx.chance(0.6) {
                    ctx.set(dx, dy, ElementKind::Fire);
                } else {
                    ctx.remove(dx, dy);
                }
            } else if dist < blast.radius * MID_BAND {
                mid_band(ctx, dx, dy, effect, blast.heat);
            } else if let Some(p) = ctx.get_mut(dx, dy) {
                p.temperature += blast.heat * effect * 0.5;
                if !p.matter.is_solid {
                    pushes.push(Push { dx, dy, dist });
                }
            }
        }
    }

    // Farthest first so pushed cells make room for the ones behind them
    pushes.sort_by(|a, b| b.dist.total_cmp(&a.dist));
    for push in pushes {
        let ox = (push.dx as f32 / push.dist).round() as i32;
        let oy = (push.dy as f32 / push.dist).round() as i32;
        let (fx, fy) = (ctx.x + push.dx, ctx.y + push.dy);
        let (tx, ty) = (fx + ox, fy + oy);
        if ctx.grid.move_particle(fx, fy, tx, ty) {
            if let Some(p) = ctx.grid.get_mut(tx, ty) {
                p.velocity.x = ox as f32 * 2.0;
                p.velocity.y = oy as f32 * 2.0;
            }
        }
    }
    Ok(())
}

fn mid_band(ctx: &mut UpdateContext, dx: i32, dy: i32, effect: f32, heat: f32) {
    let Some(durability) = ctx.get(dx, dy).map(|p| p.durability) else {
        if ctx.chance(effect * 0.5) {
            ctx.spawn(dx, dy, ElementKind::Smoke);
        }
        return;
    };

    if effect > durability {
        if ctx.chance(0.3) {
            ctx.set(dx, dy, ElementKind::Debris);
        } else if ctx.chance(effect * 0.5) {
            ctx.set(dx, dy, ElementKind::Smoke);
        } else {
            ctx.remove(dx, dy);
        }
        return;
    }

    let roll = ctx.random();
    if let Some(p) = ctx.get_mut(dx, dy) {
        p.durability -= effect * 0.5;
        p.temperature += heat * effect;
        if p.flammable && roll < effect {
            ignite(p);
        }
    }
}
