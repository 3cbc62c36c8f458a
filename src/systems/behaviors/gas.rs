//! Gases - rise, drift sideways, and most of them fade out over a lifetime.

use super::{can_rise_into, expire, lifetime, rise_gas, ElementBehavior, UpdateContext, NEIGHBORS_8};
use crate::core::error::BehaviorError;
use crate::core::utils::color::{blend, rgb};
use crate::core::utils::random::Rng;
use crate::domain::elements::{ElementKind, Matter};
use crate::domain::particle::{ElementState, Particle};
use crate::systems::combustion::ignite;
use crate::systems::temperature::{conduct, relax};

pub(super) fn all() -> Vec<Box<dyn ElementBehavior>> {
    vec![
        Box::new(Smoke),
        Box::new(Steam),
        Box::new(AcidGas),
        Box::new(Fire),
        Box::new(Plasma),
        Box::new(StaticCharge),
        Box::new(Bubble),
        Box::new(Balloon),
    ]
}

/// Cheap per-particle flicker in `0..1` that changes every tick
fn flicker(particle: &Particle, tick: u64) -> f32 {
    let h = (tick as u32).wrapping_mul(0x9E37_79B1) ^ particle.color.wrapping_mul(0x85EB_CA6B);
    (h >> 24) as f32 / 255.0
}

pub struct Smoke;

impl ElementBehavior for Smoke {
    fn kind(&self) -> ElementKind {
        ElementKind::Smoke
    }

    fn on_create(&self, p: &mut Particle, rng: &mut Rng) {
        lifetime(p, rng, 100, 249);
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        if expire(ctx)? {
            ctx.remove_self();
            return Ok(());
        }
        rise_gas(ctx, 0.3)?;
        relax(ctx.particle_mut()?, 25.0, 1.0);
        Ok(())
    }
}

pub struct Steam;

impl ElementBehavior for Steam {
    fn kind(&self) -> ElementKind {
        ElementKind::Steam
    }

    fn on_create(&self, p: &mut Particle, rng: &mut Rng) {
        lifetime(p, rng, 200, 399);
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        if expire(ctx)? {
            if ctx.chance(0.2) {
                ctx.transform(ElementKind::Water);
            } else {
                ctx.remove_self();
            }
            return Ok(());
        }
        rise_gas(ctx, 0.3)?;
        let p = ctx.particle_mut()?;
        p.temperature -= 0.2;
        let temp = p.temperature;
        if temp < 100.0 && ctx.chance((100.0 - temp) * 0.005) {
            ctx.transform_with(ElementKind::Water, |w| w.temperature = temp);
        }
        Ok(())
    }
}

pub struct AcidGas;

impl ElementBehavior for AcidGas {
    fn kind(&self) -> ElementKind {
        ElementKind::AcidGas
    }

    fn on_create(&self, p: &mut Particle, rng: &mut Rng) {
        lifetime(p, rng, 100, 199);
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        if expire(ctx)? {
            ctx.remove_self();
            return Ok(());
        }
        rise_gas(ctx, 0.4)?;

        let registry = ctx.registry;
        let mut cost = 0;
        for (dx, dy) in ctx.neighbors_where(|n| n.matter != Matter::EFFECT && !n.matter.is_gas) {
            let Some(kind) = ctx.kind_at(dx, dy) else {
                continue;
            };
            if kind == ElementKind::Water {
                if ctx.chance(0.05) {
                    ctx.set(dx, dy, ElementKind::Acid);
                }
            } else if !registry.descriptor(kind).map_or(true, |d| d.acid_resistant) && ctx.chance(0.01) {
                ctx.remove(dx, dy);
                cost += 10;
            }
        }
        if cost > 0 {
            let p = ctx.particle_mut()?;
            let left = p.lifetime.unwrap_or(0).saturating_sub(cost);
            p.lifetime = Some(left);
            if left == 0 {
                ctx.remove_self();
            }
        }
        Ok(())
    }
}

pub struct Fire;

impl Fire {
    /// Weighted move: straight up 10, up-diagonals 3, sideways 1
    fn drift(ctx: &mut UpdateContext) -> Result<bool, BehaviorError> {
        const MOVES: [(i32, i32, u32); 5] = [(0, -1, 10), (-1, -1, 3), (1, -1, 3), (-1, 0, 1), (1, 0, 1)];
        let density = ctx.particle()?.density;
        let open: Vec<(i32, i32, u32)> = MOVES
            .iter()
            .copied()
            .filter(|&(dx, dy, _)| can_rise_into(ctx, dx, dy, density))
            .collect();
        let total: u32 = open.iter().map(|m| m.2).sum();
        if total == 0 {
            return Ok(false);
        }
        let mut pick = ctx.rng.next_u32() % total;
        for (dx, dy, w) in open {
            if pick < w {
                return Ok(ctx.swap_by(dx, dy));
            }
            pick -= w;
        }
        Ok(false)
    }
}

impl ElementBehavior for Fire {
    fn kind(&self) -> ElementKind {
        ElementKind::Fire
    }

    fn on_create(&self, p: &mut Particle, rng: &mut Rng) {
        lifetime(p, rng, 100, 199);
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        if expire(ctx)? {
            if ctx.chance(0.1) {
                ctx.transform(ElementKind::Ash);
            } else {
                ctx.remove_self();
            }
            return Ok(());
        }

        let water = ctx.neighbors_where(|n| n.is(ElementKind::Water));
        if !water.is_empty() {
            for (dx, dy) in water {
                if ctx.chance(0.5) {
                    ctx.set(dx, dy, ElementKind::Steam);
                }
            }
            ctx.remove_self();
            return Ok(());
        }

        let p = ctx.particle_mut()?;
        p.temperature = (p.temperature + 0.5).min(800.0);

        for (dx, dy) in NEIGHBORS_8 {
            match ctx.kind_at(dx, dy) {
                Some(ElementKind::Ice) => {
                    ctx.set(dx, dy, ElementKind::Water);
                }
                Some(ElementKind::Oil) => {
                    ctx.set(dx, dy, ElementKind::Fire);
                }
                Some(_) => {
                    let roll = ctx.random();
                    if let Some(n) = ctx.get_mut(dx, dy) {
                        n.temperature += 5.0;
                        if n.flammable && roll < 0.1 {
                            ignite(n);
                        }
                    }
                }
                None => {}
            }
        }

        if ctx.chance(0.1) {
            ctx.spawn(0, -1, ElementKind::Smoke);
        }
        Self::drift(ctx)?;
        Ok(())
    }

    fn render(&self, particle: &Particle, tick: u64) -> u32 {
        blend(particle.color, rgb(255, 220, 80), flicker(particle, tick))
    }
}

pub struct Plasma;

impl ElementBehavior for Plasma {
    fn kind(&self) -> ElementKind {
        ElementKind::Plasma
    }

    fn on_create(&self, p: &mut Particle, rng: &mut Rng) {
        lifetime(p, rng, 10, 29);
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        if expire(ctx)? {
            ctx.remove_self();
            return Ok(());
        }
        for (dx, dy) in NEIGHBORS_8 {
            if let Some(n) = ctx.get_mut(dx, dy) {
                n.temperature += 50.0;
                if n.flammable {
                    ignite(n);
                }
            }
        }
        if rise_gas(ctx, 0.2)? {
            rise_gas(ctx, 0.0)?;
        }
        Ok(())
    }

    fn render(&self, particle: &Particle, tick: u64) -> u32 {
        blend(particle.color, rgb(255, 255, 255), flicker(particle, tick) * 0.7)
    }
}

pub struct StaticCharge;

impl ElementBehavior for StaticCharge {
    fn kind(&self) -> ElementKind {
        ElementKind::StaticCharge
    }

    fn on_create(&self, p: &mut Particle, rng: &mut Rng) {
        lifetime(p, rng, 30, 59);
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        if expire(ctx)? {
            ctx.remove_self();
            return Ok(());
        }
        if ctx.any_neighbor(|n| n.is(ElementKind::Water)) && ctx.chance(0.5) {
            ctx.remove_self();
            return Ok(());
        }

        for (dx, dy) in NEIGHBORS_8 {
            let roll = ctx.random();
            if let Some(n) = ctx.get_mut(dx, dy) {
                n.temperature += 2.0;
                if let ElementState::Conductor { charge } = &mut n.state {
                    *charge = 1.0;
                } else if n.flammable && roll < 0.1 {
                    ignite(n);
                }
            }
        }

        let open = ctx.empty_neighbors();
        if !open.is_empty() {
            let (dx, dy) = open[ctx.rng.range(0, open.len() as i32 - 1) as usize];
            ctx.move_by(dx, dy);
        }
        Ok(())
    }
}

pub struct Bubble;

impl ElementBehavior for Bubble {
    fn kind(&self) -> ElementKind {
        ElementKind::Bubble
    }

    fn on_create(&self, p: &mut Particle, rng: &mut Rng) {
        lifetime(p, rng, 100, 299);
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        if expire(ctx)? {
            ctx.remove_self();
            return Ok(());
        }
        let sharp = ctx.any_neighbor(|n| n.is(ElementKind::GlassShard) || n.is(ElementKind::Wire));
        let hot = ctx.any_neighbor(|n| n.temperature > 100.0);
        if sharp || (hot && ctx.chance(0.2)) {
            ctx.remove_self();
            return Ok(());
        }

        // stable_counter: ticks spent outside any liquid
        let above_liquid = ctx.get(0, -1).is_some_and(|n| n.matter.is_liquid);
        if above_liquid {
            ctx.swap_by(0, -1);
            ctx.particle_mut()?.stable_counter = 0;
            return Ok(());
        }
        rise_gas(ctx, 0.1)?;
        let in_liquid = ctx.any_neighbor(|n| n.matter.is_liquid);
        let p = ctx.particle_mut()?;
        p.stable_counter = if in_liquid { 0 } else { p.stable_counter + 1 };
        if p.stable_counter > 20 {
            ctx.remove_self();
        }
        Ok(())
    }
}

pub struct Balloon;

impl ElementBehavior for Balloon {
    fn kind(&self) -> ElementKind {
        ElementKind::Balloon
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        let temp = conduct(ctx)?;
        let sharp = ctx.any_neighbor(|n| n.is(ElementKind::GlassShard) || n.is(ElementKind::Fire));
        if temp >= 80.0 || sharp {
            ctx.transform(ElementKind::Smoke);
            return Ok(());
        }
        if temp > 5.0 {
            rise_gas(ctx, 0.05)?;
        }
        Ok(())
    }
}
