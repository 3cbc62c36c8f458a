//! Utility elements - torch, faucet, eraser and the short-lived visual effect
//! particles the environmental tools leave behind.

use super::{expire, lifetime, ElementBehavior, UpdateContext, CARDINALS};
use crate::core::error::BehaviorError;
use crate::core::utils::color::scale;
use crate::core::utils::random::Rng;
use crate::domain::elements::ElementKind;
use crate::domain::particle::{ElementState, Particle};

pub(super) fn all() -> Vec<Box<dyn ElementBehavior>> {
    vec![
        Box::new(Torch),
        Box::new(Faucet),
        Box::new(Eraser),
        Box::new(Effect(ElementKind::WindEffect)),
        Box::new(Effect(ElementKind::HeatEffect)),
        Box::new(Effect(ElementKind::ColdEffect)),
    ]
}

/// Ticks an extinguished torch waits before relighting
const TORCH_RELIGHT: u64 = 120;

pub struct Torch;

impl ElementBehavior for Torch {
    fn kind(&self) -> ElementKind {
        ElementKind::Torch
    }

    fn on_create(&self, p: &mut Particle, _rng: &mut Rng) {
        p.activated = true;
        p.burning = true;
        p.state = ElementState::Torch { reactivate_at: None };
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        let tick = ctx.tick;
        let ElementState::Torch { reactivate_at } = ctx.particle()?.state else {
            return Err(ctx.mismatch());
        };

        if !ctx.particle()?.activated {
            let due = reactivate_at.is_some_and(|at| tick >= at);
            if due || ctx.any_neighbor(|n| n.is(ElementKind::Fire)) {
                let p = ctx.particle_mut()?;
                p.activated = true;
                p.burning = true;
                p.state = ElementState::Torch { reactivate_at: None };
            }
            return Ok(());
        }

        if ctx.any_neighbor(|n| n.is(ElementKind::Water)) {
            let p = ctx.particle_mut()?;
            p.activated = false;
            p.burning = false;
            p.state = ElementState::Torch { reactivate_at: Some(tick + TORCH_RELIGHT) };
            return Ok(());
        }

        for dy in -2i32..=2 {
            for dx in -2i32..=2 {
                if dx.abs() < 2 && dy.abs() < 2 {
                    continue;
                }
                if ctx.kind_at(dx, dy) == Some(ElementKind::Water) && ctx.chance(0.2) {
                    ctx.set(dx, dy, ElementKind::Steam);
                }
            }
        }

        ctx.heat_neighbors(1.0);
        ctx.particle_mut()?.temperature = 400.0;
        if ctx.chance(0.3) {
            ctx.spawn(0, -1, ElementKind::Fire);
        }
        Ok(())
    }

    fn render(&self, particle: &Particle, _tick: u64) -> u32 {
        if particle.activated {
            particle.color
        } else {
            scale(particle.color, 0.45)
        }
    }
}

pub struct Faucet;

impl ElementBehavior for Faucet {
    fn kind(&self) -> ElementKind {
        ElementKind::Faucet
    }

    fn on_create(&self, p: &mut Particle, _rng: &mut Rng) {
        p.state = ElementState::Faucet { flow_rate: 0.3 };
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        let ElementState::Faucet { flow_rate } = ctx.particle()?.state else {
            return Err(ctx.mismatch());
        };
        let switched_off = CARDINALS
            .iter()
            .any(|&(dx, dy)| ctx.get(dx, dy).is_some_and(|n| n.is(ElementKind::Switch) && !n.activated));
        let on = !switched_off;
        ctx.particle_mut()?.activated = on;
        if on && ctx.chance(flow_rate) {
            ctx.spawn(0, 1, ElementKind::Water);
        }
        Ok(())
    }
}

/// Never persists
pub struct Eraser;

impl ElementBehavior for Eraser {
    fn kind(&self) -> ElementKind {
        ElementKind::Eraser
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        ctx.remove_self();
        Ok(())
    }
}

/// Wind, heat and cold trails: drift along their velocity until blocked or expired
pub struct Effect(pub ElementKind);

impl ElementBehavior for Effect {
    fn kind(&self) -> ElementKind {
        self.0
    }

    fn on_create(&self, p: &mut Particle, rng: &mut Rng) {
        lifetime(p, rng, 10, 25);
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        if expire(ctx)? {
            ctx.remove_self();
            return Ok(());
        }
        let v = ctx.particle()?.velocity;
        let (dx, dy) = (v.x.round() as i32, v.y.round() as i32);
        if dx == 0 && dy == 0 {
            return Ok(());
        }
        if !ctx.move_by(dx, dy) {
            ctx.remove_self();
        }
        Ok(())
    }

    fn render(&self, particle: &Particle, _tick: u64) -> u32 {
        let fade = particle.lifetime.map_or(1.0, |l| (l as f32 / 25.0).clamp(0.3, 1.0));
        scale(particle.color, fade)
    }
}
