//! Fuse - unlit, burning, ash.
//!
//! A burning fuse passes its flame on once, a quarter of the way through its
//! burn, so a line of fuse lights strictly in order.

use super::{drop_unsupported, ElementBehavior, UpdateContext, CARDINALS, NEIGHBORS_8};
use crate::core::error::BehaviorError;
use crate::core::utils::color::{blend, rgb};
use crate::core::utils::random::Rng;
use crate::domain::elements::ElementKind;
use crate::domain::particle::{ElementState, FuseState, Particle};
use crate::systems::combustion::ignite;
use crate::systems::temperature::conduct;

pub(super) fn all() -> Vec<Box<dyn ElementBehavior>> {
    vec![Box::new(Fuse)]
}

const BURN_RATE: f32 = 0.01;
const SPREAD_AT: f32 = 0.25;
const MAX_TEMP: f32 = 300.0;

const DIAGONALS: [(i32, i32); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

pub struct Fuse;

impl Fuse {
    fn state(ctx: &UpdateContext) -> Result<FuseState, BehaviorError> {
        match ctx.particle()?.state {
            ElementState::Fuse(s) => Ok(s),
            _ => Err(ctx.mismatch()),
        }
    }

    fn catches(ctx: &UpdateContext) -> Result<bool, BehaviorError> {
        if ctx.particle()?.temperature >= 150.0 {
            return Ok(true);
        }
        Ok(ctx.any_neighbor(|n| !n.is(ElementKind::Fuse) && (n.kind.is_flame() || n.temperature > 200.0)))
    }

    /// Light unlit neighbouring fuse, cardinals first. Returns whether anything caught.
    fn spread(ctx: &mut UpdateContext) -> bool {
        for ring in [&CARDINALS[..], &DIAGONALS[..]] {
            let mut lit = false;
            for &(dx, dy) in ring {
                if let Some(n) = ctx.get_mut(dx, dy) {
                    if n.is(ElementKind::Fuse) && !n.burning {
                        ignite(n);
                        if let ElementState::Fuse(s) = &mut n.state {
                            s.direction = Some((-dx as i8, -dy as i8));
                        }
                        lit = true;
                    }
                }
            }
            if lit {
                return true;
            }
        }
        false
    }
}

impl ElementBehavior for Fuse {
    fn kind(&self) -> ElementKind {
        ElementKind::Fuse
    }

    fn on_create(&self, p: &mut Particle, _rng: &mut Rng) {
        p.state = ElementState::Fuse(FuseState { progress: 0.0, direction: None, spread: false });
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        let mut state = Self::state(ctx)?;

        // Lit or not, a fuse with nothing under it drops first
        if drop_unsupported(ctx) {
            return Ok(());
        }

        if !ctx.particle()?.burning {
            conduct(ctx)?;
            if Self::catches(ctx)? {
                ignite(ctx.particle_mut()?);
            }
            return Ok(());
        }

        state.progress += BURN_RATE;
        let p = ctx.particle_mut()?;
        p.temperature = (p.temperature + 2.0).min(MAX_TEMP);
        if ctx.chance(0.05) {
            ctx.spawn(0, -1, ElementKind::Smoke);
        }

        if state.progress >= 1.0 {
            for (dx, dy) in NEIGHBORS_8 {
                if let Some(n) = ctx.get_mut(dx, dy) {
                    n.temperature += 100.0;
                    if n.flammable {
                        ignite(n);
                    }
                }
            }
            ctx.transform(ElementKind::Ash);
            return Ok(());
        }

        if state.progress >= SPREAD_AT && !state.spread {
            Self::spread(ctx);
            state.spread = true;
        }
        ctx.particle_mut()?.state = ElementState::Fuse(state);
        Ok(())
    }

    fn render(&self, particle: &Particle, tick: u64) -> u32 {
        if !particle.burning {
            return particle.color;
        }
        let pulse = if (tick / 3) % 2 == 0 { 0.8 } else { 0.5 };
        blend(particle.color, rgb(255, 160, 40), pulse)
    }
}
