//! Combustion - shared burn cycle for flammable materials.
//!
//! A particle ignites at its ignition temperature or, with a per-tick chance,
//! when touching a flame or another burning particle. `burn_duration` counts
//! ticks spent burning; the particle turns into its residue when it reaches
//! the profile's limit.

use crate::core::error::BehaviorError;
use crate::domain::elements::ElementKind;
use crate::domain::particle::Particle;
use crate::systems::behaviors::{UpdateContext, NEIGHBORS_8};

#[derive(Debug, Clone, Copy)]
pub struct BurnProfile {
    pub ignition_temp: f32,
    pub contact_chance: f32,
    pub burn_ticks: i32,
    pub heat_gain: f32,
    pub max_temp: f32,
    pub fire_chance: f32,
    pub smoke_chance: f32,
    pub residue: Option<ElementKind>,
    pub waterproof: bool,
}

impl BurnProfile {
    pub const fn new(ignition_temp: f32, burn_ticks: i32, residue: Option<ElementKind>) -> Self {
        Self {
            ignition_temp,
            contact_chance: 0.1,
            burn_ticks,
            heat_gain: 2.0,
            max_temp: 600.0,
            fire_chance: 0.1,
            smoke_chance: 0.05,
            residue,
            waterproof: false,
        }
    }

    pub const fn fire(mut self, chance: f32) -> Self {
        self.fire_chance = chance;
        self
    }

    pub const fn smoke(mut self, chance: f32) -> Self {
        self.smoke_chance = chance;
        self
    }

    pub const fn heat(mut self, gain: f32, max: f32) -> Self {
        self.heat_gain = gain;
        self.max_temp = max;
        self
    }

    pub const fn contact(mut self, chance: f32) -> Self {
        self.contact_chance = chance;
        self
    }

    pub const fn waterproof(mut self) -> Self {
        self.waterproof = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Burn {
    Idle,
    Burning,
    /// The particle is gone; the caller must return
    Consumed,
}

/// Light a particle. Already-burning particles keep their progress.
#[inline]
pub fn ignite(p: &mut Particle) {
    if !p.burning {
        p.burning = true;
        p.burn_duration = 0;
    }
}

pub fn burn(ctx: &mut UpdateContext, profile: &BurnProfile) -> Result<Burn, BehaviorError> {
    let p = ctx.particle()?;
    if !p.burning {
        let hot = p.temperature >= profile.ignition_temp;
        let touching = ctx.any_neighbor(|n| n.is_hot_source());
        if hot || (touching && ctx.chance(profile.contact_chance)) {
            ignite(ctx.particle_mut()?);
        } else {
            return Ok(Burn::Idle);
        }
    }

    if !profile.waterproof {
        let water = ctx.neighbors_where(|n| n.is(ElementKind::Water));
        if !water.is_empty() && ctx.chance(0.3) {
            for (dx, dy) in water {
                if ctx.chance(0.2) {
                    ctx.set(dx, dy, ElementKind::Steam);
                }
            }
            let p = ctx.particle_mut()?;
            p.burning = false;
            p.burn_duration = 0;
            p.temperature = (p.temperature - 50.0).max(25.0);
            return Ok(Burn::Idle);
        }
    }

    let p = ctx.particle_mut()?;
    p.temperature = (p.temperature + profile.heat_gain).min(profile.max_temp);
    p.burn_duration += 1;
    let (temp, elapsed) = (p.temperature, p.burn_duration);

    if ctx.chance(profile.fire_chance) {
        let dx = ctx.rng.range(-1, 1);
        ctx.spawn_with(dx, -1, ElementKind::Fire, |f| f.temperature = f.temperature.max(temp));
    }
    if ctx.chance(profile.smoke_chance) {
        let dx = ctx.rng.range(-1, 1);
        ctx.spawn(dx, -1, ElementKind::Smoke);
    }
    for (dx, dy) in NEIGHBORS_8 {
        if let Some(n) = ctx.get_mut(dx, dy) {
            if n.flammable && !n.burning {
                n.temperature += 2.0;
            }
        }
    }

    if elapsed >= profile.burn_ticks {
        match profile.residue {
            Some(kind) => {
                ctx.transform_with(kind, |r| r.temperature = temp * 0.8);
            }
            None => ctx.remove_self(),
        }
        return Ok(Burn::Consumed);
    }
    Ok(Burn::Burning)
}
