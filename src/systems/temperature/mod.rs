//! Temperature - local heat exchange
//!
//! Each particle relaxes toward the mean temperature of its occupied
//! neighbours at its element's conductivity. Empty cells do not participate.

use crate::core::error::BehaviorError;
use crate::domain::particle::Particle;
use crate::systems::behaviors::{UpdateContext, NEIGHBORS_8};

/// Exchange heat at the element's own conductivity. Returns the new temperature.
pub fn conduct(ctx: &mut UpdateContext) -> Result<f32, BehaviorError> {
    let kind = ctx.particle()?.kind;
    let rate = ctx.descriptor_of(kind).map_or(0.0, |d| d.heat_conductivity);
    conduct_at(ctx, rate)
}

pub fn conduct_at(ctx: &mut UpdateContext, rate: f32) -> Result<f32, BehaviorError> {
    let mut sum = 0.0;
    let mut n = 0u32;
    for (dx, dy) in NEIGHBORS_8 {
        if let Some(p) = ctx.get(dx, dy) {
            sum += p.temperature;
            n += 1;
        }
    }
    let p = ctx.particle_mut()?;
    if n > 0 && rate > 0.0 {
        let mean = sum / n as f32;
        p.temperature += (mean - p.temperature) * rate.clamp(0.0, 1.0);
    }
    Ok(p.temperature)
}

/// Step `p.temperature` toward `target` by at most `step`
pub fn relax(p: &mut Particle, target: f32, step: f32) {
    let diff = target - p.temperature;
    if diff.abs() <= step {
        p.temperature = target;
    } else {
        p.temperature += step * diff.signum();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::elements::{descriptor, ElementKind};

    #[test]
    fn relax_never_overshoots() {
        let mut p = Particle::new(&descriptor(ElementKind::Ash));
        p.temperature = 26.0;
        relax(&mut p, 25.0, 5.0);
        assert_eq!(p.temperature, 25.0);
        p.temperature = 100.0;
        relax(&mut p, 25.0, 0.5);
        assert_eq!(p.temperature, 99.5);
    }
}
