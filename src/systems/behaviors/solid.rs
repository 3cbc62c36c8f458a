//! Solids - static unless stated. Heat, melting, shattering and burning.

use super::energy::carry_charge;
use super::{can_sink_into, ElementBehavior, UpdateContext};
use crate::core::error::BehaviorError;
use crate::core::utils::color::{blend, rgb};
use crate::core::utils::random::Rng;
use crate::domain::elements::ElementKind;
use crate::domain::particle::{ElementState, Particle};
use crate::systems::combustion::{burn, BurnProfile};
use crate::systems::temperature::{conduct, relax};

pub(super) fn all() -> Vec<Box<dyn ElementBehavior>> {
    vec![
        Box::new(Stone),
        Box::new(Brick),
        Box::new(Metal),
        Box::new(Steel),
        Box::new(Glass),
        Box::new(Wood),
        Box::new(Ice),
        Box::new(SolidSalt),
        Box::new(SolidAsh),
        Box::new(Resin),
    ]
}

const WOOD_BURN: BurnProfile = BurnProfile::new(300.0, 120, Some(ElementKind::SolidAsh)).smoke(0.08);
const RESIN_BURN: BurnProfile = BurnProfile::new(100.0, 200, Some(ElementKind::Ash)).fire(0.15).smoke(0.1);

/// Turn into lava at `threshold` with `chance` per tick, keeping the heat
fn melt(ctx: &mut UpdateContext, temp: f32, threshold: f32, chance: f32) -> bool {
    if temp >= threshold && ctx.chance(chance) {
        ctx.transform_with(ElementKind::Lava, |p| p.temperature = temp);
        return true;
    }
    false
}

/// Dull red to yellow-white between 300° and 1000°
fn glow(particle: &Particle) -> u32 {
    if particle.temperature <= 300.0 {
        return particle.color;
    }
    let t = ((particle.temperature - 300.0) / 700.0).min(1.0);
    blend(particle.color, rgb(255, 120 + (t * 100.0) as u8, 40), t * 0.8)
}

pub struct Stone;

impl ElementBehavior for Stone {
    fn kind(&self) -> ElementKind {
        ElementKind::Stone
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        let temp = conduct(ctx)?;
        melt(ctx, temp, 1200.0, 0.05);
        Ok(())
    }
}

pub struct Brick;

impl ElementBehavior for Brick {
    fn kind(&self) -> ElementKind {
        ElementKind::Brick
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        let temp = conduct(ctx)?;
        melt(ctx, temp, 1800.0, 0.05);
        Ok(())
    }
}

pub struct Metal;

impl ElementBehavior for Metal {
    fn kind(&self) -> ElementKind {
        ElementKind::Metal
    }

    fn on_create(&self, p: &mut Particle, _rng: &mut Rng) {
        p.state = ElementState::Conductor { charge: 0.0 };
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        let density = ctx.particle()?.density;
        let below_solid = ctx.get(0, 1).is_some_and(|n| n.matter.is_solid);
        if !below_solid && can_sink_into(ctx, 0, 1, density) {
            ctx.swap_by(0, 1);
        }
        let temp = conduct(ctx)?;
        if melt(ctx, temp, 1000.0, 0.05) {
            return Ok(());
        }
        carry_charge(ctx)?;
        Ok(())
    }

    fn render(&self, particle: &Particle, _tick: u64) -> u32 {
        glow(particle)
    }
}

pub struct Steel;

impl ElementBehavior for Steel {
    fn kind(&self) -> ElementKind {
        ElementKind::Steel
    }

    fn on_create(&self, p: &mut Particle, _rng: &mut Rng) {
        p.state = ElementState::Conductor { charge: 0.0 };
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        let temp = conduct(ctx)?;
        if melt(ctx, temp, 1500.0, 0.05) {
            return Ok(());
        }
        carry_charge(ctx)?;
        Ok(())
    }

    fn render(&self, particle: &Particle, _tick: u64) -> u32 {
        glow(particle)
    }
}

pub struct Glass;

impl ElementBehavior for Glass {
    fn kind(&self) -> ElementKind {
        ElementKind::Glass
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        let own = ctx.particle()?.temperature;
        let shock = ctx.any_neighbor(|n| {
            (n.temperature > 500.0 || n.temperature < -50.0) && (n.temperature - own).abs() > 400.0
        });
        let temp = conduct(ctx)?;
        if shock {
            let p = ctx.particle_mut()?;
            p.durability -= 0.05;
            if p.durability <= 0.0 {
                ctx.transform_with(ElementKind::GlassShard, |s| s.temperature = temp);
                return Ok(());
            }
        }
        if temp > 1500.0 {
            melt(ctx, temp, 1500.0, 0.05);
        }
        Ok(())
    }
}

pub struct Wood;

impl ElementBehavior for Wood {
    fn kind(&self) -> ElementKind {
        ElementKind::Wood
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        conduct(ctx)?;
        burn(ctx, &WOOD_BURN)?;
        Ok(())
    }
}

pub struct Ice;

impl ElementBehavior for Ice {
    fn kind(&self) -> ElementKind {
        ElementKind::Ice
    }

    fn on_create(&self, p: &mut Particle, _rng: &mut Rng) {
        p.state = ElementState::Ice { melt: 0.0 };
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        let temp = conduct(ctx)?;
        if temp < -2.0 {
            for (dx, dy) in ctx.neighbors_where(|n| n.is(ElementKind::Water)) {
                if ctx.chance(0.02) {
                    ctx.set_with(dx, dy, ElementKind::Ice, |i| i.temperature = temp);
                }
            }
            return Ok(());
        }
        if temp > 0.0 {
            let ElementState::Ice { melt } = &mut ctx.particle_mut()?.state else {
                return Err(ctx.mismatch());
            };
            *melt += temp * 0.01;
            if *melt >= 1.0 {
                ctx.transform_with(ElementKind::Water, |w| w.temperature = temp);
            }
        }
        Ok(())
    }
}

pub struct SolidSalt;

impl ElementBehavior for SolidSalt {
    fn kind(&self) -> ElementKind {
        ElementKind::SolidSalt
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        conduct(ctx)?;
        if ctx.is_empty(0, 1) && ctx.chance(0.1) {
            ctx.transform(ElementKind::Salt);
            return Ok(());
        }
        if ctx.any_neighbor(|n| n.is(ElementKind::Water)) && ctx.chance(0.002) {
            ctx.remove_self();
        }
        Ok(())
    }
}

pub struct SolidAsh;

impl ElementBehavior for SolidAsh {
    fn kind(&self) -> ElementKind {
        ElementKind::SolidAsh
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        let p = ctx.particle_mut()?;
        relax(p, 25.0, 0.5);
        p.stable_counter += 1;
        if p.stable_counter > 30 {
            ctx.transform(ElementKind::Ash);
        }
        Ok(())
    }
}

pub struct Resin;

impl ElementBehavior for Resin {
    fn kind(&self) -> ElementKind {
        ElementKind::Resin
    }

    fn on_create(&self, p: &mut Particle, _rng: &mut Rng) {
        p.state = ElementState::Resin { hardness: 1.0 };
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        let temp = conduct(ctx)?;
        if temp > 200.0 {
            let ElementState::Resin { hardness } = &mut ctx.particle_mut()?.state else {
                return Err(ctx.mismatch());
            };
            *hardness -= 0.01;
            if *hardness <= 0.3 {
                ctx.transform_with(ElementKind::Glue, |g| g.temperature = temp);
                return Ok(());
            }
        }
        burn(ctx, &RESIN_BURN)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::ElementRegistry;
    use crate::spatial::grid::Grid;
    use crate::systems::behaviors::process_at;

    fn place(grid: &mut Grid, registry: &ElementRegistry, kind: ElementKind, x: i32, y: i32) {
        let p = registry.create(kind, &mut Rng::new(5)).unwrap();
        grid.insert(x, y, p).unwrap();
    }

    #[test]
    fn stone_conducts_toward_neighbours() {
        let registry = ElementRegistry::with_builtin();
        let mut grid = Grid::new(2, 1);
        place(&mut grid, &registry, ElementKind::Stone, 0, 0);
        place(&mut grid, &registry, ElementKind::Stone, 1, 0);
        grid.get_mut(1, 0).unwrap().temperature = 125.0;
        process_at(&mut grid, &registry, 0, 0, 1).unwrap();
        assert_eq!(grid.get(0, 0).map(|p| p.temperature), Some(35.0));
    }

    #[test]
    fn warm_ice_melts_eventually() {
        let registry = ElementRegistry::with_builtin();
        let mut grid = Grid::new(1, 1);
        place(&mut grid, &registry, ElementKind::Ice, 0, 0);
        grid.get_mut(0, 0).unwrap().temperature = 50.0;
        process_at(&mut grid, &registry, 0, 0, 1).unwrap();
        process_at(&mut grid, &registry, 0, 0, 2).unwrap();
        assert_eq!(grid.get(0, 0).map(|p| p.kind), Some(ElementKind::Water));
    }

    #[test]
    fn metal_sinks_through_water() {
        let registry = ElementRegistry::with_builtin();
        let mut grid = Grid::new(1, 2);
        place(&mut grid, &registry, ElementKind::Metal, 0, 0);
        place(&mut grid, &registry, ElementKind::Water, 0, 1);
        assert_eq!(process_at(&mut grid, &registry, 0, 0, 1).unwrap(), (0, 1));
    }

    #[test]
    fn wood_burns_down_to_solid_ash() {
        let registry = ElementRegistry::with_builtin();
        let mut grid = Grid::new(1, 1);
        place(&mut grid, &registry, ElementKind::Wood, 0, 0);
        grid.get_mut(0, 0).unwrap().temperature = 350.0;
        for tick in 1..=200 {
            process_at(&mut grid, &registry, 0, 0, tick).unwrap();
            if grid.get(0, 0).map(|p| p.kind) != Some(ElementKind::Wood) {
                break;
            }
        }
        assert_eq!(grid.get(0, 0).map(|p| p.kind), Some(ElementKind::SolidAsh));
    }

    #[test]
    fn solid_ash_crumbles() {
        let registry = ElementRegistry::with_builtin();
        let mut grid = Grid::new(1, 1);
        place(&mut grid, &registry, ElementKind::SolidAsh, 0, 0);
        for tick in 1..=31 {
            process_at(&mut grid, &registry, 0, 0, tick).unwrap();
        }
        assert_eq!(grid.get(0, 0).map(|p| p.kind), Some(ElementKind::Ash));
    }
}
