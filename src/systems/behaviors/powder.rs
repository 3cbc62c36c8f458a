//! Powders - fall straight down, then diagonally, sinking through gases and
//! lighter liquids.

use super::{fall_powder, stacked_above, ElementBehavior, UpdateContext};
use crate::core::error::BehaviorError;
use crate::core::utils::random::Rng;
use crate::domain::elements::ElementKind;
use crate::domain::particle::{ElementState, Particle};
use crate::systems::temperature::{conduct, relax};

pub(super) fn all() -> Vec<Box<dyn ElementBehavior>> {
    vec![
        Box::new(Sand),
        Box::new(Salt),
        Box::new(Snow),
        Box::new(Ash),
        Box::new(GlassShard),
        Box::new(Debris),
        Box::new(Bacteria),
    ]
}

/// Fall, then exchange heat. Returns whether the particle moved.
pub(super) fn settle(ctx: &mut UpdateContext) -> Result<bool, BehaviorError> {
    let moved = fall_powder(ctx)?;
    conduct(ctx)?;
    Ok(moved)
}

/// Slide sideways into an empty cell that has room to drop below it
fn slide(ctx: &mut UpdateContext, chance: f32) -> bool {
    if !ctx.chance(chance) {
        return false;
    }
    let (a, b) = ctx.rng.sides();
    for dx in [a, b] {
        if ctx.is_empty(dx, 0) && ctx.is_empty(dx, 1) {
            return ctx.move_by(dx, 0);
        }
    }
    false
}

pub struct Sand;

impl ElementBehavior for Sand {
    fn kind(&self) -> ElementKind {
        ElementKind::Sand
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        settle(ctx)?;
        if ctx.particle()?.temperature > 1500.0 {
            ctx.transform(ElementKind::Glass);
        }
        Ok(())
    }
}

pub struct Salt;

impl ElementBehavior for Salt {
    fn kind(&self) -> ElementKind {
        ElementKind::Salt
    }

    fn on_create(&self, p: &mut Particle, _rng: &mut Rng) {
        p.state = ElementState::Salt { compression: 0.0 };
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        let moved = settle(ctx)?;
        if ctx.any_neighbor(|n| n.is(ElementKind::Water)) && ctx.chance(0.01) {
            ctx.remove_self();
            return Ok(());
        }
        let piled = !moved && stacked_above(ctx, 4) >= 4;
        let p = ctx.particle_mut()?;
        let ElementState::Salt { compression } = &mut p.state else {
            return Err(ctx.mismatch());
        };
        if piled {
            *compression += 0.01;
        } else {
            *compression = (*compression - 0.005).max(0.0);
        }
        if *compression >= 1.0 {
            ctx.transform(ElementKind::SolidSalt);
        }
        Ok(())
    }
}

pub struct Snow;

impl ElementBehavior for Snow {
    fn kind(&self) -> ElementKind {
        ElementKind::Snow
    }

    fn on_create(&self, p: &mut Particle, _rng: &mut Rng) {
        p.state = ElementState::Snow { wetness: 0.0 };
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        if !settle(ctx)? {
            slide(ctx, 0.3);
        }
        let near_fire = ctx.any_neighbor(|n| n.is_hot_source());
        let temp = ctx.particle()?.temperature;
        if (near_fire || temp > 80.0) && ctx.chance(0.8) {
            ctx.transform(ElementKind::Water);
            return Ok(());
        }
        if temp < -10.0 && ctx.chance(0.05) {
            ctx.transform(ElementKind::Ice);
            return Ok(());
        }
        let p = ctx.particle_mut()?;
        let ElementState::Snow { wetness } = &mut p.state else {
            return Err(ctx.mismatch());
        };
        if temp > 2.0 {
            *wetness += 0.01 * (temp - 1.0);
            if *wetness >= 1.0 {
                ctx.transform(ElementKind::Water);
            }
        }
        Ok(())
    }
}

pub struct Ash;

impl ElementBehavior for Ash {
    fn kind(&self) -> ElementKind {
        ElementKind::Ash
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        let moved = fall_powder(ctx)?;
        relax(ctx.particle_mut()?, 25.0, 0.5);
        if ctx.any_neighbor(|n| n.is(ElementKind::Water)) && ctx.chance(0.02) {
            ctx.transform(ElementKind::Sludge);
            return Ok(());
        }
        let piled = !moved && stacked_above(ctx, 4) >= 4;
        let p = ctx.particle_mut()?;
        if piled {
            p.stable_counter += 1;
            if p.stable_counter >= 200 {
                ctx.transform(ElementKind::SolidAsh);
            }
        } else {
            p.stable_counter = 0;
        }
        Ok(())
    }
}

pub struct GlassShard;

impl ElementBehavior for GlassShard {
    fn kind(&self) -> ElementKind {
        ElementKind::GlassShard
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        if !settle(ctx)? {
            slide(ctx, 0.2);
        }
        Ok(())
    }
}

pub struct Debris;

impl ElementBehavior for Debris {
    fn kind(&self) -> ElementKind {
        ElementKind::Debris
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        if !settle(ctx)? {
            slide(ctx, 0.1);
        }
        Ok(())
    }
}

pub struct Bacteria;

impl Bacteria {
    const START_ENERGY: f32 = 100.0;
}

impl ElementBehavior for Bacteria {
    fn kind(&self) -> ElementKind {
        ElementKind::Bacteria
    }

    fn on_create(&self, p: &mut Particle, _rng: &mut Rng) {
        p.state = ElementState::Bacteria { energy: Self::START_ENERGY, age: 0 };
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        settle(ctx)?;

        let temp = ctx.particle()?.temperature;
        let p = ctx.particle_mut()?;
        let ElementState::Bacteria { energy, age } = &mut p.state else {
            return Err(ctx.mismatch());
        };
        *age += 1;
        *energy -= 0.1;
        let (mut e, a) = (*energy, *age);

        if e <= 0.0 || temp > 60.0 || (a > 1000 && ctx.chance(0.1)) {
            ctx.remove_self();
            return Ok(());
        }

        let food = ctx.neighbors_where(|n| n.is(ElementKind::Plant) || n.is(ElementKind::Wood));
        if let Some(&(dx, dy)) = food.first() {
            if ctx.chance(0.05) {
                ctx.remove(dx, dy);
                e += 10.0;
                if ctx.chance(0.1) {
                    ctx.spawn(dx, dy, ElementKind::Bacteria);
                }
            }
        }

        if e > 150.0 && ctx.chance(0.2) {
            let empty = ctx.empty_neighbors();
            if !empty.is_empty() {
                let (dx, dy) = empty[ctx.rng.range(0, empty.len() as i32 - 1) as usize];
                let half = e / 2.0;
                if ctx.spawn_with(dx, dy, ElementKind::Bacteria, |child| {
                    child.state = ElementState::Bacteria { energy: half, age: 0 };
                }) {
                    e = half;
                }
            }
        }

        if let ElementState::Bacteria { energy, .. } = &mut ctx.particle_mut()?.state {
            *energy = e;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::behaviors::process_at as run;
    use crate::domain::content::ElementRegistry;
    use crate::spatial::grid::Grid;

    #[test]
    fn sand_falls_into_empty_cell() {
        let registry = ElementRegistry::with_builtin();
        let mut grid = Grid::new(5, 5);
        let sand = registry.create(ElementKind::Sand, &mut Rng::new(1)).unwrap();
        grid.insert(2, 0, sand).unwrap();
        assert_eq!(run(&mut grid, &registry, 2, 0, 1).unwrap(), (2, 1));
        assert!(grid.is_empty(2, 0));
    }

    #[test]
    fn sand_sinks_through_water() {
        let registry = ElementRegistry::with_builtin();
        let mut grid = Grid::new(3, 3);
        let mut rng = Rng::new(3);
        grid.insert(1, 1, registry.create(ElementKind::Sand, &mut rng).unwrap()).unwrap();
        grid.insert(1, 2, registry.create(ElementKind::Water, &mut rng).unwrap()).unwrap();
        run(&mut grid, &registry, 1, 1, 1).unwrap();
        assert_eq!(grid.get(1, 2).map(|p| p.kind), Some(ElementKind::Sand));
        assert_eq!(grid.get(1, 1).map(|p| p.kind), Some(ElementKind::Water));
    }

    #[test]
    fn sand_vitrifies_when_very_hot() {
        let registry = ElementRegistry::with_builtin();
        let mut grid = Grid::new(3, 1);
        let mut sand = registry.create(ElementKind::Sand, &mut Rng::new(1)).unwrap();
        sand.temperature = 1600.0;
        grid.insert(1, 0, sand).unwrap();
        run(&mut grid, &registry, 1, 0, 1).unwrap();
        assert_eq!(grid.get(1, 0).map(|p| p.kind), Some(ElementKind::Glass));
    }

    #[test]
    fn hot_bacteria_die() {
        let registry = ElementRegistry::with_builtin();
        let mut grid = Grid::new(3, 1);
        let mut b = registry.create(ElementKind::Bacteria, &mut Rng::new(1)).unwrap();
        b.temperature = 90.0;
        grid.insert(1, 0, b).unwrap();
        run(&mut grid, &registry, 1, 0, 1).unwrap();
        assert_eq!(grid.particle_count(), 0);
    }

    #[test]
    fn bacteria_with_foreign_state_reports_mismatch() {
        let registry = ElementRegistry::with_builtin();
        let mut grid = Grid::new(3, 1);
        let mut b = registry.create(ElementKind::Bacteria, &mut Rng::new(1)).unwrap();
        b.state = ElementState::Inert;
        grid.insert(1, 0, b).unwrap();
        let err = run(&mut grid, &registry, 1, 0, 1).unwrap_err();
        assert_eq!(err, BehaviorError::StateMismatch { kind: ElementKind::Bacteria });
    }
}
