//! Growing solids - plants spread while fed and watered, crystals grow
//! faster in the cold.

use super::{ElementBehavior, UpdateContext};
use crate::core::error::BehaviorError;
use crate::core::utils::random::Rng;
use crate::domain::elements::ElementKind;
use crate::domain::particle::{ElementState, Particle, PlantState};
use crate::systems::combustion::{burn, Burn, BurnProfile};
use crate::systems::temperature::conduct;

pub(super) fn all() -> Vec<Box<dyn ElementBehavior>> {
    vec![Box::new(Plant), Box::new(Crystal)]
}

const PLANT_BURN: BurnProfile = BurnProfile::new(100.0, 60, Some(ElementKind::Ash)).fire(0.2).contact(0.2);

/// Up, the two sides, then the upper diagonals
const GROWTH_SPOTS: [(i32, i32); 5] = [(0, -1), (-1, 0), (1, 0), (-1, -1), (1, -1)];

pub struct Plant;

impl ElementBehavior for Plant {
    fn kind(&self) -> ElementKind {
        ElementKind::Plant
    }

    fn on_create(&self, p: &mut Particle, _rng: &mut Rng) {
        p.state = ElementState::Plant(PlantState { hydration: 50.0, nutrition: 0.0, growth: 0.0 });
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        let temp = conduct(ctx)?;
        if burn(ctx, &PLANT_BURN)? != Burn::Idle {
            return Ok(());
        }

        let ElementState::Plant(mut state) = ctx.particle()?.state else {
            return Err(ctx.mismatch());
        };

        if state.hydration < 100.0 {
            let water = ctx.neighbors_where(|n| n.is(ElementKind::Water));
            if let Some(&(dx, dy)) = water.first() {
                if ctx.chance(0.05) {
                    ctx.remove(dx, dy);
                    state.hydration = (state.hydration + 20.0).min(100.0);
                }
            }
        }

        if temp >= 0.0 && state.hydration > 10.0 {
            state.growth += 0.002 * (1.0 + state.nutrition / 50.0);
            state.hydration -= 0.05;
            state.nutrition = (state.nutrition - 0.02).max(0.0);
        }

        if state.growth >= 1.0 {
            let open: Vec<(i32, i32)> = GROWTH_SPOTS.iter().copied().filter(|&(dx, dy)| ctx.is_empty(dx, dy)).collect();
            if !open.is_empty() {
                let (dx, dy) = open[ctx.rng.range(0, open.len() as i32 - 1) as usize];
                let hydration = state.hydration / 2.0;
                if ctx.spawn_with(dx, dy, ElementKind::Plant, |child| {
                    child.state = ElementState::Plant(PlantState { hydration, nutrition: 0.0, growth: 0.0 });
                }) {
                    state.hydration = hydration;
                    state.growth = 0.0;
                }
            }
        }

        ctx.particle_mut()?.state = ElementState::Plant(state);
        Ok(())
    }
}

pub struct Crystal;

impl ElementBehavior for Crystal {
    fn kind(&self) -> ElementKind {
        ElementKind::Crystal
    }

    fn on_create(&self, p: &mut Particle, rng: &mut Rng) {
        p.state = ElementState::Crystal { facets: rng.range(4, 8) as u8, growth: 0.0 };
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        let temp = conduct(ctx)?;
        if temp > 80.0 {
            let p = ctx.particle_mut()?;
            p.durability -= 0.01 * (temp - 80.0) / 20.0;
            if p.durability <= 0.0 {
                ctx.transform_with(ElementKind::GlassShard, |s| s.temperature = temp);
            }
            return Ok(());
        }

        let crowded = ctx.count_neighbors(|n| n.is(ElementKind::Crystal)) >= 3;
        let rate = if temp < 0.0 { 0.005 } else { 0.002 };
        let ElementState::Crystal { growth, .. } = &mut ctx.particle_mut()?.state else {
            return Err(ctx.mismatch());
        };
        if crowded {
            return Ok(());
        }
        *growth += rate;
        if *growth < 1.0 {
            return Ok(());
        }
        *growth = 0.0;

        let open = ctx.empty_neighbors();
        if !open.is_empty() {
            let (dx, dy) = open[ctx.rng.range(0, open.len() as i32 - 1) as usize];
            ctx.spawn(dx, dy, ElementKind::Crystal);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::ElementRegistry;
    use crate::spatial::grid::Grid;
    use crate::systems::behaviors::process_at;

    #[test]
    fn ripe_plant_grows_into_open_space() {
        let registry = ElementRegistry::with_builtin();
        let mut grid = Grid::new(3, 3);
        let mut plant = registry.create(ElementKind::Plant, &mut Rng::new(1)).unwrap();
        plant.state = ElementState::Plant(PlantState { hydration: 80.0, nutrition: 0.0, growth: 0.999 });
        grid.insert(1, 2, plant).unwrap();
        process_at(&mut grid, &registry, 1, 2, 1).unwrap();
        assert_eq!(grid.iter().filter(|(_, _, p)| p.is(ElementKind::Plant)).count(), 2);
    }

    #[test]
    fn frozen_plant_does_not_grow() {
        let registry = ElementRegistry::with_builtin();
        let mut grid = Grid::new(3, 3);
        let mut plant = registry.create(ElementKind::Plant, &mut Rng::new(1)).unwrap();
        plant.temperature = -20.0;
        plant.state = ElementState::Plant(PlantState { hydration: 80.0, nutrition: 0.0, growth: 0.999 });
        grid.insert(1, 2, plant).unwrap();
        process_at(&mut grid, &registry, 1, 2, 1).unwrap();
        assert_eq!(grid.particle_count(), 1);
    }

    #[test]
    fn hot_crystal_shatters() {
        let registry = ElementRegistry::with_builtin();
        let mut grid = Grid::new(1, 1);
        let mut crystal = registry.create(ElementKind::Crystal, &mut Rng::new(1)).unwrap();
        crystal.temperature = 1080.0;
        grid.insert(0, 0, crystal).unwrap();
        process_at(&mut grid, &registry, 0, 0, 1).unwrap();
        assert_eq!(grid.get(0, 0).map(|p| p.kind), Some(ElementKind::GlassShard));
    }
}
