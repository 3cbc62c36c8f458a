//! Liquids - fall, slide diagonally, then spread sideways. Lighter liquids
//! are displaced by heavier ones.

use super::{flow_liquid, ElementBehavior, Flow, UpdateContext};
use crate::core::error::BehaviorError;
use crate::core::utils::random::Rng;
use crate::domain::content::ElementRegistry;
use crate::domain::elements::{ElementKind, Matter};
use crate::domain::particle::{ElementState, Particle};
use crate::systems::combustion::{burn, ignite, BurnProfile};
use crate::systems::temperature::conduct;

pub(super) fn all() -> Vec<Box<dyn ElementBehavior>> {
    vec![
        Box::new(Water),
        Box::new(Oil),
        Box::new(Acid),
        Box::new(Lava),
        Box::new(Napalm),
        Box::new(Tar),
        Box::new(Glue),
        Box::new(Sludge),
    ]
}

const OIL_BURN: BurnProfile = BurnProfile::new(150.0, 120, Some(ElementKind::Smoke)).fire(0.15).smoke(0.1);
const NAPALM_BURN: BurnProfile = BurnProfile::new(70.0, 300, None)
    .fire(0.3)
    .heat(5.0, 1000.0)
    .contact(0.5)
    .waterproof();
const TAR_BURN: BurnProfile = BurnProfile::new(300.0, 500, Some(ElementKind::Smoke)).smoke(0.15);

pub struct Water;

impl ElementBehavior for Water {
    fn kind(&self) -> ElementKind {
        ElementKind::Water
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        flow_liquid(ctx, Flow::new(0.8, 0.0))?;
        let temp = conduct(ctx)?;
        if temp <= 0.0 && ctx.chance(0.1) {
            ctx.transform_with(ElementKind::Ice, |p| p.temperature = temp);
        } else if temp >= 100.0 && ctx.chance(0.1) {
            ctx.transform_with(ElementKind::Steam, |p| p.temperature = temp.max(100.0));
        }
        Ok(())
    }
}

pub struct Oil;

impl ElementBehavior for Oil {
    fn kind(&self) -> ElementKind {
        ElementKind::Oil
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        flow_liquid(ctx, Flow::new(0.6, 0.1))?;
        conduct(ctx)?;
        burn(ctx, &OIL_BURN)?;
        Ok(())
    }
}

pub struct Acid;

impl Acid {
    fn resists(registry: &ElementRegistry, p: &Particle) -> bool {
        p.matter == Matter::EFFECT
            || matches!(p.kind, ElementKind::Acid | ElementKind::Water | ElementKind::Steel | ElementKind::Glass)
            || registry.descriptor(p.kind).map_or(true, |d| d.acid_resistant)
    }
}

impl ElementBehavior for Acid {
    fn kind(&self) -> ElementKind {
        ElementKind::Acid
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        flow_liquid(ctx, Flow::new(0.7, 0.0))?;
        conduct(ctx)?;

        let mut potency = ctx.particle()?.potency;
        let registry = ctx.registry;
        let targets = ctx.neighbors_where(|n| !Acid::resists(registry, n));
        for (dx, dy) in targets {
            if potency <= 0.1 {
                break;
            }
            if !ctx.chance(0.1) {
                continue;
            }
            let dissolved = match ctx.get_mut(dx, dy) {
                Some(n) => {
                    n.durability -= 0.3 * potency;
                    n.durability <= 0.0
                }
                None => false,
            };
            if dissolved {
                ctx.remove(dx, dy);
                potency -= 0.2;
                if ctx.chance(0.3) {
                    ctx.spawn(dx, dy, ElementKind::AcidGas);
                }
            }
        }

        ctx.particle_mut()?.potency = potency;
        if potency <= 0.1 {
            ctx.transform(ElementKind::Water);
        }
        Ok(())
    }
}

pub struct Lava;

impl ElementBehavior for Lava {
    fn kind(&self) -> ElementKind {
        ElementKind::Lava
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        flow_liquid(ctx, Flow::new(0.3, 0.85))?;

        let mut temp = ctx.particle()?.temperature;
        for (dx, dy) in ctx.neighbors_where(|_| true) {
            let Some(kind) = ctx.kind_at(dx, dy) else {
                continue;
            };
            match kind {
                ElementKind::Water => {
                    ctx.set(dx, dy, ElementKind::Steam);
                    temp -= 50.0;
                }
                ElementKind::Ice => {
                    ctx.set(dx, dy, ElementKind::Steam);
                }
                ElementKind::Stone | ElementKind::Sand | ElementKind::Glass | ElementKind::Brick => {
                    if temp > 1000.0 && ctx.chance(0.2) {
                        let melt = temp - 100.0;
                        ctx.set_with(dx, dy, ElementKind::Lava, |p| p.temperature = melt);
                    }
                }
                ElementKind::Wood | ElementKind::Plant => {
                    if let Some(n) = ctx.get_mut(dx, dy) {
                        ignite(n);
                    }
                }
                _ => {}
            }
        }

        temp -= 0.1;
        ctx.particle_mut()?.temperature = temp;
        if temp < 700.0 {
            ctx.transform_with(ElementKind::Stone, |p| p.temperature = 500.0);
        }
        Ok(())
    }
}

pub struct Napalm;

impl ElementBehavior for Napalm {
    fn kind(&self) -> ElementKind {
        ElementKind::Napalm
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        flow_liquid(ctx, Flow::new(0.5, 0.2))?;
        conduct(ctx)?;
        burn(ctx, &NAPALM_BURN)?;
        Ok(())
    }
}

pub struct Tar;

impl ElementBehavior for Tar {
    fn kind(&self) -> ElementKind {
        ElementKind::Tar
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        flow_liquid(ctx, Flow::new(0.2, 0.7))?;
        conduct(ctx)?;
        burn(ctx, &TAR_BURN)?;
        Ok(())
    }
}

pub struct Glue;

impl ElementBehavior for Glue {
    fn kind(&self) -> ElementKind {
        ElementKind::Glue
    }

    fn on_create(&self, p: &mut Particle, _rng: &mut Rng) {
        p.state = ElementState::Glue { solidity: 0.0 };
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        let solid = match ctx.particle()?.state {
            ElementState::Glue { solidity } => solidity >= 1.0,
            _ => return Err(ctx.mismatch()),
        };
        if !solid {
            flow_liquid(ctx, Flow::new(0.3, 0.5))?;
        }
        let temp = conduct(ctx)?;
        let wet = ctx.any_neighbor(|n| n.is(ElementKind::Water));

        let p = ctx.particle_mut()?;
        if let ElementState::Glue { solidity } = &mut p.state {
            if temp < 10.0 {
                *solidity = (*solidity + 0.01).min(1.0);
            } else if temp > 30.0 {
                *solidity = (*solidity - 0.01).max(0.0);
            }
        }
        if wet {
            p.potency -= 0.02;
            if p.potency <= 0.0 {
                ctx.transform(ElementKind::Water);
            }
        }
        Ok(())
    }
}

pub struct Sludge;

impl ElementBehavior for Sludge {
    fn kind(&self) -> ElementKind {
        ElementKind::Sludge
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        flow_liquid(ctx, Flow::new(0.3, 0.6))?;
        conduct(ctx)?;
        let potency = ctx.particle()?.potency;
        for (dx, dy) in ctx.neighbors_where(|n| n.is(ElementKind::Water) || n.is(ElementKind::Plant)) {
            match ctx.kind_at(dx, dy) {
                Some(ElementKind::Water) if ctx.chance(potency * 0.01) => {
                    ctx.set(dx, dy, ElementKind::Sludge);
                }
                Some(ElementKind::Plant) if ctx.chance(0.01) => {
                    ctx.set(dx, dy, ElementKind::Ash);
                }
                _ => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::grid::Grid;
    use crate::systems::behaviors::process_at;

    fn place(grid: &mut Grid, registry: &ElementRegistry, kind: ElementKind, x: i32, y: i32) {
        let p = registry.create(kind, &mut Rng::new(4)).unwrap();
        grid.insert(x, y, p).unwrap();
    }

    #[test]
    fn lava_boils_adjacent_water_and_cools() {
        let registry = ElementRegistry::with_builtin();
        let mut grid = Grid::new(2, 1);
        place(&mut grid, &registry, ElementKind::Lava, 0, 0);
        place(&mut grid, &registry, ElementKind::Water, 1, 0);
        let (x, y) = process_at(&mut grid, &registry, 0, 0, 1).unwrap();
        let steam = grid.iter().filter(|(_, _, p)| p.is(ElementKind::Steam)).count();
        assert_eq!(steam, 1);
        let lava = grid.get(x, y).unwrap();
        assert!(lava.temperature < 1200.0 - 49.0);
    }

    #[test]
    fn cooled_lava_turns_to_stone() {
        let registry = ElementRegistry::with_builtin();
        let mut grid = Grid::new(3, 1);
        place(&mut grid, &registry, ElementKind::Lava, 1, 0);
        grid.get_mut(1, 0).unwrap().temperature = 650.0;
        let (x, y) = process_at(&mut grid, &registry, 1, 0, 1).unwrap();
        let stone = grid.get(x, y).unwrap();
        assert_eq!(stone.kind, ElementKind::Stone);
        assert_eq!(stone.temperature, 500.0);
    }

    #[test]
    fn oil_floats_on_water() {
        let registry = ElementRegistry::with_builtin();
        let mut grid = Grid::new(1, 2);
        place(&mut grid, &registry, ElementKind::Water, 0, 0);
        place(&mut grid, &registry, ElementKind::Oil, 0, 1);
        process_at(&mut grid, &registry, 0, 0, 1).unwrap();
        assert_eq!(grid.get(0, 1).map(|p| p.kind), Some(ElementKind::Water));
        assert_eq!(grid.get(0, 0).map(|p| p.kind), Some(ElementKind::Oil));
    }

    #[test]
    fn spent_acid_becomes_water() {
        let registry = ElementRegistry::with_builtin();
        let mut grid = Grid::new(1, 1);
        place(&mut grid, &registry, ElementKind::Acid, 0, 0);
        grid.get_mut(0, 0).unwrap().potency = 0.05;
        process_at(&mut grid, &registry, 0, 0, 1).unwrap();
        assert_eq!(grid.get(0, 0).map(|p| p.kind), Some(ElementKind::Water));
    }

    #[test]
    fn acid_spares_glass() {
        let registry = ElementRegistry::with_builtin();
        let mut grid = Grid::new(3, 1);
        place(&mut grid, &registry, ElementKind::Glass, 0, 0);
        place(&mut grid, &registry, ElementKind::Acid, 1, 0);
        place(&mut grid, &registry, ElementKind::Glass, 2, 0);
        for tick in 1..50 {
            process_at(&mut grid, &registry, 1, 0, tick).unwrap();
        }
        assert_eq!(grid.get(0, 0).map(|p| p.durability), Some(0.3));
        assert_eq!(grid.get(2, 0).map(|p| p.durability), Some(0.3));
    }
}
