//! Electrical network - wires, switches, bulbs and batteries.
//!
//! Conductors hold a charge in `0..=1` that decays every tick and flows to
//! orthogonal conductors holding less. A switch only conducts while it is
//! activated. Batteries top adjacent conductors up to full charge.

use super::{ElementBehavior, UpdateContext, CARDINALS};
use crate::core::error::BehaviorError;
use crate::core::utils::color::{blend, rgb, scale};
use crate::core::utils::random::Rng;
use crate::domain::elements::ElementKind;
use crate::domain::particle::{ElementState, Particle};
use crate::systems::explosion::{detonate, Blast};
use crate::systems::temperature::{conduct, relax};

pub(super) fn all() -> Vec<Box<dyn ElementBehavior>> {
    vec![Box::new(Wire), Box::new(Switch), Box::new(Bulb), Box::new(Battery)]
}

const DECAY: f32 = 0.95;
const MIN_CHARGE: f32 = 0.1;
const TRANSFER: f32 = 0.9;
const BATTERY_COST: f32 = 0.05;
const BATTERY_BLAST: Blast = Blast::new(3.0, 300.0, ElementKind::Fire);

/// Open switches neither hold nor pass charge
#[inline]
fn closed(p: &Particle) -> bool {
    !p.is(ElementKind::Switch) || p.activated
}

/// Pass charge to weaker orthogonal conductors, then decay. Returns the charge left.
pub(super) fn carry_charge(ctx: &mut UpdateContext) -> Result<f32, BehaviorError> {
    let p = ctx.particle()?;
    let Some(charge) = p.state.conductor_charge() else {
        return Err(ctx.mismatch());
    };
    let live = closed(p) && charge >= MIN_CHARGE;

    if live {
        let passed = charge * TRANSFER;
        for (dx, dy) in CARDINALS {
            if let Some(n) = ctx.get_mut(dx, dy) {
                if !closed(n) {
                    continue;
                }
                if let ElementState::Conductor { charge: theirs } = &mut n.state {
                    if *theirs < passed {
                        *theirs = passed;
                    }
                }
            }
        }
    }

    let p = ctx.particle_mut()?;
    let mut next = if live { charge * DECAY } else { 0.0 };
    if next < MIN_CHARGE {
        next = 0.0;
    }
    p.state = ElementState::Conductor { charge: next };
    Ok(next)
}

/// Charged conductor a bulb or faucet can draw from
#[inline]
fn powered(n: &Particle) -> bool {
    closed(n) && n.state.conductor_charge().is_some_and(|c| c >= MIN_CHARGE)
}

pub struct Wire;

impl ElementBehavior for Wire {
    fn kind(&self) -> ElementKind {
        ElementKind::Wire
    }

    fn on_create(&self, p: &mut Particle, _rng: &mut Rng) {
        p.state = ElementState::Conductor { charge: 0.0 };
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        conduct(ctx)?;
        carry_charge(ctx)?;
        Ok(())
    }

    fn render(&self, particle: &Particle, _tick: u64) -> u32 {
        match particle.state.conductor_charge() {
            Some(c) if c > 0.0 => blend(particle.color, rgb(255, 240, 120), c * 0.7),
            _ => particle.color,
        }
    }
}

pub struct Switch;

impl ElementBehavior for Switch {
    fn kind(&self) -> ElementKind {
        ElementKind::Switch
    }

    fn on_create(&self, p: &mut Particle, _rng: &mut Rng) {
        p.state = ElementState::Conductor { charge: 0.0 };
        p.activated = false;
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        carry_charge(ctx)?;
        Ok(())
    }

    fn render(&self, particle: &Particle, _tick: u64) -> u32 {
        if particle.activated {
            rgb(60, 200, 80)
        } else {
            rgb(200, 60, 60)
        }
    }
}

pub struct Bulb;

impl ElementBehavior for Bulb {
    fn kind(&self) -> ElementKind {
        ElementKind::Bulb
    }

    fn on_create(&self, p: &mut Particle, _rng: &mut Rng) {
        p.state = ElementState::Bulb { brightness: 0.0 };
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        let temp = conduct(ctx)?;
        if temp > 150.0 {
            ctx.transform_with(ElementKind::GlassShard, |s| s.temperature = temp);
            return Ok(());
        }

        let lit = ctx.any_neighbor(|n| {
            powered(n) || matches!(n.state, ElementState::Battery { charge } if charge > 0.0)
        });
        let p = ctx.particle_mut()?;
        let ElementState::Bulb { brightness } = &mut p.state else {
            return Err(ctx.mismatch());
        };
        *brightness = if lit { (*brightness + 0.1).min(1.0) } else { (*brightness - 0.05).max(0.0) };
        p.activated = lit;
        if lit {
            relax(p, 60.0, 1.0);
        }
        Ok(())
    }

    fn render(&self, particle: &Particle, _tick: u64) -> u32 {
        match particle.state {
            ElementState::Bulb { brightness } => blend(rgb(70, 70, 60), rgb(255, 250, 180), brightness),
            _ => particle.color,
        }
    }
}

pub struct Battery;

impl ElementBehavior for Battery {
    fn kind(&self) -> ElementKind {
        ElementKind::Battery
    }

    fn on_create(&self, p: &mut Particle, _rng: &mut Rng) {
        p.state = ElementState::Battery { charge: 100.0 };
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        let temp = conduct(ctx)?;
        if temp > 150.0 && ctx.chance(0.05) {
            return detonate(ctx, &BATTERY_BLAST);
        }

        let ElementState::Battery { charge } = ctx.particle()?.state else {
            return Err(ctx.mismatch());
        };
        if charge <= 0.0 {
            return Ok(());
        }

        let mut cost = 0.0;
        for (dx, dy) in CARDINALS {
            let Some(n) = ctx.get_mut(dx, dy) else {
                continue;
            };
            if n.is(ElementKind::Bulb) {
                cost += BATTERY_COST;
            } else if closed(n) {
                if let ElementState::Conductor { charge } = &mut n.state {
                    *charge = 1.0;
                    cost += BATTERY_COST;
                }
            }
        }
        ctx.particle_mut()?.state = ElementState::Battery { charge: (charge - cost).max(0.0) };
        Ok(())
    }

    fn render(&self, particle: &Particle, _tick: u64) -> u32 {
        match particle.state {
            ElementState::Battery { charge } if charge <= 0.0 => scale(particle.color, 0.5),
            _ => particle.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::ElementRegistry;
    use crate::spatial::grid::Grid;
    use crate::systems::behaviors::process_at;

    fn place(grid: &mut Grid, registry: &ElementRegistry, kind: ElementKind, x: i32, y: i32) {
        let p = registry.create(kind, &mut Rng::new(2)).unwrap();
        grid.insert(x, y, p).unwrap();
    }

    fn charge_at(grid: &Grid, x: i32, y: i32) -> Option<f32> {
        grid.get(x, y).and_then(|p| p.state.conductor_charge())
    }

    #[test]
    fn battery_charges_wire_and_pays_for_it() {
        let registry = ElementRegistry::with_builtin();
        let mut grid = Grid::new(3, 1);
        place(&mut grid, &registry, ElementKind::Battery, 0, 0);
        place(&mut grid, &registry, ElementKind::Wire, 1, 0);
        process_at(&mut grid, &registry, 0, 0, 1).unwrap();
        assert_eq!(charge_at(&grid, 1, 0), Some(1.0));
        assert!(matches!(grid.get(0, 0).map(|p| p.state), Some(ElementState::Battery { charge }) if charge < 100.0));
    }

    #[test]
    fn charge_flows_and_decays() {
        let registry = ElementRegistry::with_builtin();
        let mut grid = Grid::new(2, 1);
        place(&mut grid, &registry, ElementKind::Wire, 0, 0);
        place(&mut grid, &registry, ElementKind::Wire, 1, 0);
        grid.get_mut(0, 0).unwrap().state = ElementState::Conductor { charge: 1.0 };
        process_at(&mut grid, &registry, 0, 0, 1).unwrap();
        assert_eq!(charge_at(&grid, 1, 0), Some(0.9));
        assert_eq!(charge_at(&grid, 0, 0), Some(0.95));
    }

    #[test]
    fn open_switch_blocks_charge() {
        let registry = ElementRegistry::with_builtin();
        let mut grid = Grid::new(2, 1);
        place(&mut grid, &registry, ElementKind::Wire, 0, 0);
        place(&mut grid, &registry, ElementKind::Switch, 1, 0);
        grid.get_mut(0, 0).unwrap().state = ElementState::Conductor { charge: 1.0 };
        process_at(&mut grid, &registry, 0, 0, 1).unwrap();
        assert_eq!(charge_at(&grid, 1, 0), Some(0.0));
    }

    #[test]
    fn weak_charge_drops_to_zero() {
        let registry = ElementRegistry::with_builtin();
        let mut grid = Grid::new(1, 1);
        place(&mut grid, &registry, ElementKind::Wire, 0, 0);
        grid.get_mut(0, 0).unwrap().state = ElementState::Conductor { charge: 0.105 };
        process_at(&mut grid, &registry, 0, 0, 1).unwrap();
        assert_eq!(charge_at(&grid, 0, 0), Some(0.0));
    }

    #[test]
    fn bulb_next_to_battery_lights_up() {
        let registry = ElementRegistry::with_builtin();
        let mut grid = Grid::new(2, 1);
        place(&mut grid, &registry, ElementKind::Battery, 0, 0);
        place(&mut grid, &registry, ElementKind::Bulb, 1, 0);
        process_at(&mut grid, &registry, 1, 0, 1).unwrap();
        let bulb = grid.get(1, 0).unwrap();
        assert!(bulb.activated);
        assert!(matches!(bulb.state, ElementState::Bulb { brightness } if brightness > 0.0));
    }
}
