//! Explosives - stable until triggered, then a countdown, then a blast.
//!
//! Every explosive shares the same life cycle and differs in trigger
//! sensitivity, fuse length and blast size. A charge scheduled by another
//! blast sits out the tick it was scheduled on and detonates on the next.

use super::{drop_unsupported, fall_powder, ElementBehavior, UpdateContext};
use crate::core::error::BehaviorError;
use crate::core::utils::color::{blend, rgb};
use crate::core::utils::random::Rng;
use crate::domain::elements::ElementKind;
use crate::domain::particle::{ChargePhase, ChargeState, ElementState, FertilizerState, Particle};
use crate::systems::explosion::{detonate, Blast};
use crate::systems::temperature::conduct;

pub(super) fn all() -> Vec<Box<dyn ElementBehavior>> {
    vec![
        Box::new(Gunpowder),
        Box::new(ExplosivePowder),
        Box::new(Fertilizer),
        Box::new(C4),
        Box::new(Dynamite),
    ]
}

#[derive(Debug, Clone, Copy)]
struct Profile {
    fuse_ticks: u32,
    blast: Blast,
}

const C4_PROFILE: Profile = Profile { fuse_ticks: 0, blast: Blast::new(8.0, 800.0, ElementKind::Plasma) };
const DYNAMITE_PROFILE: Profile = Profile { fuse_ticks: 30, blast: Blast::new(8.0, 600.0, ElementKind::Fire) };
const POWDER_PROFILE: Profile = Profile { fuse_ticks: 2, blast: Blast::new(6.0, 500.0, ElementKind::Fire) };
const GUNPOWDER_PROFILE: Profile = Profile { fuse_ticks: 0, blast: Blast::new(4.0, 400.0, ElementKind::Fire) };
const FERTILIZER_PROFILE: Profile = Profile { fuse_ticks: 20, blast: Blast::new(5.0, 400.0, ElementKind::Fire) };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Armed {
    Stable,
    Lit,
    /// Detonated, or waiting out a chain delay; stop processing
    Done,
}

fn charge_of(ctx: &UpdateContext) -> Result<ChargeState, BehaviorError> {
    match ctx.particle()?.state.charge() {
        Some(c) => Ok(*c),
        None => Err(ctx.mismatch()),
    }
}

fn set_phase(ctx: &mut UpdateContext, phase: ChargePhase) -> Result<(), BehaviorError> {
    if let Some(c) = ctx.particle_mut()?.state.charge_mut() {
        c.phase = phase;
    }
    Ok(())
}

/// Chain delay and lit countdown
fn countdown(ctx: &mut UpdateContext, profile: &Profile) -> Result<Armed, BehaviorError> {
    let charge = charge_of(ctx)?;
    if let Some(at) = charge.scheduled_at {
        if ctx.tick > at {
            detonate(ctx, &profile.blast)?;
        }
        return Ok(Armed::Done);
    }
    match charge.phase {
        ChargePhase::Stable => Ok(Armed::Stable),
        ChargePhase::Lit { remaining: 0 } => {
            detonate(ctx, &profile.blast)?;
            Ok(Armed::Done)
        }
        ChargePhase::Lit { remaining } => {
            set_phase(ctx, ChargePhase::Lit { remaining: remaining - 1 })?;
            if ctx.chance(0.1) {
                let dx = ctx.rng.range(-1, 1);
                ctx.spawn(dx, -1, ElementKind::Smoke);
            }
            Ok(Armed::Lit)
        }
    }
}

/// Start the fuse. A zero-length fuse detonates on the spot.
fn light(ctx: &mut UpdateContext, profile: &Profile) -> Result<Armed, BehaviorError> {
    if profile.fuse_ticks == 0 {
        detonate(ctx, &profile.blast)?;
        return Ok(Armed::Done);
    }
    set_phase(ctx, ChargePhase::Lit { remaining: profile.fuse_ticks })?;
    Ok(Armed::Lit)
}

fn touches_flame(ctx: &UpdateContext) -> bool {
    ctx.any_neighbor(|n| n.kind.is_flame())
}

fn touches_burning_fuse(ctx: &UpdateContext) -> bool {
    ctx.any_neighbor(|n| n.is(ElementKind::Fuse) && n.burning)
}

fn charge_state(p: &mut Particle) {
    p.state = ElementState::Charge(ChargeState::stable());
}

/// Lit charges blink between their own colour and a hot white
fn blink(particle: &Particle, tick: u64) -> u32 {
    match particle.state.charge() {
        Some(c) if c.is_lit() && (tick / 4) % 2 == 0 => blend(particle.color, rgb(255, 255, 220), 0.6),
        _ => particle.color,
    }
}

pub struct C4;

impl ElementBehavior for C4 {
    fn kind(&self) -> ElementKind {
        ElementKind::C4
    }

    fn on_create(&self, p: &mut Particle, _rng: &mut Rng) {
        charge_state(p);
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        if countdown(ctx, &C4_PROFILE)? != Armed::Stable {
            return Ok(());
        }
        let temp = conduct(ctx)?;
        let triggered = temp > 150.0
            || touches_flame(ctx)
            || ctx.any_neighbor(|n| n.burning)
            || ctx.any_neighbor(|n| n.state.conductor_charge().is_some_and(|c| c > 0.5));
        if triggered {
            light(ctx, &C4_PROFILE)?;
        }
        Ok(())
    }
}

pub struct Dynamite;

impl ElementBehavior for Dynamite {
    fn kind(&self) -> ElementKind {
        ElementKind::Dynamite
    }

    fn on_create(&self, p: &mut Particle, _rng: &mut Rng) {
        charge_state(p);
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        match countdown(ctx, &DYNAMITE_PROFILE)? {
            Armed::Done | Armed::Lit => return Ok(()),
            Armed::Stable => {}
        }
        drop_unsupported(ctx);
        conduct(ctx)?;
        let triggered = touches_flame(ctx) || touches_burning_fuse(ctx) || ctx.any_neighbor(|n| n.temperature > 80.0);
        if triggered {
            light(ctx, &DYNAMITE_PROFILE)?;
        }
        Ok(())
    }

    fn render(&self, particle: &Particle, tick: u64) -> u32 {
        blink(particle, tick)
    }
}

pub struct ExplosivePowder;

impl ElementBehavior for ExplosivePowder {
    fn kind(&self) -> ElementKind {
        ElementKind::ExplosivePowder
    }

    fn on_create(&self, p: &mut Particle, _rng: &mut Rng) {
        charge_state(p);
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        let armed = countdown(ctx, &POWDER_PROFILE)?;
        if armed == Armed::Done {
            return Ok(());
        }

        // velocity.y tracks how far it has fallen since it last rested
        let moved = fall_powder(ctx)?;
        let p = ctx.particle_mut()?;
        let impact = if moved {
            p.velocity.y += 1.0;
            false
        } else {
            let fell = p.velocity.y;
            p.velocity.y = 0.0;
            fell >= 4.0
        };
        conduct(ctx)?;
        if armed == Armed::Lit {
            return Ok(());
        }

        let triggered = touches_flame(ctx)
            || (ctx.any_neighbor(|n| n.temperature > 80.0) && ctx.chance(0.7))
            || (impact && ctx.chance(0.6));
        if triggered {
            light(ctx, &POWDER_PROFILE)?;
        }
        Ok(())
    }

    fn render(&self, particle: &Particle, tick: u64) -> u32 {
        blink(particle, tick)
    }
}

pub struct Gunpowder;

impl ElementBehavior for Gunpowder {
    fn kind(&self) -> ElementKind {
        ElementKind::Gunpowder
    }

    fn on_create(&self, p: &mut Particle, _rng: &mut Rng) {
        charge_state(p);
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        if countdown(ctx, &GUNPOWDER_PROFILE)? == Armed::Done {
            return Ok(());
        }
        fall_powder(ctx)?;
        let temp = conduct(ctx)?;

        let fire = ctx.count_neighbors(|n| n.is(ElementKind::Fire)) as f32;
        let lava = ctx.count_neighbors(|n| n.is(ElementKind::Lava)) as f32;
        let mut loss = fire * 25.0 + lava * 30.0;
        if temp > 100.0 {
            loss += (temp - 100.0) * 0.1;
        }
        let mut spent = false;
        if let Some(c) = ctx.particle_mut()?.state.charge_mut() {
            c.stability -= loss;
            spent = c.stability <= 0.0;
        }
        if spent {
            light(ctx, &GUNPOWDER_PROFILE)?;
        }
        Ok(())
    }
}

pub struct Fertilizer;

impl ElementBehavior for Fertilizer {
    fn kind(&self) -> ElementKind {
        ElementKind::Fertilizer
    }

    fn on_create(&self, p: &mut Particle, _rng: &mut Rng) {
        p.state = ElementState::Fertilizer(FertilizerState {
            nutrients: 100.0,
            wetness: 0.0,
            charge: ChargeState::stable(),
        });
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        let armed = countdown(ctx, &FERTILIZER_PROFILE)?;
        if armed == Armed::Done {
            return Ok(());
        }
        fall_powder(ctx)?;
        let temp = conduct(ctx)?;

        let wet = ctx.any_neighbor(|n| n.is(ElementKind::Water));
        let plants = ctx.neighbors_where(|n| n.is(ElementKind::Plant));
        let ElementState::Fertilizer(state) = &mut ctx.particle_mut()?.state else {
            return Err(ctx.mismatch());
        };
        if wet {
            state.wetness = (state.wetness + 0.05).min(1.0);
        } else if temp > 30.0 {
            state.wetness = (state.wetness - 0.001).max(0.0);
        }
        let dry = state.wetness < 0.5;
        let mut feed = 0.0;
        if !plants.is_empty() && state.nutrients > 0.0 {
            feed = state.nutrients.min(10.0);
            state.nutrients -= feed;
        }
        if feed > 0.0 {
            let share = feed / plants.len() as f32;
            for (dx, dy) in plants {
                if let Some(ElementState::Plant(plant)) = ctx.get_mut(dx, dy).map(|p| &mut p.state) {
                    plant.nutrition = (plant.nutrition + share).min(100.0);
                }
            }
        }

        if armed == Armed::Lit {
            return Ok(());
        }
        let triggered = (temp >= 170.0 && dry) || (ctx.any_neighbor(|n| n.is(ElementKind::Fire)) && ctx.chance(0.2));
        if triggered {
            light(ctx, &FERTILIZER_PROFILE)?;
        }
        Ok(())
    }

    fn render(&self, particle: &Particle, tick: u64) -> u32 {
        blink(particle, tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::ElementRegistry;
    use crate::spatial::grid::Grid;
    use crate::systems::behaviors::process_at;

    fn place(grid: &mut Grid, registry: &ElementRegistry, kind: ElementKind, x: i32, y: i32) {
        let p = registry.create(kind, &mut Rng::new(9)).unwrap();
        grid.insert(x, y, p).unwrap();
    }

    #[test]
    fn cold_c4_stays_put() {
        let registry = ElementRegistry::with_builtin();
        let mut grid = Grid::new(5, 5);
        place(&mut grid, &registry, ElementKind::C4, 2, 2);
        process_at(&mut grid, &registry, 2, 2, 1).unwrap();
        assert_eq!(grid.get(2, 2).map(|p| p.kind), Some(ElementKind::C4));
    }

    #[test]
    fn scheduled_charge_waits_one_tick() {
        let registry = ElementRegistry::with_builtin();
        let mut grid = Grid::new(20, 20);
        place(&mut grid, &registry, ElementKind::C4, 10, 10);
        if let Some(c) = grid.get_mut(10, 10).and_then(|p| p.state.charge_mut()) {
            c.scheduled_at = Some(5);
        }
        process_at(&mut grid, &registry, 10, 10, 5).unwrap();
        assert_eq!(grid.get(10, 10).map(|p| p.kind), Some(ElementKind::C4));
        process_at(&mut grid, &registry, 10, 10, 6).unwrap();
        assert_eq!(grid.get(10, 10).map(|p| p.kind), Some(ElementKind::Plasma));
    }

    #[test]
    fn lit_dynamite_counts_down_without_falling() {
        let registry = ElementRegistry::with_builtin();
        let mut grid = Grid::new(5, 5);
        place(&mut grid, &registry, ElementKind::Dynamite, 2, 0);
        if let Some(c) = grid.get_mut(2, 0).and_then(|p| p.state.charge_mut()) {
            c.phase = ChargePhase::Lit { remaining: 10 };
        }
        process_at(&mut grid, &registry, 2, 0, 1).unwrap();
        let phase = grid.get(2, 0).and_then(|p| p.state.charge()).map(|c| c.phase);
        assert_eq!(phase, Some(ChargePhase::Lit { remaining: 9 }));
    }

    #[test]
    fn gunpowder_next_to_fire_loses_stability() {
        let registry = ElementRegistry::with_builtin();
        let mut grid = Grid::new(5, 5);
        place(&mut grid, &registry, ElementKind::Gunpowder, 2, 4);
        place(&mut grid, &registry, ElementKind::Stone, 1, 4);
        place(&mut grid, &registry, ElementKind::Stone, 3, 4);
        place(&mut grid, &registry, ElementKind::Fire, 2, 3);
        process_at(&mut grid, &registry, 2, 4, 1).unwrap();
        let stability = grid.get(2, 4).and_then(|p| p.state.charge()).map(|c| c.stability);
        assert!(stability.is_some_and(|s| s <= 75.0));
    }

    #[test]
    fn wet_fertilizer_soaks_and_feeds_plants() {
        let registry = ElementRegistry::with_builtin();
        let mut grid = Grid::new(5, 5);
        place(&mut grid, &registry, ElementKind::Stone, 2, 4);
        place(&mut grid, &registry, ElementKind::Fertilizer, 2, 3);
        place(&mut grid, &registry, ElementKind::Water, 1, 3);
        place(&mut grid, &registry, ElementKind::Plant, 3, 3);
        process_at(&mut grid, &registry, 2, 3, 1).unwrap();
        match grid.get(2, 3).map(|p| p.state) {
            Some(ElementState::Fertilizer(f)) => {
                assert!(f.wetness > 0.0);
                assert!(f.nutrients < 100.0);
            }
            other => panic!("unexpected state {other:?}"),
        }
    }
}
