//! Behaviors - per-element update rules
//!
//! Every element is a small state machine implementing `ElementBehavior`.
//! The scheduler stamps a particle as processed before calling `process`, so a
//! behavior that moves its particle into an unswept cell cannot be visited twice.
//!
//! Contract for `process`:
//! - resolve support/falling first for solids and powders
//! - then local physics (heat exchange, phase changes) and reactive rules
//! - return immediately once the particle has been destroyed or replaced

mod common;
mod energy;
mod explosive;
mod fuse;
mod gas;
mod liquid;
mod plant;
mod powder;
mod solid;
mod utility;

pub use common::{
    can_rise_into, can_sink_into, drop_unsupported, expire, fall_powder, flow_liquid, lifetime, rise_gas,
    stacked_above, Flow, CARDINALS, NEIGHBORS_8,
};

use crate::core::error::BehaviorError;
use crate::core::utils::random::Rng;
use crate::domain::content::ElementRegistry;
use crate::domain::elements::{descriptor, ElementDescriptor, ElementKind};
use crate::domain::particle::Particle;
use crate::simulation::SimulationConfig;
use crate::spatial::grid::Grid;

/// Everything a behavior may touch while updating the particle at `(x, y)`.
/// Offsets passed to the helpers are relative to `(x, y)`; moves update it.
pub struct UpdateContext<'a> {
    pub grid: &'a mut Grid,
    pub registry: &'a ElementRegistry,
    pub config: &'a SimulationConfig,
    pub rng: &'a mut Rng,
    pub tick: u64,
    pub x: i32,
    pub y: i32,
}

pub trait ElementBehavior {
    fn kind(&self) -> ElementKind;

    fn descriptor(&self) -> ElementDescriptor {
        descriptor(self.kind())
    }

    /// Element-specific defaults: counters, timers, lifetimes
    fn on_create(&self, _particle: &mut Particle, _rng: &mut Rng) {}

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError>;

    /// ABGR colour for this particle on this tick
    fn render(&self, particle: &Particle, _tick: u64) -> u32 {
        particle.color
    }
}

impl<'a> UpdateContext<'a> {
    pub fn particle(&self) -> Result<&Particle, BehaviorError> {
        self.grid
            .get(self.x, self.y)
            .ok_or(BehaviorError::MissingParticle { x: self.x, y: self.y })
    }

    pub fn particle_mut(&mut self) -> Result<&mut Particle, BehaviorError> {
        let (x, y) = (self.x, self.y);
        self.grid.get_mut(x, y).ok_or(BehaviorError::MissingParticle { x, y })
    }

    /// Error for a particle whose state variant does not belong to its kind
    pub fn mismatch(&self) -> BehaviorError {
        match self.grid.get(self.x, self.y) {
            Some(p) => BehaviorError::StateMismatch { kind: p.kind },
            None => BehaviorError::MissingParticle { x: self.x, y: self.y },
        }
    }

    #[inline]
    pub fn in_bounds(&self, dx: i32, dy: i32) -> bool {
        self.grid.in_bounds(self.x + dx, self.y + dy)
    }

    #[inline]
    pub fn get(&self, dx: i32, dy: i32) -> Option<&Particle> {
        self.grid.get(self.x + dx, self.y + dy)
    }

    #[inline]
    pub fn get_mut(&mut self, dx: i32, dy: i32) -> Option<&mut Particle> {
        self.grid.get_mut(self.x + dx, self.y + dy)
    }

    #[inline]
    pub fn kind_at(&self, dx: i32, dy: i32) -> Option<ElementKind> {
        self.get(dx, dy).map(|p| p.kind)
    }

    /// In bounds and unoccupied
    #[inline]
    pub fn is_empty(&self, dx: i32, dy: i32) -> bool {
        self.grid.is_empty(self.x + dx, self.y + dy)
    }

    #[inline]
    pub fn descriptor_of(&self, kind: ElementKind) -> Option<&ElementDescriptor> {
        self.registry.descriptor(kind)
    }

    /// Move into an empty cell and follow the particle
    pub fn move_by(&mut self, dx: i32, dy: i32) -> bool {
        let (nx, ny) = (self.x + dx, self.y + dy);
        if self.grid.move_particle(self.x, self.y, nx, ny) {
            self.x = nx;
            self.y = ny;
            true
        } else {
            false
        }
    }

    /// Swap with whatever occupies the target and follow the particle
    pub fn swap_by(&mut self, dx: i32, dy: i32) -> bool {
        let (nx, ny) = (self.x + dx, self.y + dy);
        if self.grid.swap(self.x, self.y, nx, ny) {
            self.x = nx;
            self.y = ny;
            true
        } else {
            false
        }
    }

    /// Fresh particle, already stamped for this tick
    pub fn create(&mut self, kind: ElementKind) -> Option<Particle> {
        let mut p = self.registry.create(kind, self.rng)?;
        p.mark_processed(self.tick);
        Some(p)
    }

    /// Place a fresh `kind` into an empty neighbour
    pub fn spawn(&mut self, dx: i32, dy: i32, kind: ElementKind) -> bool {
        self.spawn_with(dx, dy, kind, |_| {})
    }

    pub fn spawn_with(&mut self, dx: i32, dy: i32, kind: ElementKind, init: impl FnOnce(&mut Particle)) -> bool {
        if !self.is_empty(dx, dy) {
            return false;
        }
        let Some(mut p) = self.create(kind) else {
            return false;
        };
        init(&mut p);
        self.grid.insert(self.x + dx, self.y + dy, p).is_ok()
    }

    /// Overwrite the cell at the offset (occupied or not) with a fresh `kind`
    pub fn set(&mut self, dx: i32, dy: i32, kind: ElementKind) -> bool {
        self.set_with(dx, dy, kind, |_| {})
    }

    pub fn set_with(&mut self, dx: i32, dy: i32, kind: ElementKind, init: impl FnOnce(&mut Particle)) -> bool {
        if !self.in_bounds(dx, dy) {
            return false;
        }
        let Some(mut p) = self.create(kind) else {
            return false;
        };
        init(&mut p);
        self.grid.replace(self.x + dx, self.y + dy, p).is_ok()
    }

    /// Replace this particle with a fresh `kind`. Callers return right after.
    pub fn transform(&mut self, kind: ElementKind) -> bool {
        self.set(0, 0, kind)
    }

    pub fn transform_with(&mut self, kind: ElementKind, init: impl FnOnce(&mut Particle)) -> bool {
        self.set_with(0, 0, kind, init)
    }

    pub fn remove(&mut self, dx: i32, dy: i32) -> Option<Particle> {
        self.grid.take(self.x + dx, self.y + dy)
    }

    /// Destroy this particle. Callers return right after.
    pub fn remove_self(&mut self) {
        self.grid.take(self.x, self.y);
    }

    #[inline]
    pub fn chance(&mut self, p: f32) -> bool {
        self.rng.chance(p)
    }

    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.next_f32()
    }

    /// Occupied 8-neighbours matching `pred`
    pub fn neighbors_where(&self, pred: impl Fn(&Particle) -> bool) -> Vec<(i32, i32)> {
        NEIGHBORS_8
            .iter()
            .copied()
            .filter(|&(dx, dy)| self.get(dx, dy).is_some_and(&pred))
            .collect()
    }

    pub fn any_neighbor(&self, pred: impl Fn(&Particle) -> bool) -> bool {
        NEIGHBORS_8.iter().any(|&(dx, dy)| self.get(dx, dy).is_some_and(&pred))
    }

    pub fn count_neighbors(&self, pred: impl Fn(&Particle) -> bool) -> usize {
        NEIGHBORS_8
            .iter()
            .filter(|&&(dx, dy)| self.get(dx, dy).is_some_and(&pred))
            .count()
    }

    /// Empty 8-neighbours
    pub fn empty_neighbors(&self) -> Vec<(i32, i32)> {
        NEIGHBORS_8
            .iter()
            .copied()
            .filter(|&(dx, dy)| self.is_empty(dx, dy))
            .collect()
    }

    /// Add `delta` degrees to every occupied neighbour
    pub fn heat_neighbors(&mut self, delta: f32) {
        for (dx, dy) in NEIGHBORS_8 {
            if let Some(n) = self.get_mut(dx, dy) {
                n.temperature += delta;
            }
        }
    }
}

/// Full built-in catalogue, in picker order
pub fn builtin() -> Vec<Box<dyn ElementBehavior>> {
    let mut out: Vec<Box<dyn ElementBehavior>> = Vec::with_capacity(ElementKind::COUNT);
    out.extend(powder::all());
    out.extend(explosive::all());
    out.extend(liquid::all());
    out.extend(gas::all());
    out.extend(solid::all());
    out.extend(plant::all());
    out.extend(fuse::all());
    out.extend(energy::all());
    out.extend(utility::all());
    out
}

/// Run one behavior call at `(x, y)` outside the scheduler. Returns where the particle ended up.
#[cfg(test)]
pub(crate) fn process_at(
    grid: &mut Grid,
    registry: &ElementRegistry,
    x: i32,
    y: i32,
    tick: u64,
) -> Result<(i32, i32), BehaviorError> {
    let config = SimulationConfig::default();
    let mut rng = Rng::new(tick as u32 + 1);
    let kind = grid.get(x, y).map(|p| p.kind).ok_or(BehaviorError::MissingParticle { x, y })?;
    let behavior = registry.behavior(kind).ok_or(BehaviorError::MissingParticle { x, y })?;
    let mut ctx = UpdateContext { grid, registry, config: &config, rng: &mut rng, tick, x, y };
    behavior.process(&mut ctx)?;
    Ok((ctx.x, ctx.y))
}
