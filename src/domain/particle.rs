//! Particle - the mutable record owned by exactly one grid cell.
//!
//! Shared fields live on the struct; the handful of fields only one element
//! family uses live in the `ElementState` sum type.

use super::elements::{ElementDescriptor, ElementKind, Matter};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

/// Explosive life cycle: stable until triggered, then a countdown to detonation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChargePhase {
    Stable,
    Lit { remaining: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargeState {
    pub phase: ChargePhase,
    /// Tick on which a nearby blast armed this charge
    pub scheduled_at: Option<u64>,
    pub stability: f32,
}

impl ChargeState {
    pub fn stable() -> Self {
        Self { phase: ChargePhase::Stable, scheduled_at: None, stability: 100.0 }
    }

    #[inline]
    pub fn is_lit(&self) -> bool {
        matches!(self.phase, ChargePhase::Lit { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuseState {
    pub progress: f32,
    /// Offset the flame travelled in from
    pub direction: Option<(i8, i8)>,
    pub spread: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FertilizerState {
    pub nutrients: f32,
    pub wetness: f32,
    pub charge: ChargeState,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlantState {
    pub hydration: f32,
    pub nutrition: f32,
    pub growth: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ElementState {
    #[default]
    Inert,
    Fuse(FuseState),
    Charge(ChargeState),
    Fertilizer(FertilizerState),
    Conductor { charge: f32 },
    Battery { charge: f32 },
    Bulb { brightness: f32 },
    Torch { reactivate_at: Option<u64> },
    Ice { melt: f32 },
    Snow { wetness: f32 },
    Plant(PlantState),
    Crystal { facets: u8, growth: f32 },
    Salt { compression: f32 },
    Glue { solidity: f32 },
    Resin { hardness: f32 },
    Bacteria { energy: f32, age: u32 },
    Faucet { flow_rate: f32 },
}

impl ElementState {
    /// Electrical charge if this particle is part of a conductor network
    pub fn conductor_charge(&self) -> Option<f32> {
        match self {
            ElementState::Conductor { charge } => Some(*charge),
            _ => None,
        }
    }

    pub fn charge(&self) -> Option<&ChargeState> {
        match self {
            ElementState::Charge(c) => Some(c),
            ElementState::Fertilizer(f) => Some(&f.charge),
            _ => None,
        }
    }

    pub fn charge_mut(&mut self) -> Option<&mut ChargeState> {
        match self {
            ElementState::Charge(c) => Some(c),
            ElementState::Fertilizer(f) => Some(&mut f.charge),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub kind: ElementKind,
    pub color: u32,
    pub temperature: f32,
    pub density: f32,
    pub matter: Matter,
    pub flammable: bool,
    pub burning: bool,
    pub burn_duration: i32,
    pub durability: f32,
    pub potency: f32,
    pub activated: bool,
    pub stable_counter: u32,
    pub lifetime: Option<u32>,
    pub velocity: Velocity,
    pub state: ElementState,
    last_tick_processed: u64,
}

impl Particle {
    /// Fresh particle with the descriptor's defaults
    pub fn new(desc: &ElementDescriptor) -> Self {
        Self {
            kind: desc.kind,
            color: desc.default_color,
            temperature: desc.default_temperature,
            density: desc.density,
            matter: desc.matter,
            flammable: desc.flammable,
            burning: false,
            burn_duration: 0,
            durability: desc.durability,
            potency: 1.0,
            activated: false,
            stable_counter: 0,
            lifetime: None,
            velocity: Velocity::default(),
            state: ElementState::Inert,
            last_tick_processed: 0,
        }
    }

    #[inline]
    pub fn is_processed(&self, tick: u64) -> bool {
        self.last_tick_processed == tick
    }

    #[inline]
    pub fn mark_processed(&mut self, tick: u64) {
        self.last_tick_processed = tick;
    }

    #[inline]
    pub fn last_tick_processed(&self) -> u64 {
        self.last_tick_processed
    }

    /// Reset the stamp, used when a failed update is rolled back
    #[inline]
    pub(crate) fn restore_stamp(&mut self, tick: u64) {
        self.last_tick_processed = tick;
    }

    #[inline]
    pub fn is(&self, kind: ElementKind) -> bool {
        self.kind == kind
    }

    /// Burning, or a flame element itself
    #[inline]
    pub fn is_hot_source(&self) -> bool {
        self.burning || self.kind.is_flame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::elements::descriptor;

    #[test]
    fn new_copies_descriptor_flags() {
        let p = Particle::new(&descriptor(ElementKind::Water));
        assert_eq!(p.kind, ElementKind::Water);
        assert!(p.matter.is_liquid);
        assert_eq!(p.temperature, 20.0);
        assert!(!p.is_processed(1));
    }

    #[test]
    fn stamp_tracks_current_tick_only() {
        let mut p = Particle::new(&descriptor(ElementKind::Sand));
        p.mark_processed(5);
        assert!(p.is_processed(5));
        assert!(!p.is_processed(6));
    }

    #[test]
    fn fertilizer_exposes_its_charge() {
        let mut state = ElementState::Fertilizer(FertilizerState {
            nutrients: 100.0,
            wetness: 0.0,
            charge: ChargeState::stable(),
        });
        if let Some(c) = state.charge_mut() {
            c.scheduled_at = Some(3);
        }
        assert_eq!(state.charge().and_then(|c| c.scheduled_at), Some(3));
    }
}
