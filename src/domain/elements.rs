//! Element ids and the built-in descriptor table.
//!
//! `ElementKind` is the closed set of materials the engine ships. Descriptors
//! carry the physical constants every particle of a kind starts from; the
//! registry copies them once at registration.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::core::utils::color::{rgb, to_hex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    // Powders
    Sand,
    Salt,
    Snow,
    Ash,
    GlassShard,
    Debris,
    Bacteria,
    Gunpowder,
    ExplosivePowder,
    Fertilizer,
    // Liquids
    Water,
    Oil,
    Acid,
    Lava,
    Napalm,
    Tar,
    Glue,
    Sludge,
    // Gases and energy
    Smoke,
    Steam,
    AcidGas,
    Fire,
    Plasma,
    StaticCharge,
    Bubble,
    Balloon,
    // Solids
    Stone,
    Brick,
    Metal,
    Steel,
    Glass,
    Wood,
    Ice,
    SolidSalt,
    SolidAsh,
    Resin,
    Plant,
    Crystal,
    // Explosives and devices
    C4,
    Dynamite,
    Fuse,
    Torch,
    Wire,
    Switch,
    Bulb,
    Battery,
    Faucet,
    Eraser,
    // Tool trails
    WindEffect,
    HeatEffect,
    ColdEffect,
}

impl ElementKind {
    pub const COUNT: usize = 51;

    pub const ALL: [ElementKind; Self::COUNT] = [
        ElementKind::Sand,
        ElementKind::Salt,
        ElementKind::Snow,
        ElementKind::Ash,
        ElementKind::GlassShard,
        ElementKind::Debris,
        ElementKind::Bacteria,
        ElementKind::Gunpowder,
        ElementKind::ExplosivePowder,
        ElementKind::Fertilizer,
        ElementKind::Water,
        ElementKind::Oil,
        ElementKind::Acid,
        ElementKind::Lava,
        ElementKind::Napalm,
        ElementKind::Tar,
        ElementKind::Glue,
        ElementKind::Sludge,
        ElementKind::Smoke,
        ElementKind::Steam,
        ElementKind::AcidGas,
        ElementKind::Fire,
        ElementKind::Plasma,
        ElementKind::StaticCharge,
        ElementKind::Bubble,
        ElementKind::Balloon,
        ElementKind::Stone,
        ElementKind::Brick,
        ElementKind::Metal,
        ElementKind::Steel,
        ElementKind::Glass,
        ElementKind::Wood,
        ElementKind::Ice,
        ElementKind::SolidSalt,
        ElementKind::SolidAsh,
        ElementKind::Resin,
        ElementKind::Plant,
        ElementKind::Crystal,
        ElementKind::C4,
        ElementKind::Dynamite,
        ElementKind::Fuse,
        ElementKind::Torch,
        ElementKind::Wire,
        ElementKind::Switch,
        ElementKind::Bulb,
        ElementKind::Battery,
        ElementKind::Faucet,
        ElementKind::Eraser,
        ElementKind::WindEffect,
        ElementKind::HeatEffect,
        ElementKind::ColdEffect,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        use ElementKind::*;
        match self {
            Sand => "sand",
            Salt => "salt",
            Snow => "snow",
            Ash => "ash",
            GlassShard => "glass-shard",
            Debris => "debris",
            Bacteria => "bacteria",
            Gunpowder => "gunpowder",
            ExplosivePowder => "explosive-powder",
            Fertilizer => "fertilizer",
            Water => "water",
            Oil => "oil",
            Acid => "acid",
            Lava => "lava",
            Napalm => "napalm",
            Tar => "tar",
            Glue => "glue",
            Sludge => "sludge",
            Smoke => "smoke",
            Steam => "steam",
            AcidGas => "acid-gas",
            Fire => "fire",
            Plasma => "plasma",
            StaticCharge => "static-charge",
            Bubble => "bubble",
            Balloon => "balloon",
            Stone => "stone",
            Brick => "brick",
            Metal => "metal",
            Steel => "steel",
            Glass => "glass",
            Wood => "wood",
            Ice => "ice",
            SolidSalt => "solid-salt",
            SolidAsh => "solid-ash",
            Resin => "resin",
            Plant => "plant",
            Crystal => "crystal",
            C4 => "c4",
            Dynamite => "dynamite",
            Fuse => "fuse",
            Torch => "torch",
            Wire => "wire",
            Switch => "switch",
            Bulb => "bulb",
            Battery => "battery",
            Faucet => "faucet",
            Eraser => "eraser",
            WindEffect => "wind-effect",
            HeatEffect => "heat-effect",
            ColdEffect => "cold-effect",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.name() == name)
    }

    /// Short-lived trails left by the environmental tools
    #[inline]
    pub fn is_effect(self) -> bool {
        matches!(self, ElementKind::WindEffect | ElementKind::HeatEffect | ElementKind::ColdEffect)
    }

    /// Heat and flame sources that ignite neighbours on contact
    #[inline]
    pub fn is_flame(self) -> bool {
        matches!(self, ElementKind::Fire | ElementKind::Plasma | ElementKind::Lava)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Registry category. Patched at most once after registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Powder,
    Liquid,
    Gas,
    Solid,
    Explosive,
    Electrical,
    Spawner,
    Eraser,
    Effect,
}

/// Physical phase flags. Informative, not exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matter {
    pub is_gas: bool,
    pub is_liquid: bool,
    pub is_powder: bool,
    pub is_solid: bool,
    pub has_gravity: bool,
}

impl Matter {
    pub const POWDER: Matter = Matter { is_gas: false, is_liquid: false, is_powder: true, is_solid: false, has_gravity: true };
    pub const LIQUID: Matter = Matter { is_gas: false, is_liquid: true, is_powder: false, is_solid: false, has_gravity: true };
    pub const GAS: Matter = Matter { is_gas: true, is_liquid: false, is_powder: false, is_solid: false, has_gravity: false };
    pub const SOLID: Matter = Matter { is_gas: false, is_liquid: false, is_powder: false, is_solid: true, has_gravity: false };
    pub const HEAVY_SOLID: Matter = Matter { is_gas: false, is_liquid: false, is_powder: false, is_solid: true, has_gravity: true };
    pub const EFFECT: Matter = Matter { is_gas: false, is_liquid: false, is_powder: false, is_solid: false, has_gravity: false };

    /// Subject to the residual gravity pass
    #[inline]
    pub fn falls(&self) -> bool {
        self.is_liquid || self.is_powder || self.has_gravity
    }

    /// Can be pushed around by wind, blasts and other movers
    #[inline]
    pub fn movable(&self) -> bool {
        !self.is_solid || self.has_gravity
    }
}

fn serialize_color<S: Serializer>(color: &u32, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&to_hex(*color))
}

/// Immutable per-kind constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDescriptor {
    pub kind: ElementKind,
    pub name: &'static str,
    pub category: Category,
    #[serde(serialize_with = "serialize_color")]
    pub default_color: u32,
    pub density: f32,
    #[serde(flatten)]
    pub matter: Matter,
    pub flammable: bool,
    pub conductive: bool,
    pub explosive: bool,
    pub corrosive: bool,
    pub acid_resistant: bool,
    pub default_temperature: f32,
    pub heat_conductivity: f32,
    pub durability: f32,
    pub color_variation: i32,
}

impl ElementDescriptor {
    pub fn new(kind: ElementKind, category: Category, matter: Matter, color: u32) -> Self {
        Self {
            kind,
            name: kind.name(),
            category,
            default_color: color,
            density: 1.0,
            matter,
            flammable: false,
            conductive: false,
            explosive: false,
            corrosive: false,
            acid_resistant: false,
            default_temperature: 25.0,
            heat_conductivity: 0.05,
            durability: 0.5,
            color_variation: 8,
        }
    }

    pub fn density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn temperature(mut self, celsius: f32) -> Self {
        self.default_temperature = celsius;
        self
    }

    pub fn conductivity(mut self, rate: f32) -> Self {
        self.heat_conductivity = rate;
        self
    }

    pub fn durability(mut self, durability: f32) -> Self {
        self.durability = durability;
        self
    }

    pub fn variation(mut self, amount: i32) -> Self {
        self.color_variation = amount;
        self
    }

    pub fn flammable(mut self) -> Self {
        self.flammable = true;
        self
    }

    pub fn conductive(mut self) -> Self {
        self.conductive = true;
        self
    }

    pub fn explosive(mut self) -> Self {
        self.explosive = true;
        self
    }

    pub fn corrosive(mut self) -> Self {
        self.corrosive = true;
        self.acid_resistant = true;
        self
    }

    pub fn acid_resistant(mut self) -> Self {
        self.acid_resistant = true;
        self
    }
}

fn powder(kind: ElementKind, color: u32) -> ElementDescriptor {
    ElementDescriptor::new(kind, Category::Powder, Matter::POWDER, color).durability(0.2)
}

fn liquid(kind: ElementKind, color: u32) -> ElementDescriptor {
    ElementDescriptor::new(kind, Category::Liquid, Matter::LIQUID, color)
        .durability(0.9)
        .conductivity(0.1)
        .variation(4)
}

fn gas(kind: ElementKind, color: u32) -> ElementDescriptor {
    ElementDescriptor::new(kind, Category::Gas, Matter::GAS, color)
        .durability(0.0)
        .density(0.05)
        .conductivity(0.02)
}

fn solid(kind: ElementKind, color: u32) -> ElementDescriptor {
    ElementDescriptor::new(kind, Category::Solid, Matter::SOLID, color).density(2.0)
}

/// Built-in constants for `kind`
pub fn descriptor(kind: ElementKind) -> ElementDescriptor {
    use ElementKind::*;
    match kind {
        Sand => powder(Sand, rgb(194, 178, 128)).density(1.6),
        Salt => powder(Salt, rgb(240, 240, 240)).density(2.1).variation(4),
        Snow => powder(Snow, rgb(248, 250, 255)).density(0.5).temperature(-2.0).variation(3),
        Ash => powder(Ash, rgb(110, 110, 110)).density(0.2).temperature(40.0),
        GlassShard => powder(GlassShard, rgb(200, 230, 240)).density(2.0).acid_resistant(),
        Debris => powder(Debris, rgb(90, 80, 70)).density(2.0).variation(14),
        Bacteria => powder(Bacteria, rgb(120, 200, 80)).density(0.7).flammable(),
        Gunpowder => powder(Gunpowder, rgb(60, 60, 60)).density(1.7).flammable().explosive(),
        ExplosivePowder => powder(ExplosivePowder, rgb(150, 40, 40)).density(1.7).flammable().explosive(),
        Fertilizer => powder(Fertilizer, rgb(140, 110, 70)).density(1.3).explosive(),

        Water => liquid(Water, rgb(40, 110, 230)).temperature(20.0).acid_resistant(),
        Oil => liquid(Oil, rgb(60, 45, 20)).density(0.8).flammable(),
        Acid => liquid(Acid, rgb(140, 255, 60)).density(1.1).corrosive(),
        Lava => liquid(Lava, rgb(255, 90, 20)).density(2.5).temperature(1200.0).variation(12),
        Napalm => liquid(Napalm, rgb(255, 140, 0)).density(0.9).temperature(40.0).flammable(),
        Tar => liquid(Tar, rgb(25, 20, 15)).density(1.2).flammable(),
        Glue => liquid(Glue, rgb(235, 235, 210)).density(1.3),
        Sludge => liquid(Sludge, rgb(90, 80, 40)).density(2.2).variation(10),

        Smoke => gas(Smoke, rgb(90, 90, 90)).variation(10),
        Steam => gas(Steam, rgb(200, 210, 220)).density(0.04).temperature(110.0),
        AcidGas => gas(AcidGas, rgb(170, 230, 110)).density(0.3).temperature(30.0).corrosive(),
        Fire => gas(Fire, rgb(255, 110, 20)).density(0.02).temperature(400.0).variation(20),
        Plasma => gas(Plasma, rgb(220, 140, 255)).density(0.01).temperature(3000.0),
        StaticCharge => gas(StaticCharge, rgb(250, 250, 120)).density(0.1).temperature(100.0),
        Bubble => gas(Bubble, rgb(180, 220, 255)).variation(0),
        Balloon => gas(Balloon, rgb(230, 50, 70)).density(0.1).flammable().variation(0),

        Stone => solid(Stone, rgb(128, 128, 128)).density(2.6).durability(0.6).conductivity(0.1),
        Brick => solid(Brick, rgb(170, 70, 50)).density(1.8).durability(0.7).conductivity(0.2),
        Metal => ElementDescriptor::new(Metal, Category::Solid, Matter::HEAVY_SOLID, rgb(160, 165, 175))
            .density(7.8)
            .durability(0.8)
            .conductivity(0.5)
            .conductive(),
        Steel => solid(Steel, rgb(110, 120, 135))
            .density(7.8)
            .durability(0.95)
            .conductivity(0.2)
            .conductive()
            .acid_resistant(),
        Glass => solid(Glass, rgb(190, 220, 235)).density(2.5).durability(0.3).conductivity(0.01).acid_resistant(),
        Wood => solid(Wood, rgb(120, 80, 40)).density(0.7).durability(0.4).conductivity(0.02).flammable(),
        Ice => solid(Ice, rgb(170, 220, 255)).density(0.9).durability(0.3).temperature(-5.0).conductivity(0.2),
        SolidSalt => solid(SolidSalt, rgb(220, 220, 225)).density(2.2).durability(0.4),
        SolidAsh => solid(SolidAsh, rgb(80, 75, 70)).density(0.6).durability(0.1).temperature(100.0),
        Resin => solid(Resin, rgb(200, 130, 40)).density(1.1).durability(0.4).flammable(),
        Plant => solid(Plant, rgb(40, 160, 50)).density(0.8).durability(0.2).flammable(),
        Crystal => solid(Crystal, rgb(160, 120, 230)).density(2.5).durability(0.5).conductivity(0.1),

        C4 => ElementDescriptor::new(C4, Category::Explosive, Matter::SOLID, rgb(220, 210, 180))
            .density(1.6)
            .flammable()
            .explosive(),
        Dynamite => ElementDescriptor::new(Dynamite, Category::Explosive, Matter::HEAVY_SOLID, rgb(200, 40, 40))
            .density(1.5)
            .flammable()
            .explosive(),
        Fuse => ElementDescriptor::new(Fuse, Category::Solid, Matter::HEAVY_SOLID, rgb(150, 120, 80))
            .density(1.2)
            .durability(0.2)
            .conductivity(0.02)
            .flammable(),
        Torch => solid(Torch, rgb(255, 170, 60)).temperature(400.0).durability(0.6),
        Wire => ElementDescriptor::new(Wire, Category::Electrical, Matter::SOLID, rgb(200, 120, 60))
            .density(8.9)
            .conductivity(0.3)
            .conductive(),
        Switch => ElementDescriptor::new(Switch, Category::Electrical, Matter::SOLID, rgb(90, 90, 90))
            .conductive()
            .variation(0),
        Bulb => ElementDescriptor::new(Bulb, Category::Electrical, Matter::SOLID, rgb(240, 240, 200))
            .durability(0.3)
            .conductive()
            .variation(0),
        Battery => ElementDescriptor::new(Battery, Category::Electrical, Matter::SOLID, rgb(40, 40, 40))
            .durability(0.6)
            .conductive()
            .variation(0),
        Faucet => ElementDescriptor::new(Faucet, Category::Spawner, Matter::SOLID, rgb(150, 160, 170))
            .density(3.0)
            .durability(0.8)
            .variation(0),
        Eraser => ElementDescriptor::new(Eraser, Category::Eraser, Matter::EFFECT, rgb(255, 255, 255)).variation(0),

        WindEffect => ElementDescriptor::new(WindEffect, Category::Effect, Matter::EFFECT, rgb(200, 230, 255))
            .durability(0.0)
            .variation(10),
        HeatEffect => ElementDescriptor::new(HeatEffect, Category::Effect, Matter::EFFECT, rgb(255, 120, 60))
            .durability(0.0)
            .temperature(60.0)
            .variation(10),
        ColdEffect => ElementDescriptor::new(ColdEffect, Category::Effect, Matter::EFFECT, rgb(120, 200, 255))
            .durability(0.0)
            .temperature(-10.0)
            .variation(10),
    }
}

/// UI groups shown by the element picker. Tool names appear under `environmental`.
pub const UI_GROUPS: &[(&str, &[&str])] = &[
    ("basic", &["sand", "water", "fire", "stone"]),
    ("fire", &["fire", "lava", "torch", "fuse"]),
    ("gas", &["smoke", "steam", "acid-gas", "balloon"]),
    ("liquid", &["water", "oil", "lava", "acid", "tar", "sludge", "napalm", "glue"]),
    ("powder", &["sand", "salt", "snow", "ash", "gunpowder", "explosive-powder", "fertilizer"]),
    ("environmental", &["wind", "heat", "cold"]),
    ("explosive", &["gunpowder", "c4", "explosive-powder", "dynamite", "fertilizer"]),
    ("electrical", &["wire", "switch", "bulb", "battery", "static-charge"]),
    (
        "special",
        &[
            "torch", "plant", "metal", "steel", "glass", "brick", "crystal", "resin", "bacteria", "faucet",
            "bubble", "wood", "ice", "eraser",
        ],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_for_every_kind() {
        for kind in ElementKind::ALL {
            assert_eq!(ElementKind::from_name(kind.name()), Some(kind));
            assert_eq!(descriptor(kind).kind, kind);
        }
    }

    #[test]
    fn all_is_in_index_order() {
        for (i, kind) in ElementKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn serde_names_match_display_names() {
        let json = serde_json::to_string(&ElementKind::ExplosivePowder).unwrap();
        assert_eq!(json, "\"explosive-powder\"");
        let back: ElementKind = serde_json::from_str("\"c4\"").unwrap();
        assert_eq!(back, ElementKind::C4);
    }

    #[test]
    fn explosive_family_is_flagged() {
        for kind in [ElementKind::C4, ElementKind::Dynamite, ElementKind::ExplosivePowder, ElementKind::Gunpowder, ElementKind::Fertilizer] {
            assert!(descriptor(kind).explosive, "{kind}");
        }
        assert!(!descriptor(ElementKind::Fuse).explosive);
    }
}
