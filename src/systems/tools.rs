//! Environmental tools - cursor-driven wind, heat and cold.
//!
//! Tools are not particles. Each registered tool carries a small runtime state
//! (selected, pointer held, strength, direction); at most one is selected at a
//! time and the registry enforces that on every selection.

use serde::{Deserialize, Serialize};

use crate::core::error::RegistryError;
use crate::core::utils::random::Rng;
use crate::domain::content::ElementRegistry;
use crate::domain::elements::ElementKind;
use crate::domain::particle::Particle;
use crate::spatial::grid::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindDirection {
    #[default]
    Right,
    Left,
    Up,
    Down,
}

impl WindDirection {
    pub fn offset(self) -> (i32, i32) {
        match self {
            WindDirection::Right => (1, 0),
            WindDirection::Left => (-1, 0),
            WindDirection::Up => (0, -1),
            WindDirection::Down => (0, 1),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "right" => Some(WindDirection::Right),
            "left" => Some(WindDirection::Left),
            "up" => Some(WindDirection::Up),
            "down" => Some(WindDirection::Down),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolState {
    pub active: bool,
    pub applying: bool,
    /// 1..=10
    pub strength: u32,
    pub direction: WindDirection,
}

impl Default for ToolState {
    fn default() -> Self {
        Self { active: false, applying: false, strength: 5, direction: WindDirection::Right }
    }
}

/// Grid access for one tool application
pub struct ToolContext<'a> {
    pub grid: &'a mut Grid,
    pub registry: &'a ElementRegistry,
    pub rng: &'a mut Rng,
    pub tick: u64,
}

impl ToolContext<'_> {
    fn create(&mut self, kind: ElementKind) -> Option<Particle> {
        let mut p = self.registry.create(kind, self.rng)?;
        p.mark_processed(self.tick);
        Some(p)
    }

    fn replace(&mut self, x: i32, y: i32, kind: ElementKind) {
        if let Some(p) = self.create(kind) {
            let _ = self.grid.replace(x, y, p);
        }
    }

    fn spawn_effect(&mut self, x: i32, y: i32, kind: ElementKind, velocity: (i32, i32)) {
        if !self.grid.is_empty(x, y) {
            return;
        }
        if let Some(mut p) = self.create(kind) {
            p.velocity.x = velocity.0 as f32;
            p.velocity.y = velocity.1 as f32;
            let _ = self.grid.insert(x, y, p);
        }
    }
}

pub trait EnvironmentalTool {
    fn name(&self) -> &'static str;
    fn apply(&self, state: &ToolState, ctx: &mut ToolContext, x: i32, y: i32, radius: i32);
}

/// Read-only snapshot handed to the UI
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolInfo {
    pub name: &'static str,
    pub is_active: bool,
    pub is_applying: bool,
    pub strength: u32,
    pub direction: WindDirection,
}

/// In-bounds offsets of the disc `dx² + dy² <= r²` around `(x, y)`
fn disc(grid: &Grid, x: i32, y: i32, r: i32) -> Vec<(i32, i32)> {
    let r2 = r * r;
    let mut cells = Vec::new();
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r2 && grid.in_bounds(x + dx, y + dy) {
                cells.push((x + dx, y + dy));
            }
        }
    }
    cells
}

pub struct Wind;

impl EnvironmentalTool for Wind {
    fn name(&self) -> &'static str {
        "wind"
    }

    fn apply(&self, state: &ToolState, ctx: &mut ToolContext, x: i32, y: i32, radius: i32) {
        let reach = (radius * 2).max(1);
        let (ox, oy) = state.direction.offset();
        let push = state.strength as f32 / 10.0;
        let picks = ctx.rng.range(3, 5);
        for _ in 0..picks {
            let dx = ctx.rng.range(-reach, reach);
            let dy = ctx.rng.range(-reach, reach);
            if dx * dx + dy * dy > reach * reach {
                continue;
            }
            let (cx, cy) = (x + dx, y + dy);
            if !ctx.grid.in_bounds(cx, cy) {
                continue;
            }
            match ctx.grid.get(cx, cy) {
                Some(p) if p.matter.movable() => {
                    if ctx.rng.chance(push) && ctx.grid.move_particle(cx, cy, cx + ox, cy + oy) {
                        if let Some(p) = ctx.grid.get_mut(cx + ox, cy + oy) {
                            p.velocity.x = ox as f32;
                            p.velocity.y = oy as f32;
                        }
                    }
                }
                Some(_) => {}
                None => {
                    if ctx.rng.chance(0.2) {
                        ctx.spawn_effect(cx, cy, ElementKind::WindEffect, (ox, oy));
                    }
                }
            }
        }
    }
}

pub struct Heat;

impl EnvironmentalTool for Heat {
    fn name(&self) -> &'static str {
        "heat"
    }

    fn apply(&self, state: &ToolState, ctx: &mut ToolContext, x: i32, y: i32, radius: i32) {
        let delta = 2.0 * state.strength as f32;
        // top-down so a risen particle is not lifted twice
        for (cx, cy) in disc(ctx.grid, x, y, radius) {
            let Some(kind) = ctx.grid.get(cx, cy).map(|p| p.kind) else {
                if ctx.rng.chance(0.2) {
                    ctx.spawn_effect(cx, cy, ElementKind::HeatEffect, (0, -1));
                }
                continue;
            };
            match kind {
                ElementKind::Water => {
                    if ctx.rng.chance(0.1) {
                        ctx.replace(cx, cy, ElementKind::Steam);
                    }
                }
                ElementKind::Ice | ElementKind::Snow => ctx.replace(cx, cy, ElementKind::Water),
                _ => {
                    let mut solid = true;
                    if let Some(p) = ctx.grid.get_mut(cx, cy) {
                        p.temperature += delta;
                        solid = p.matter.is_solid;
                    }
                    if !solid && ctx.rng.chance(0.4) {
                        ctx.grid.move_particle(cx, cy, cx, cy - 1);
                    }
                }
            }
        }
    }
}

pub struct Cold;

impl EnvironmentalTool for Cold {
    fn name(&self) -> &'static str {
        "cold"
    }

    fn apply(&self, state: &ToolState, ctx: &mut ToolContext, x: i32, y: i32, radius: i32) {
        let delta = 2.0 * state.strength as f32;
        let mut cells = disc(ctx.grid, x, y, radius);
        // bottom-up so a sunk particle is not dropped twice
        cells.reverse();
        for (cx, cy) in cells {
            let Some(kind) = ctx.grid.get(cx, cy).map(|p| p.kind) else {
                if ctx.rng.chance(0.2) {
                    ctx.spawn_effect(cx, cy, ElementKind::ColdEffect, (0, 1));
                }
                continue;
            };
            match kind {
                ElementKind::Water => {
                    if ctx.rng.chance(0.1) {
                        ctx.replace(cx, cy, ElementKind::Ice);
                    }
                }
                ElementKind::Steam => ctx.replace(cx, cy, ElementKind::Water),
                ElementKind::Lava => ctx.replace(cx, cy, ElementKind::Stone),
                _ => {
                    let mut solid = true;
                    if let Some(p) = ctx.grid.get_mut(cx, cy) {
                        p.temperature -= delta;
                        solid = p.matter.is_solid;
                    }
                    if !solid && ctx.rng.chance(0.4) {
                        ctx.grid.move_particle(cx, cy, cx, cy + 1);
                    }
                }
            }
        }
    }
}

struct Entry {
    tool: Box<dyn EnvironmentalTool>,
    state: ToolState,
}

pub struct ToolRegistry {
    entries: Vec<Entry>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        let builtin: [Box<dyn EnvironmentalTool>; 3] = [Box::new(Wind), Box::new(Heat), Box::new(Cold)];
        for tool in builtin {
            if let Err(err) = registry.register(tool) {
                log::warn!("builtin tool skipped: {err}");
            }
        }
        registry
    }

    pub fn register(&mut self, tool: Box<dyn EnvironmentalTool>) -> Result<(), RegistryError> {
        if self.entries.iter().any(|e| e.tool.name() == tool.name()) {
            return Err(RegistryError::DuplicateTool(tool.name()));
        }
        self.entries.push(Entry { tool, state: ToolState::default() });
        Ok(())
    }

    fn entry_mut(&mut self, name: &str) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.tool.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.tool.name() == name)
    }

    /// Make `name` the only active tool. Unknown names change nothing.
    pub fn select(&mut self, name: &str) -> bool {
        if !self.contains(name) {
            log::warn!("unknown environmental tool '{name}'");
            return false;
        }
        for entry in &mut self.entries {
            let selected = entry.tool.name() == name;
            entry.state.active = selected;
            if !selected {
                entry.state.applying = false;
            }
        }
        true
    }

    pub fn deselect_all(&mut self) {
        for entry in &mut self.entries {
            entry.state.active = false;
            entry.state.applying = false;
        }
    }

    /// Pointer pressed or released; only the active tool follows it
    pub fn set_applying(&mut self, applying: bool) {
        for entry in &mut self.entries {
            entry.state.applying = applying && entry.state.active;
        }
    }

    /// Strength for every tool, clamped to 1..=10
    pub fn set_strength(&mut self, strength: u32) {
        let strength = strength.clamp(1, 10);
        for entry in &mut self.entries {
            entry.state.strength = strength;
        }
    }

    pub fn set_direction(&mut self, direction: WindDirection) {
        if let Some(entry) = self.entry_mut("wind") {
            entry.state.direction = direction;
        }
    }

    pub fn active_name(&self) -> Option<&'static str> {
        self.entries.iter().find(|e| e.state.active).map(|e| e.tool.name())
    }

    pub fn any_active(&self) -> bool {
        self.entries.iter().any(|e| e.state.active)
    }

    pub fn strength(&self) -> u32 {
        self.entries.first().map_or(ToolState::default().strength, |e| e.state.strength)
    }

    pub fn direction(&self) -> WindDirection {
        self.entries
            .iter()
            .find(|e| e.tool.name() == "wind")
            .map_or(WindDirection::default(), |e| e.state.direction)
    }

    fn info(entry: &Entry) -> ToolInfo {
        ToolInfo {
            name: entry.tool.name(),
            is_active: entry.state.active,
            is_applying: entry.state.applying,
            strength: entry.state.strength,
            direction: entry.state.direction,
        }
    }

    pub fn get_all_environmental_tools(&self) -> Vec<ToolInfo> {
        self.entries.iter().map(Self::info).collect()
    }

    pub fn get_environmental_tool(&self, name: &str) -> Option<ToolInfo> {
        self.entries.iter().find(|e| e.tool.name() == name).map(Self::info)
    }

    /// Apply every active, applying tool once. Returns the number of applications.
    pub fn apply_active(&self, ctx: &mut ToolContext, x: i32, y: i32, radius: i32) -> u32 {
        let mut applied = 0;
        for entry in self.entries.iter().filter(|e| e.state.active && e.state.applying) {
            entry.tool.apply(&entry.state, ctx, x, y, radius);
            applied += 1;
        }
        applied
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx_parts() -> (Grid, ElementRegistry, Rng) {
        (Grid::new(16, 16), ElementRegistry::with_builtin(), Rng::new(7))
    }

    #[test]
    fn selecting_keeps_a_single_active_tool() {
        let mut tools = ToolRegistry::with_builtin();
        assert!(tools.select("wind"));
        assert!(tools.select("cold"));
        let active: Vec<_> = tools.get_all_environmental_tools().into_iter().filter(|t| t.is_active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "cold");
        assert!(!tools.select("lightning"));
        assert_eq!(tools.active_name(), Some("cold"));
    }

    #[test]
    fn duplicate_tool_is_rejected() {
        let mut tools = ToolRegistry::with_builtin();
        assert_eq!(tools.register(Box::new(Heat)), Err(RegistryError::DuplicateTool("heat")));
    }

    #[test]
    fn applying_follows_the_active_tool_only() {
        let mut tools = ToolRegistry::with_builtin();
        tools.set_applying(true);
        assert!(tools.get_all_environmental_tools().iter().all(|t| !t.is_applying));
        tools.select("heat");
        tools.set_applying(true);
        assert_eq!(tools.get_environmental_tool("heat").map(|t| t.is_applying), Some(true));
        tools.deselect_all();
        assert!(!tools.any_active());
    }

    #[test]
    fn strength_is_clamped() {
        let mut tools = ToolRegistry::with_builtin();
        tools.set_strength(40);
        assert_eq!(tools.strength(), 10);
        tools.set_strength(0);
        assert_eq!(tools.strength(), 1);
    }

    #[test]
    fn heat_warms_solids_and_boils_nothing_else() {
        let (mut grid, registry, mut rng) = ctx_parts();
        let stone = registry.create(ElementKind::Stone, &mut rng).unwrap();
        grid.insert(8, 8, stone).unwrap();
        let mut ctx = ToolContext { grid: &mut grid, registry: &registry, rng: &mut rng, tick: 1 };
        Heat.apply(&ToolState::default(), &mut ctx, 8, 8, 0);
        assert_eq!(grid.get(8, 8).map(|p| p.temperature), Some(35.0));
    }

    #[test]
    fn cold_turns_lava_into_stone() {
        let (mut grid, registry, mut rng) = ctx_parts();
        let lava = registry.create(ElementKind::Lava, &mut rng).unwrap();
        grid.insert(3, 3, lava).unwrap();
        let mut ctx = ToolContext { grid: &mut grid, registry: &registry, rng: &mut rng, tick: 1 };
        Cold.apply(&ToolState::default(), &mut ctx, 3, 3, 0);
        assert_eq!(grid.get(3, 3).map(|p| p.kind), Some(ElementKind::Stone));
    }
}
