//! Save files: `{ grid: { width, height, cells }, ui, metadata }` as JSON.
//!
//! Import is tolerant: unknown element names are skipped, the bare grid object
//! of older saves is accepted, and a grid of another size is mapped onto the
//! current one by scaling coordinates. The replacement grid is assembled off
//! to the side, so a rejected payload leaves the world as it was.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::error::SaveError;
use crate::core::utils::color;
use crate::core::utils::random::Rng;
use crate::domain::elements::ElementKind;
use crate::domain::particle::Particle;
use crate::spatial::grid::Grid;

use super::config::{UiState, MAX_BRUSH, MIN_BRUSH};
use super::notifications::{self, Severity};
use super::WorldCore;

/// One occupied cell. Everything but position and type is optional on import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellData {
    pub x: i32,
    pub y: i32,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub burning: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub burn_duration: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potency: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flammable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub durability: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stable_counter: Option<u32>,
}

impl CellData {
    fn from_particle(x: i32, y: i32, p: &Particle) -> Self {
        Self {
            x,
            y,
            kind: p.kind.name().to_string(),
            color: Some(color::to_hex(p.color)),
            temperature: Some(p.temperature),
            burning: Some(p.burning),
            burn_duration: Some(p.burn_duration),
            activated: Some(p.activated),
            potency: Some(p.potency),
            flammable: Some(p.flammable),
            durability: Some(p.durability),
            stable_counter: Some(p.stable_counter),
        }
    }

    /// Overlay the saved fields on a freshly created particle
    fn apply_to(&self, p: &mut Particle) {
        if let Some(c) = self.color.as_deref().and_then(color::parse) {
            p.color = c;
        }
        if let Some(t) = self.temperature.filter(|t| t.is_finite()) {
            p.temperature = t;
        }
        if let Some(b) = self.burning {
            p.burning = b;
        }
        if let Some(d) = self.burn_duration {
            p.burn_duration = d;
        }
        if let Some(a) = self.activated {
            p.activated = a;
        }
        if let Some(v) = self.potency {
            p.potency = v;
        }
        if let Some(f) = self.flammable {
            p.flammable = f;
        }
        if let Some(d) = self.durability {
            p.durability = d.clamp(0.0, 1.0);
        }
        if let Some(s) = self.stable_counter {
            p.stable_counter = s;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub cells: Vec<CellData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveMetadata {
    pub version: String,
    pub tick: u64,
    pub particle_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    pub grid: GridData,
    #[serde(default)]
    pub ui: UiState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SaveMetadata>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub restored: u32,
    pub skipped: u32,
    /// Coordinates were mapped from a grid of another size
    pub scaled: bool,
}

pub(super) fn ui_state(world: &WorldCore) -> UiState {
    let config = &world.config;
    UiState {
        current_element: config.current_element.clone(),
        brush_size: config.brush_size,
        paused: config.paused,
        current_env_tool: world.tools.active_name().map(str::to_string),
        wind_direction: world.tools.direction(),
        env_tool_strength: world.tools.strength(),
        no_boundaries: config.no_boundaries,
        override_gravity: config.override_mode,
        enable_shadows: config.enable_shadows,
        show_sleeping_particles: config.show_sleeping_particles,
    }
}

pub(super) fn save_file(world: &WorldCore) -> SaveFile {
    let cells: Vec<CellData> = world.grid.iter().map(|(x, y, p)| CellData::from_particle(x, y, p)).collect();
    let particle_count = cells.len() as u32;
    SaveFile {
        grid: GridData { width: Some(world.grid.width()), height: Some(world.grid.height()), cells },
        ui: ui_state(world),
        metadata: Some(SaveMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            tick: world.tick,
            particle_count,
        }),
    }
}

pub(super) fn export_json(world: &mut WorldCore) -> Result<String, SaveError> {
    let file = save_file(world);
    let count = file.grid.cells.len();
    match serde_json::to_string(&file) {
        Ok(json) => {
            log::info!("exported {count} particles");
            notifications::push(world, format!("Saved {count} particles"), Severity::Success);
            Ok(json)
        }
        Err(err) => {
            log::error!("export failed: {err}");
            notifications::push(world, "Failed to save the simulation".to_string(), Severity::Error);
            Err(err.into())
        }
    }
}

pub(super) fn import_json(world: &mut WorldCore, json: &str) -> Result<ImportSummary, SaveError> {
    let decoded = match decode(world, json) {
        Ok(decoded) => decoded,
        Err(err) => {
            log::error!("import rejected: {err}");
            notifications::push(world, err.to_string(), Severity::Error);
            return Err(err);
        }
    };

    let (w, h) = (world.grid.width(), world.grid.height());
    if decoded.summary.scaled {
        let (sw, sh) = decoded.source;
        log::warn!("save grid {sw}x{sh} scaled onto {w}x{h}");
        notifications::push(
            world,
            format!("Grid size adapted from {sw}x{sh} to {w}x{h}"),
            Severity::Info,
        );
    }

    world.grid = decoded.grid;
    if let Some(ui) = decoded.ui {
        apply_ui(world, &ui);
    }

    let ImportSummary { restored, skipped, .. } = decoded.summary;
    log::info!("imported {restored} particles ({skipped} skipped)");
    notifications::push(world, format!("Loaded {restored} particles"), Severity::Success);
    Ok(decoded.summary)
}

struct Decoded {
    grid: Grid,
    ui: Option<UiState>,
    summary: ImportSummary,
    source: (u32, u32),
}

/// `floor(v * to / from)`
fn scale(v: i32, from: u32, to: u32) -> i32 {
    (i64::from(v) * i64::from(to)).div_euclid(i64::from(from.max(1))) as i32
}

fn decode(world: &WorldCore, json: &str) -> Result<Decoded, SaveError> {
    let value: Value = serde_json::from_str(json)?;
    // Older saves are the grid object itself
    let grid_value = match value.get("grid") {
        Some(g) if g.is_object() => g,
        _ => &value,
    };
    let cells = grid_value.get("cells").and_then(Value::as_array).ok_or(SaveError::MissingCells)?;

    let (w, h) = (world.grid.width(), world.grid.height());
    let dimension = |key: &str, current: u32| {
        grid_value
            .get(key)
            .and_then(Value::as_u64)
            .filter(|&v| v > 0)
            .map_or(current, |v| v as u32)
    };
    let source = (dimension("width", w), dimension("height", h));
    let scaled = source != (w, h);

    let mut grid = Grid::new(w, h);
    let mut rng = Rng::new(world.config.seed ^ cells.len() as u32);
    let mut summary = ImportSummary { restored: 0, skipped: 0, scaled };

    for cell in cells {
        let data = CellData::deserialize(cell).map_err(|e| SaveError::InvalidGrid(e.to_string()))?;
        let particle = ElementKind::from_name(&data.kind)
            .filter(|&k| world.registry.is_registered(k))
            .and_then(|k| world.registry.create(k, &mut rng));
        let Some(mut particle) = particle else {
            log::debug!("skipping unknown element '{}'", data.kind);
            summary.skipped += 1;
            continue;
        };
        let (x, y) = if scaled {
            (scale(data.x, source.0, w), scale(data.y, source.1, h))
        } else {
            (data.x, data.y)
        };
        data.apply_to(&mut particle);
        match grid.replace(x, y, particle) {
            Ok(None) => summary.restored += 1,
            // Two saved cells scaled onto one; the later one wins
            Ok(Some(_)) => summary.skipped += 1,
            Err(_) => summary.skipped += 1,
        }
    }

    let ui = value.get("ui").map(|ui| UiState::deserialize(ui).unwrap_or_default());
    Ok(Decoded { grid, ui, summary, source })
}

fn apply_ui(world: &mut WorldCore, ui: &UiState) {
    let config = &mut world.config;
    config.brush_size = ui.brush_size.clamp(MIN_BRUSH, MAX_BRUSH);
    config.paused = ui.paused;
    config.no_boundaries = ui.no_boundaries;
    config.override_mode = ui.override_gravity;
    config.enable_shadows = ui.enable_shadows;
    config.show_sleeping_particles = ui.show_sleeping_particles;
    let known = ui.current_element == "eraser"
        || ElementKind::from_name(&ui.current_element).is_some_and(|k| world.registry.is_registered(k));
    if known {
        config.current_element = ui.current_element.clone();
    }

    world.tools.set_strength(ui.env_tool_strength);
    world.tools.set_direction(ui.wind_direction);
    match ui.current_env_tool.as_deref() {
        Some(name) => {
            world.tools.select(name);
        }
        None => world.tools.deselect_all(),
    }
    world.tools.set_applying(false);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_floors_toward_negative_infinity() {
        assert_eq!(scale(3, 10, 20), 6);
        assert_eq!(scale(9, 10, 5), 4);
        assert_eq!(scale(-1, 20, 10), -1);
    }

    #[test]
    fn cell_records_tolerate_missing_fields() {
        let cell: CellData = serde_json::from_str(r#"{"x":1,"y":2,"type":"sand"}"#).unwrap();
        assert_eq!(cell.kind, "sand");
        assert!(cell.temperature.is_none());
    }

    #[test]
    fn export_writes_type_and_camel_case_keys() {
        let p = Particle::new(&crate::domain::elements::descriptor(ElementKind::Wood));
        let json = serde_json::to_string(&CellData::from_particle(4, 5, &p)).unwrap();
        assert!(json.contains(r#""type":"wood""#));
        assert!(json.contains("burnDuration"));
        assert!(json.contains("stableCounter"));
    }
}
