use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::systems::tools::WindDirection;

use super::perf_stats::PerfStats;
use super::WorldCore;

/// Where the pixel buffer lives in wasm memory
#[wasm_bindgen]
pub struct PixelLayout {
    ptr: u32,
    len_elements: u32,
    len_bytes: u32,
}

#[wasm_bindgen]
impl PixelLayout {
    #[wasm_bindgen(getter)]
    pub fn ptr(&self) -> u32 { self.ptr }
    #[wasm_bindgen(getter)]
    pub fn len_elements(&self) -> u32 { self.len_elements }
    #[wasm_bindgen(getter)]
    pub fn len_bytes(&self) -> u32 { self.len_bytes }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        log::error!("json encoding failed: {err}");
        "null".to_string()
    })
}

#[wasm_bindgen]
pub struct World {
    core: WorldCore,
}

#[wasm_bindgen]
impl World {
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Self {
        Self { core: WorldCore::new(width, height) }
    }

    #[wasm_bindgen(js_name = withSeed)]
    pub fn with_seed(width: u32, height: u32, seed: u32) -> Self {
        Self { core: WorldCore::with_seed(width, height, seed) }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.core.height() }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.core.particle_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn tick(&self) -> u64 { self.core.tick() }

    // === Tick ===

    /// Run one tick unless paused
    pub fn step(&mut self) -> bool {
        self.core.step()
    }

    /// Call once per animation frame; ticks at most `target_fps` times a second
    pub fn frame(&mut self, now_ms: f64) -> bool {
        self.core.frame(now_ms)
    }

    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    // === Settings ===

    pub fn set_paused(&mut self, paused: bool) {
        self.core.set_paused(paused);
    }

    pub fn is_paused(&self) -> bool {
        self.core.is_paused()
    }

    pub fn set_brush_size(&mut self, size: u32) {
        self.core.set_brush_size(size);
    }

    pub fn set_override_mode(&mut self, enabled: bool) {
        self.core.set_override_mode(enabled);
    }

    pub fn set_no_boundaries(&mut self, enabled: bool) {
        self.core.set_no_boundaries(enabled);
    }

    pub fn set_enable_shadows(&mut self, enabled: bool) {
        self.core.set_enable_shadows(enabled);
    }

    pub fn set_show_sleeping_particles(&mut self, enabled: bool) {
        self.core.set_show_sleeping_particles(enabled);
    }

    pub fn set_target_fps(&mut self, fps: u32) {
        self.core.set_target_fps(fps);
    }

    pub fn set_cursor(&mut self, x: i32, y: i32) {
        self.core.set_cursor(x, y);
    }

    pub fn clear_cursor(&mut self) {
        self.core.clear_cursor();
    }

    // === Brush ===

    pub fn select_element(&mut self, name: &str) -> bool {
        self.core.select_element(name)
    }

    /// Stamp the selected element around `(cx, cy)`
    pub fn paint(&mut self, cx: i32, cy: i32) -> u32 {
        self.core.paint(cx, cy)
    }

    pub fn paint_element(&mut self, cx: i32, cy: i32, name: &str) -> u32 {
        self.core.create_particles_with_brush(cx, cy, name)
    }

    pub fn place(&mut self, x: i32, y: i32, name: &str) -> bool {
        self.core.place(x, y, name)
    }

    pub fn erase(&mut self, cx: i32, cy: i32, radius: i32) -> u32 {
        self.core.erase_in_radius(cx, cy, radius)
    }

    pub fn toggle_switch(&mut self, x: i32, y: i32) -> bool {
        self.core.toggle_switch(x, y)
    }

    pub fn clear(&mut self) {
        self.core.clear();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.core.resize(width, height);
    }

    // === Environmental tools ===

    pub fn select_tool(&mut self, name: &str) -> bool {
        self.core.select_tool(name)
    }

    pub fn deselect_tools(&mut self) {
        self.core.deselect_tools();
    }

    /// Pointer held down over the canvas
    pub fn set_tool_applying(&mut self, applying: bool) {
        self.core.set_tool_applying(applying);
    }

    pub fn set_tool_strength(&mut self, strength: u32) {
        self.core.set_tool_strength(strength);
    }

    pub fn set_wind_direction(&mut self, direction: &str) -> bool {
        match WindDirection::from_name(direction) {
            Some(d) => {
                self.core.set_wind_direction(d);
                true
            }
            None => {
                log::warn!("unknown wind direction '{direction}'");
                false
            }
        }
    }

    pub fn get_all_environmental_tools(&self) -> String {
        to_json(&self.core.get_all_environmental_tools())
    }

    pub fn get_environmental_tool(&self, name: &str) -> Option<String> {
        self.core.get_environmental_tool(name).map(|t| to_json(&t))
    }

    // === Element introspection ===

    pub fn get_element_names(&self) -> String {
        to_json(&self.core.registry().get_element_names())
    }

    pub fn get_element(&self, name: &str) -> Option<String> {
        self.core.registry().get_element(name).map(to_json)
    }

    pub fn get_element_color(&self, name: &str) -> String {
        self.core.registry().get_element_color(name)
    }

    pub fn get_elements_by_category(&self, group: &str) -> String {
        to_json(&self.core.registry().get_elements_by_category(group))
    }

    pub fn get_categories(&self) -> String {
        to_json(&self.core.registry().categories())
    }

    // === Persistence ===

    pub fn export_json(&mut self) -> Result<String, JsValue> {
        self.core.export_json().map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Returns the import summary as JSON
    pub fn import_json(&mut self, json: &str) -> Result<String, JsValue> {
        self.core
            .import_json(json)
            .map(|summary| to_json(&summary))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn ui_state(&self) -> String {
        to_json(&self.core.ui_state())
    }

    pub fn drain_notifications(&mut self) -> String {
        to_json(&self.core.drain_notifications())
    }

    // === Rendering ===

    /// Render into the internal buffer and return its pointer
    pub fn render(&mut self) -> *const u32 {
        self.core.render().as_ptr()
    }

    pub fn pixels_len(&self) -> usize {
        self.core.width() as usize * self.core.height() as usize
    }

    /// Render, then describe the buffer for a zero-copy `ImageData` view
    pub fn pixel_layout(&mut self) -> PixelLayout {
        let pixels = self.core.render();
        PixelLayout {
            ptr: pixels.as_ptr() as u32,
            len_elements: pixels.len() as u32,
            len_bytes: std::mem::size_of_val(pixels) as u32,
        }
    }
}
