use super::*;
use crate::core::error::BehaviorError;
use crate::core::utils::color::BG_COLOR;
use crate::domain::elements::{descriptor, ElementKind};
use crate::systems::behaviors::{ElementBehavior, UpdateContext};

struct Broken;

impl ElementBehavior for Broken {
    fn kind(&self) -> ElementKind {
        ElementKind::Sand
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        Err(ctx.mismatch())
    }
}

fn kind_at(world: &WorldCore, x: i32, y: i32) -> Option<ElementKind> {
    world.get(x, y).map(|p| p.kind)
}

#[test]
fn tick_ids_start_at_one() {
    let mut world = WorldCore::new(4, 4);
    assert_eq!(world.tick(), 0);
    assert!(world.step());
    assert_eq!(world.tick(), 1);
    assert_eq!(world.get_perf_stats().tick(), 1);
}

#[test]
fn paused_world_does_not_tick() {
    let mut world = WorldCore::new(4, 4);
    world.place(1, 0, "sand");
    world.set_paused(true);
    assert!(!world.step());
    assert_eq!(world.tick, 0);
    assert_eq!(kind_at(&world, 1, 0), Some(ElementKind::Sand));
}

#[test]
fn sand_falls_one_cell_per_tick() {
    let mut world = WorldCore::new(3, 4);
    world.place(1, 0, "sand");
    world.step();
    assert_eq!(kind_at(&world, 1, 1), Some(ElementKind::Sand));
    assert!(world.get(1, 0).is_none());
    assert_eq!(world.perf_stats.particles_processed, 1);
}

#[test]
fn failing_behavior_is_skipped_and_still_falls() {
    let mut registry = ElementRegistry::new();
    registry.register(Box::new(Broken)).unwrap();
    let mut world = WorldCore::with_registry(3, 3, registry, 1);
    world.place(1, 0, "sand");

    world.step();

    assert_eq!(world.perf_stats.behavior_failures, 1);
    assert_eq!(world.perf_stats.gravity_drops, 1);
    assert_eq!(kind_at(&world, 1, 1), Some(ElementKind::Sand));
    let p = world.get(1, 1).unwrap();
    assert!(!p.is_processed(world.tick));
}

#[test]
fn unregistered_kinds_fall_through_residual_gravity() {
    let mut world = WorldCore::with_registry(2, 3, ElementRegistry::new(), 1);
    world.grid.insert(0, 0, Particle::new(&descriptor(ElementKind::Water))).unwrap();
    world.step();
    world.step();
    assert_eq!(kind_at(&world, 0, 2), Some(ElementKind::Water));
    world.step();
    assert_eq!(kind_at(&world, 0, 2), Some(ElementKind::Water));
}

#[test]
fn no_boundaries_lets_sand_leave_the_bottom() {
    let mut world = WorldCore::new(3, 3);
    world.set_no_boundaries(true);
    world.place(1, 2, "sand");
    world.step();
    assert_eq!(world.particle_count(), 0);
    assert_eq!(world.perf_stats.boundary_removals, 1);
}

#[test]
fn no_boundaries_releases_gases_fire_and_effects() {
    let mut world = WorldCore::with_registry(4, 3, ElementRegistry::new(), 1);
    world.set_no_boundaries(true);
    for (x, y, kind) in [
        (0, 2, ElementKind::Smoke),
        (1, 2, ElementKind::Stone),
        (2, 2, ElementKind::Fire),
        (3, 2, ElementKind::ColdEffect),
        (2, 0, ElementKind::HeatEffect),
        (1, 0, ElementKind::WindEffect),
    ] {
        world.grid.insert(x, y, Particle::new(&descriptor(kind))).unwrap();
    }

    world.step();

    assert_eq!(world.perf_stats.boundary_removals, 4);
    assert_eq!(kind_at(&world, 1, 2), Some(ElementKind::Stone));
    assert_eq!(kind_at(&world, 1, 0), Some(ElementKind::WindEffect));
    assert!(world.get(2, 0).is_none());
}

#[test]
fn bounded_world_keeps_sand_on_the_floor() {
    let mut world = WorldCore::new(3, 3);
    world.place(1, 2, "sand");
    for _ in 0..5 {
        world.step();
    }
    assert_eq!(kind_at(&world, 1, 2), Some(ElementKind::Sand));
}

#[test]
fn tool_pass_applies_three_times_at_the_cursor() {
    let mut world = WorldCore::new(10, 10);
    world.place(5, 5, "stone");
    assert!(world.select_tool("heat"));
    world.set_tool_applying(true);
    world.set_cursor(5, 5);
    world.step();
    assert_eq!(world.perf_stats.tool_applications, 3);
    assert!(world.get(5, 5).unwrap().temperature > 25.0);
}

#[test]
fn tool_pass_needs_a_cursor() {
    let mut world = WorldCore::new(10, 10);
    world.select_tool("wind");
    world.set_tool_applying(true);
    world.step();
    assert_eq!(world.perf_stats.tool_applications, 0);
}

#[test]
fn frame_limiter_gates_ticks() {
    let mut world = WorldCore::new(4, 4);
    world.set_target_fps(30);
    assert!(world.frame(0.0));
    assert!(!world.frame(16.7));
    assert!(world.frame(33.4));
    assert_eq!(world.tick(), 2);
}

#[test]
fn render_uses_background_for_empty_cells_even_when_paused() {
    let mut world = WorldCore::new(2, 2);
    world.place(0, 0, "stone");
    world.set_paused(true);
    let mut buf = vec![0u32; 4];
    assert_eq!(world.render_into(&mut buf), 4);
    assert_ne!(buf[0], BG_COLOR);
    assert_eq!(&buf[1..], &[BG_COLOR; 3]);
    assert_eq!(world.render().len(), 4);
}

#[test]
fn render_follows_resize() {
    let mut world = WorldCore::new(2, 2);
    world.resize(3, 5);
    assert_eq!(world.render().len(), 15);
    assert_eq!(world.particle_count(), 0);
}

#[test]
fn notification_queue_is_bounded_and_drains() {
    let mut world = WorldCore::new(2, 2);
    for i in 0..40 {
        world.notify(format!("n{i}"), Severity::Info);
    }
    let drained = world.drain_notifications();
    assert_eq!(drained.len(), 32);
    assert_eq!(drained.last().unwrap().message, "n39");
    assert!(world.drain_notifications().is_empty());
}

#[test]
fn rejected_import_leaves_grid_and_rng_alone() {
    let mut world = WorldCore::new(4, 4);
    world.place(2, 2, "stone");
    let before = world.rng.clone();
    assert!(matches!(world.import_json(r#"{"grid":{"width":4}}"#), Err(SaveError::MissingCells)));
    assert_eq!(kind_at(&world, 2, 2), Some(ElementKind::Stone));
    assert_eq!(world.rng, before);
}

#[test]
fn import_restores_ui_state() {
    let mut world = WorldCore::new(4, 4);
    let json = r#"{
        "grid": { "width": 4, "height": 4, "cells": [] },
        "ui": { "currentElement": "water", "brushSize": 9, "currentEnvTool": "cold", "windDirection": "up" }
    }"#;
    world.import_json(json).unwrap();
    assert_eq!(world.config.current_element, "water");
    assert_eq!(world.config.brush_size, 9);
    assert_eq!(world.tools.active_name(), Some("cold"));
    assert_eq!(world.tools.direction(), WindDirection::Up);
}
