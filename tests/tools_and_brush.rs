use sandbox_engine::{ElementKind, WindDirection, WorldCore};

fn count(world: &WorldCore, kind: ElementKind) -> usize {
    world.grid().iter().filter(|(_, _, p)| p.kind == kind).count()
}

#[test]
fn brush_stamps_a_disc_of_half_the_brush_size() {
    let mut world = WorldCore::new(32, 32);
    world.set_brush_size(5);
    assert_eq!(world.create_particles_with_brush(16, 16, "stone"), 13);
    assert_eq!(count(&world, ElementKind::Stone), 13);
    assert!(world.get(18, 16).is_some());
    assert!(world.get(18, 18).is_none());
}

#[test]
fn brush_clips_at_the_edges() {
    let mut world = WorldCore::new(8, 8);
    world.set_brush_size(5);
    // quarter disc plus the two axes
    assert_eq!(world.create_particles_with_brush(0, 0, "stone"), 6);
}

#[test]
fn occupied_cells_are_kept_unless_override_is_on() {
    let mut world = WorldCore::new(16, 16);
    world.set_brush_size(5);
    world.place(8, 8, "stone");
    assert_eq!(world.create_particles_with_brush(8, 8, "wood"), 12);
    assert_eq!(world.get(8, 8).unwrap().kind, ElementKind::Stone);

    world.set_override_mode(true);
    assert_eq!(world.create_particles_with_brush(8, 8, "metal"), 13);
    assert_eq!(count(&world, ElementKind::Metal), 13);
}

#[test]
fn eraser_clears_regardless_of_override() {
    let mut world = WorldCore::new(16, 16);
    world.set_brush_size(5);
    world.create_particles_with_brush(8, 8, "stone");
    assert!(world.select_element("eraser"));
    assert_eq!(world.paint(8, 8), 13);
    assert_eq!(world.particle_count(), 0);
}

#[test]
fn switch_brush_toggles_existing_switches() {
    let mut world = WorldCore::new(16, 16);
    world.set_brush_size(1);
    world.place(4, 4, "stone");
    assert_eq!(world.create_particles_with_brush(4, 4, "switch"), 0);
    assert_eq!(world.create_particles_with_brush(6, 6, "switch"), 1);
    assert!(!world.get(6, 6).unwrap().activated);
    assert_eq!(world.create_particles_with_brush(6, 6, "switch"), 1);
    assert!(world.get(6, 6).unwrap().activated);
    assert!(world.toggle_switch(6, 6));
    assert!(!world.get(6, 6).unwrap().activated);
    assert!(!world.toggle_switch(4, 4));
}

#[test]
fn brush_is_idle_while_a_tool_is_selected() {
    let mut world = WorldCore::new(16, 16);
    assert!(world.select_tool("heat"));
    assert_eq!(world.paint(8, 8), 0);

    assert!(world.select_element("sand"));
    assert!(world.get_all_environmental_tools().iter().all(|t| !t.is_active));
    assert!(world.paint(8, 8) > 0);
}

#[test]
fn unknown_names_are_ignored() {
    let mut world = WorldCore::new(16, 16);
    assert_eq!(world.create_particles_with_brush(8, 8, "unobtainium"), 0);
    assert!(!world.select_element("unobtainium"));
    assert!(!world.select_tool("lightning"));
    assert!(!world.place(1, 1, "unobtainium"));
    assert_eq!(world.config().current_element, "sand");
}

#[test]
fn only_one_tool_is_active() {
    let mut world = WorldCore::new(8, 8);
    world.select_tool("wind");
    world.select_tool("cold");
    let active: Vec<_> = world.get_all_environmental_tools().into_iter().filter(|t| t.is_active).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].name, "cold");
    assert_eq!(world.get_environmental_tool("cold").map(|t| t.is_active), Some(true));
    assert!(world.get_environmental_tool("lightning").is_none());
}

#[test]
fn wind_pushes_sand_downwind() {
    let mut world = WorldCore::with_seed(12, 1, 17);
    world.place(2, 0, "sand");
    world.set_brush_size(1);
    world.select_tool("wind");
    world.set_wind_direction(WindDirection::Right);
    world.set_tool_strength(10);
    world.set_tool_applying(true);
    world.set_cursor(2, 0);

    let sand_x = |w: &WorldCore| w.grid().iter().find(|(_, _, p)| p.kind == ElementKind::Sand).map(|(x, _, _)| x);
    for _ in 0..60 {
        world.step();
        assert!(sand_x(&world).unwrap() >= 2);
    }
    assert!(sand_x(&world).unwrap() > 2);
}

#[test]
fn heat_tool_warms_the_cells_under_the_cursor() {
    let mut world = WorldCore::with_seed(9, 9, 5);
    world.place(4, 8, "stone");
    world.set_cursor(4, 8);
    world.select_tool("heat");
    world.set_tool_applying(true);
    world.step();
    assert!(world.get(4, 8).unwrap().temperature > 25.0);
}

#[test]
fn cold_tool_turns_lava_to_stone() {
    let mut world = WorldCore::with_seed(9, 9, 5);
    world.place(4, 8, "lava");
    world.set_cursor(4, 8);
    world.select_tool("cold");
    world.set_tool_applying(true);
    world.step();
    assert_eq!(world.get(4, 8).map(|p| p.kind), Some(ElementKind::Stone));
}

#[test]
fn clear_and_resize_empty_the_world() {
    let mut world = WorldCore::new(8, 8);
    world.set_brush_size(5);
    world.create_particles_with_brush(4, 4, "sand");
    world.clear();
    assert_eq!(world.particle_count(), 0);
    world.create_particles_with_brush(4, 4, "sand");
    world.resize(12, 6);
    assert_eq!((world.width(), world.height(), world.particle_count()), (12, 6, 0));
}

#[test]
fn pause_freezes_the_grid() {
    let mut world = WorldCore::new(8, 8);
    world.create_particles_with_brush(4, 2, "sand");
    let before: Vec<_> = world.grid().iter().map(|(x, y, p)| (x, y, p.kind)).collect();
    world.set_paused(true);
    for _ in 0..10 {
        assert!(!world.step());
    }
    let after: Vec<_> = world.grid().iter().map(|(x, y, p)| (x, y, p.kind)).collect();
    assert_eq!(before, after);
    assert_eq!(world.tick(), 0);
}
