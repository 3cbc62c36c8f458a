use sandbox_engine::systems::combustion::ignite;
use sandbox_engine::{ElementKind, WorldCore};

fn kind_at(world: &WorldCore, x: i32, y: i32) -> Option<ElementKind> {
    world.get(x, y).map(|p| p.kind)
}

#[test]
fn water_next_to_lava_turns_to_steam_in_one_tick() {
    for seed in 1..20 {
        let mut world = WorldCore::with_seed(2, 1, seed);
        world.place(0, 0, "water");
        world.place(1, 0, "lava");
        world.get_mut(1, 0).unwrap().temperature = 1200.0;

        world.step();

        let kinds: Vec<_> = world.grid().iter().map(|(_, _, p)| p.kind).collect();
        assert!(!kinds.contains(&ElementKind::Water), "seed {seed}: {kinds:?}");
        assert!(kinds.contains(&ElementKind::Steam), "seed {seed}: {kinds:?}");
    }
}

#[test]
fn wood_burns_down_to_ash() {
    let mut world = WorldCore::with_seed(5, 5, 3);
    world.place(2, 4, "wood");
    ignite(world.get_mut(2, 4).unwrap());
    let mut burnt = false;
    for _ in 0..400 {
        world.step();
        if kind_at(&world, 2, 4) != Some(ElementKind::Wood) {
            burnt = true;
            break;
        }
    }
    assert!(burnt);
    assert_ne!(kind_at(&world, 2, 4), Some(ElementKind::Wood));
}

#[test]
fn fuse_line_lights_in_order() {
    let mut world = WorldCore::with_seed(10, 5, 11);
    for x in 0..5 {
        assert!(world.place(x, 4, "fuse"));
    }
    ignite(world.get_mut(0, 4).unwrap());

    let mut lit_at: [Option<u64>; 5] = [None; 5];
    for _ in 0..200 {
        world.step();
        for (x, slot) in lit_at.iter_mut().enumerate() {
            let caught = world.get(x as i32, 4).map_or(true, |p| p.burning || p.kind != ElementKind::Fuse);
            if caught && slot.is_none() {
                *slot = Some(world.tick());
            }
        }
        if lit_at.iter().all(Option::is_some) {
            break;
        }
    }

    let ticks: Vec<u64> = lit_at.iter().map(|t| t.expect("every segment lights")).collect();
    assert!(ticks.windows(2).all(|w| w[0] < w[1]), "{ticks:?}");
}

#[test]
fn airborne_fuse_line_lands_and_lights_in_order() {
    let mut world = WorldCore::with_seed(10, 12, 11);
    for x in 0..5 {
        assert!(world.place(x, 0, "fuse"));
    }
    ignite(world.get_mut(0, 0).unwrap());

    // A column has caught once no unlit fuse is left in it
    let caught = |world: &WorldCore, x: i32| {
        !world
            .grid()
            .iter()
            .any(|(px, _, p)| px == x && p.kind == ElementKind::Fuse && !p.burning)
    };

    let mut lit_at: [Option<u64>; 5] = [None; 5];
    for _ in 0..300 {
        world.step();
        for (x, slot) in lit_at.iter_mut().enumerate() {
            if slot.is_none() && caught(&world, x as i32) {
                *slot = Some(world.tick());
            }
        }
        if lit_at.iter().all(Option::is_some) {
            break;
        }
    }

    let ticks: Vec<u64> = lit_at.iter().map(|t| t.expect("every segment lights")).collect();
    assert!(ticks.windows(2).all(|w| w[0] < w[1]), "{ticks:?}");
    for (x, y, p) in world.grid().iter() {
        if x < 5 && matches!(p.kind, ElementKind::Fuse | ElementKind::Ash) {
            assert_eq!(y, 11, "segment {x} did not land");
        }
    }
}

#[test]
fn battery_wire_bulb_lights_up() {
    let mut world = WorldCore::with_seed(6, 3, 4);
    world.place(1, 2, "battery");
    world.place(2, 2, "wire");
    world.place(3, 2, "bulb");
    for _ in 0..5 {
        world.step();
    }
    assert!(world.get(3, 2).unwrap().activated);
}

#[test]
fn open_switch_keeps_the_bulb_dark() {
    let mut world = WorldCore::with_seed(8, 3, 4);
    world.place(1, 2, "battery");
    world.place(2, 2, "wire");
    world.place(3, 2, "switch");
    world.place(4, 2, "wire");
    world.place(5, 2, "bulb");
    for _ in 0..10 {
        world.step();
    }
    assert!(!world.get(5, 2).unwrap().activated);

    assert!(world.toggle_switch(3, 2));
    for _ in 0..5 {
        world.step();
    }
    assert!(world.get(5, 2).unwrap().activated);
}
