use sandbox_engine::behaviors::{ElementBehavior, UpdateContext};
use sandbox_engine::{BehaviorError, ElementKind, ElementRegistry, WorldCore};

/// Counts its own updates in `stable_counter` and wanders upward
struct Counting;

impl ElementBehavior for Counting {
    fn kind(&self) -> ElementKind {
        ElementKind::Smoke
    }

    fn process(&self, ctx: &mut UpdateContext) -> Result<(), BehaviorError> {
        ctx.particle_mut()?.stable_counter += 1;
        if !ctx.move_by(0, -1) {
            let dx = if ctx.rng.coin() { 1 } else { -1 };
            ctx.move_by(dx, 0);
        }
        Ok(())
    }
}

fn counting_world() -> WorldCore {
    let mut registry = ElementRegistry::new();
    registry.register(Box::new(Counting)).unwrap();
    WorldCore::with_registry(6, 8, registry, 99)
}

#[test]
fn every_particle_is_processed_exactly_once_per_tick() {
    let mut world = counting_world();
    for x in 0..6 {
        assert!(world.place(x, 7, "smoke"));
    }
    for tick in 1..=20u32 {
        world.step();
        let counts: Vec<u32> = world.grid().iter().map(|(_, _, p)| p.stable_counter).collect();
        assert_eq!(counts.len(), 6);
        assert!(counts.iter().all(|&c| c == tick), "tick {tick}: {counts:?}");
    }
}

#[test]
fn particles_are_conserved_in_a_closed_box() {
    let mut world = WorldCore::with_seed(24, 24, 5);
    world.set_brush_size(9);
    world.create_particles_with_brush(6, 4, "sand");
    world.create_particles_with_brush(17, 4, "stone");
    world.create_particles_with_brush(12, 12, "sand");
    let before = world.particle_count();
    assert!(before > 0);

    for _ in 0..150 {
        world.step();
        assert_eq!(world.particle_count(), before);
    }
}

#[test]
fn behaviors_at_every_edge_stay_in_bounds() {
    let names = [
        "sand", "water", "oil", "acid", "lava", "smoke", "steam", "fire", "plasma", "static-charge", "bubble",
        "balloon", "plant", "crystal", "bacteria", "salt", "snow", "napalm", "glue", "sludge", "fuse", "torch",
        "faucet", "battery", "wire", "metal", "gunpowder", "explosive-powder", "fertilizer", "dynamite", "c4",
    ];
    let mut world = WorldCore::with_seed(12, 12, 77);
    let edge: Vec<(i32, i32)> = (0..12)
        .flat_map(|i| [(i, 0), (i, 11), (0, i), (11, i)])
        .collect();
    for (i, &(x, y)) in edge.iter().enumerate() {
        world.place(x, y, names[i % names.len()]);
    }
    for _ in 0..200 {
        world.step();
    }
    for (x, y, _) in world.grid().iter() {
        assert!(world.grid().in_bounds(x, y));
    }
    assert_eq!(world.get_perf_stats().behavior_failures(), 0);
}
