use super::WorldCore;

/// Drop every unstamped falling particle one cell into an empty cell below.
/// Bottom-up, so a dropped particle is never dropped twice.
pub(super) fn residual_gravity(world: &mut WorldCore) -> u32 {
    let (w, h) = (world.grid.width() as i32, world.grid.height() as i32);
    let tick = world.tick;
    let mut drops = 0;
    for y in (0..h - 1).rev() {
        for x in 0..w {
            let falls = match world.grid.get(x, y) {
                Some(p) => !p.is_processed(tick) && p.matter.falls(),
                None => continue,
            };
            if falls && world.grid.move_particle(x, y, x, y + 1) {
                drops += 1;
            }
        }
    }
    drops
}
