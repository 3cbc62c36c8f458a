use super::*;

impl Grid {
    /// Move the particle at `from` into an empty `to`.
    /// Returns false (and changes nothing) if `from` is empty or `to` is
    /// occupied or out of bounds.
    pub fn move_particle(&mut self, fx: i32, fy: i32, tx: i32, ty: i32) -> bool {
        let (Some(from), Some(to)) = (self.index(fx, fy), self.index(tx, ty)) else {
            return false;
        };
        if from == to || self.cells[from].is_none() || self.cells[to].is_some() {
            return false;
        }
        self.cells[to] = self.cells[from].take();
        true
    }

    /// Exchange two cells. Either may be empty.
    pub fn swap(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> bool {
        match (self.index(x1, y1), self.index(x2, y2)) {
            (Some(a), Some(b)) => {
                self.cells.swap(a, b);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::elements::{descriptor, ElementKind};

    #[test]
    fn move_nulls_the_source() {
        let mut grid = Grid::new(3, 3);
        grid.insert(1, 0, Particle::new(&descriptor(ElementKind::Sand))).unwrap();
        assert!(grid.move_particle(1, 0, 1, 1));
        assert!(grid.get(1, 0).is_none());
        assert_eq!(grid.get(1, 1).map(|p| p.kind), Some(ElementKind::Sand));
    }

    #[test]
    fn move_into_occupied_cell_is_refused() {
        let mut grid = Grid::new(3, 3);
        grid.insert(0, 0, Particle::new(&descriptor(ElementKind::Sand))).unwrap();
        grid.insert(0, 1, Particle::new(&descriptor(ElementKind::Stone))).unwrap();
        assert!(!grid.move_particle(0, 0, 0, 1));
        assert!(!grid.move_particle(0, 0, 0, -1));
        assert_eq!(grid.particle_count(), 2);
    }

    #[test]
    fn swap_exchanges_particles() {
        let mut grid = Grid::new(2, 1);
        grid.insert(0, 0, Particle::new(&descriptor(ElementKind::Sand))).unwrap();
        grid.insert(1, 0, Particle::new(&descriptor(ElementKind::Water))).unwrap();
        assert!(grid.swap(0, 0, 1, 0));
        assert_eq!(grid.get(0, 0).map(|p| p.kind), Some(ElementKind::Water));
        assert_eq!(grid.get(1, 0).map(|p| p.kind), Some(ElementKind::Sand));
    }
}
