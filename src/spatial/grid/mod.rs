//! Grid - fixed `width × height` array of cells, row 0 at the top.
//!
//! Each cell owns zero or one `Particle`. Moving a particle takes it out of the
//! source cell and writes it into the destination in the same call, so a
//! particle is never reachable from two cells.

use crate::domain::particle::Particle;

mod moves;

pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Option<Particle>>,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![None; size],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Pure bounds predicate. Out-of-range queries are never an error.
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<&Particle> {
        self.index(x, y).and_then(|i| self.cells[i].as_ref())
    }

    #[inline]
    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Particle> {
        let i = self.index(x, y)?;
        self.cells[i].as_mut()
    }

    /// In bounds and unoccupied
    #[inline]
    pub fn is_empty(&self, x: i32, y: i32) -> bool {
        matches!(self.index(x, y), Some(i) if self.cells[i].is_none())
    }

    /// Remove and return the particle at `(x, y)`
    #[inline]
    pub fn take(&mut self, x: i32, y: i32) -> Option<Particle> {
        let i = self.index(x, y)?;
        self.cells[i].take()
    }

    /// Write `particle` into `(x, y)`, returning whatever it displaced.
    /// Out-of-bounds writes hand the particle back.
    pub fn replace(&mut self, x: i32, y: i32, particle: Particle) -> Result<Option<Particle>, Particle> {
        match self.index(x, y) {
            Some(i) => Ok(self.cells[i].replace(particle)),
            None => Err(particle),
        }
    }

    /// Write `particle` only into an empty in-bounds cell
    pub fn insert(&mut self, x: i32, y: i32, particle: Particle) -> Result<(), Particle> {
        match self.index(x, y) {
            Some(i) if self.cells[i].is_none() => {
                self.cells[i] = Some(particle);
                Ok(())
            }
            _ => Err(particle),
        }
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
    }

    pub fn particle_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Occupied cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, &Particle)> + '_ {
        let w = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, c)| c.as_ref().map(|p| ((i % w) as i32, (i / w) as i32, p)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (i32, i32, &mut Particle)> + '_ {
        let w = self.width as usize;
        self.cells
            .iter_mut()
            .enumerate()
            .filter_map(move |(i, c)| c.as_mut().map(|p| ((i % w) as i32, (i / w) as i32, p)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::elements::{descriptor, ElementKind};

    fn sand() -> Particle {
        Particle::new(&descriptor(ElementKind::Sand))
    }

    #[test]
    fn bounds_predicate_rejects_every_edge() {
        let grid = Grid::new(4, 3);
        assert!(grid.in_bounds(0, 0));
        assert!(grid.in_bounds(3, 2));
        assert!(!grid.in_bounds(-1, 0));
        assert!(!grid.in_bounds(0, -1));
        assert!(!grid.in_bounds(4, 0));
        assert!(!grid.in_bounds(0, 3));
        assert!(!grid.in_bounds(i32::MIN, i32::MAX));
    }

    #[test]
    fn out_of_bounds_access_is_a_miss() {
        let mut grid = Grid::new(2, 2);
        assert!(grid.get(5, 5).is_none());
        assert!(grid.get_mut(-1, 0).is_none());
        assert!(!grid.is_empty(2, 0));
        assert!(grid.take(0, 9).is_none());
        assert!(grid.replace(9, 9, sand()).is_err());
    }

    #[test]
    fn insert_refuses_occupied_cells() {
        let mut grid = Grid::new(2, 2);
        assert!(grid.insert(1, 1, sand()).is_ok());
        assert!(grid.insert(1, 1, sand()).is_err());
        assert_eq!(grid.particle_count(), 1);
    }

    #[test]
    fn iter_reports_coordinates() {
        let mut grid = Grid::new(3, 3);
        grid.insert(2, 1, sand()).unwrap();
        let cells: Vec<_> = grid.iter().map(|(x, y, p)| (x, y, p.kind)).collect();
        assert_eq!(cells, vec![(2, 1, ElementKind::Sand)]);
    }
}
