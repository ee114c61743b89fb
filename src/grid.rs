use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::BoundsError;
use crate::topology::Topology;
use crate::types::Disc;

/// The fixed set of playable coordinates for one board.
///
/// Immutable after construction, so boards and their clones share it. Corner
/// and X-square sets are computed on first use.
#[derive(Debug)]
pub struct Shape<T: Topology> {
    size: usize,
    coords: Vec<T::Coord>,
    index: HashMap<T::Coord, usize>,
    corners: OnceCell<Vec<T::Coord>>,
    x_squares: OnceCell<BTreeSet<T::Coord>>,
}

impl<T: Topology> Shape<T> {
    pub fn new(size: usize) -> Self {
        let coords = T::shape(size);
        let index = coords.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Self {
            size,
            coords,
            index,
            corners: OnceCell::new(),
            x_squares: OnceCell::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn contains(&self, coord: T::Coord) -> bool {
        self.index.contains_key(&coord)
    }

    pub fn index_of(&self, coord: T::Coord) -> Option<usize> {
        self.index.get(&coord).copied()
    }

    /// Coordinates in tie-break order.
    pub fn coords(&self) -> &[T::Coord] {
        &self.coords
    }

    /// In-shape neighbours of `coord`.
    pub fn neighbors(&self, coord: T::Coord) -> impl Iterator<Item = T::Coord> + '_ {
        T::directions()
            .iter()
            .map(move |&dir| coord + dir)
            .filter(|&n| self.contains(n))
    }

    /// Cells with the fewest in-shape neighbours.
    pub fn corners(&self) -> &[T::Coord] {
        self.corners.get_or_init(|| {
            let degree = |c: T::Coord| self.neighbors(c).count();
            let Some(min) = self.coords.iter().map(|&c| degree(c)).min() else {
                return Vec::new();
            };
            self.coords
                .iter()
                .copied()
                .filter(|&c| degree(c) == min)
                .collect()
        })
    }

    pub fn is_corner(&self, coord: T::Coord) -> bool {
        self.corners().contains(&coord)
    }

    /// Non-corner cells touching a corner.
    pub fn x_squares(&self) -> &BTreeSet<T::Coord> {
        self.x_squares.get_or_init(|| {
            self.corners()
                .iter()
                .flat_map(|&corner| self.neighbors(corner))
                .filter(|&c| !self.is_corner(c))
                .collect()
        })
    }
}

/// Disc storage for one board. Cloning copies every cell.
#[derive(Debug, Clone)]
pub struct Grid<T: Topology> {
    shape: Arc<Shape<T>>,
    cells: Vec<Disc>,
}

impl<T: Topology> Grid<T> {
    pub fn new(size: usize) -> Self {
        let shape = Arc::new(Shape::new(size));
        let cells = vec![Disc::Empty; shape.len()];
        Self { shape, cells }
    }

    pub fn shape(&self) -> &Shape<T> {
        &self.shape
    }

    pub fn get(&self, coord: T::Coord) -> Result<Disc, BoundsError> {
        self.shape
            .index_of(coord)
            .map(|i| self.cells[i])
            .ok_or(BoundsError)
    }

    pub fn set(&mut self, coord: T::Coord, disc: Disc) -> Result<(), BoundsError> {
        let i = self.shape.index_of(coord).ok_or(BoundsError)?;
        self.cells[i] = disc;
        Ok(())
    }

    pub fn count(&self, disc: Disc) -> usize {
        self.cells.iter().filter(|&&d| d == disc).count()
    }

    /// `(coord, disc)` pairs in tie-break order.
    pub fn iter(&self) -> impl Iterator<Item = (T::Coord, Disc)> + '_ {
        self.shape.coords().iter().copied().zip(self.cells.iter().copied())
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = T::Coord> + '_ {
        self.iter()
            .filter(|&(_, d)| d == Disc::Empty)
            .map(|(c, _)| c)
    }
}

impl<T: Topology> PartialEq for Grid<T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape.size == other.shape.size && self.cells == other.cells
    }
}

impl<T: Topology> Eq for Grid<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{Axial, Cartesian, Hex, Square};

    #[test]
    fn hex_corners_are_the_six_vertices() {
        let shape = Shape::<Hex>::new(3);
        let corners = shape.corners();

        assert_eq!(corners.len(), 6);
        assert!(corners.contains(&Axial::new(0, -2)));
        assert!(corners.contains(&Axial::new(2, -2)));
        assert!(corners.contains(&Axial::new(-2, 2)));
        assert!(corners.iter().all(|&c| shape.neighbors(c).count() == 3));
    }

    #[test]
    fn square_x_squares_surround_corners() {
        let shape = Shape::<Square>::new(6);

        assert_eq!(
            shape.corners(),
            &[
                Cartesian::new(0, 0),
                Cartesian::new(5, 0),
                Cartesian::new(0, 5),
                Cartesian::new(5, 5)
            ]
        );
        assert_eq!(shape.x_squares().len(), 12);
        assert!(shape.x_squares().contains(&Cartesian::new(1, 1)));
        assert!(!shape.x_squares().contains(&Cartesian::new(2, 2)));
    }

    #[test]
    fn single_cell_shape_is_its_own_corner() {
        let shape = Shape::<Hex>::new(1);
        assert_eq!(shape.corners(), &[Axial::new(0, 0)]);
        assert!(shape.x_squares().is_empty());
    }

    #[test]
    fn clone_owns_independent_cells() {
        let mut grid = Grid::<Square>::new(4);
        let snapshot = grid.clone();

        grid.set(Cartesian::new(1, 1), Disc::Black).unwrap();

        assert_eq!(grid.get(Cartesian::new(1, 1)), Ok(Disc::Black));
        assert_eq!(snapshot.get(Cartesian::new(1, 1)), Ok(Disc::Empty));
        assert_ne!(grid, snapshot);
    }

    #[test]
    fn out_of_shape_access_fails() {
        let mut grid = Grid::<Hex>::new(2);
        assert_eq!(grid.get(Axial::new(2, 0)), Err(BoundsError));
        assert_eq!(grid.set(Axial::new(1, 1), Disc::White), Err(BoundsError));
        assert_eq!(grid.count(Disc::Empty), 7);
    }
}
