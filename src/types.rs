use ndarray::Array2;

/// Single coordinate axis used for row/column positions and board sizes.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Grid position `(row, col)`, 0-indexed from the top-left corner.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let dim = self.dim();
        let bounds = (dim.0.try_into().unwrap(), dim.1.try_into().unwrap());
        NeighborIter::new(index, bounds)
    }
}

/// Row/column offsets of the 8-neighborhood.
const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `offset` to `center`, returning a value only when it stays in bounds.
fn apply_offset(center: Coord2, offset: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let row = center.0.checked_add_signed(offset.0)?;
    let col = center.1.checked_add_signed(offset.1)?;
    (row < bounds.0 && col < bounds.1).then_some((row, col))
}

/// Iterator over the in-bounds grid neighbors of a cell. Holds no borrow of
/// the grid itself, so call sites may mutate cells while walking neighbors.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    next: u8,
}

impl NeighborIter {
    fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            next: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&offset) = OFFSETS.get(usize::from(self.next)) {
            self.next += 1;
            if let Some(coords) = apply_offset(self.center, offset, self.bounds) {
                return Some(coords);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighbors_of(center: Coord2, bounds: Coord2) -> Vec<Coord2> {
        let grid: Array2<u8> = Array2::default(bounds.to_nd_index());
        grid.iter_neighbors(center).collect()
    }

    #[test]
    fn interior_cell_has_eight_neighbors() {
        let found = neighbors_of((1, 1), (3, 3));
        assert_eq!(found.len(), 8);
        assert!(!found.contains(&(1, 1)));
    }

    #[test]
    fn corner_cells_are_clipped() {
        assert_eq!(neighbors_of((0, 0), (3, 3)), vec![(0, 1), (1, 0), (1, 1)]);
        assert_eq!(neighbors_of((2, 2), (3, 3)), vec![(1, 1), (1, 2), (2, 1)]);
    }

    #[test]
    fn edge_cell_has_five_neighbors() {
        assert_eq!(neighbors_of((0, 1), (3, 3)).len(), 5);
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        assert!(neighbors_of((0, 0), (1, 1)).is_empty());
    }
}
