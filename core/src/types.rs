/// Flat, row-major position of a cell on the board.
pub type CellIndex = u8;

/// Count type used for mine counts and cell counts.
pub type CellCount = u8;

/// Two-dimensional coordinates `(row, column)`.
pub type Coord2 = (u8, u8);

/// Width and height of the square board.
pub const GRID_SIDE: u8 = 5;

/// Total number of cells on the board.
pub const GRID_SIZE: CellCount = GRID_SIDE * GRID_SIDE;

/// Largest accepted mine count, a round always keeps at least one safe cell.
pub const MAX_MINES: CellCount = GRID_SIZE - 1;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for CellIndex {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        let (row, col) = index_to_coords(self);
        [row.into(), col.into()]
    }
}

pub const fn index_to_coords(index: CellIndex) -> Coord2 {
    (index / GRID_SIDE, index % GRID_SIDE)
}

/// Converts `(row, column)` into a flat index, `None` when out of bounds.
pub const fn coords_to_index((row, col): Coord2) -> Option<CellIndex> {
    if row < GRID_SIDE && col < GRID_SIDE {
        Some(row * GRID_SIDE + col)
    } else {
        None
    }
}

pub const fn is_valid_index(index: CellIndex) -> bool {
    index < GRID_SIZE
}
