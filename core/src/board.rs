use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular grid of cells, indexed by `(x, y)`.
///
/// The board is a passive holder: it answers questions about neighborhoods and
/// mine placement, while every state change goes through [`Game`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    /// Board of closed, mine-free cells.
    pub(crate) fn empty(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
        }
    }

    pub(crate) fn from_cells(cells: Array2<Cell>) -> Self {
        Self { cells }
    }

    /// Builds a closed board with mines at the given positions.
    pub fn from_bomb_coords(size: Coord2, bomb_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidSize);
        }

        let mut board = Self::empty(size);
        for &coords in bomb_coords {
            let coords = board.validate_coords(coords).ok_or(GameError::InvalidCoords)?;
            board.cell_mut(coords).is_bomb = true;
        }
        Ok(board)
    }

    pub fn size(&self) -> Coord2 {
        let (x_end, y_end) = self.cells.dim();
        (x_end as Coord, y_end as Coord)
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (width, height) = self.size();
        mult(width, height)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Option<Coord2> {
        let (width, height) = self.size();
        (coords.0 < width && coords.1 < height).then_some(coords)
    }

    pub fn cell(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    /// The up-to-8 in-bounds cells around `coords`.
    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// Number of mines around `coords`, regardless of what the player has
    /// opened or flagged.
    pub fn adjacent_bomb_count(&self, coords: Coord2) -> u8 {
        // at most 8 neighbors
        self.neighbors(coords)
            .filter(|&pos| self.cell(pos).is_bomb)
            .count() as u8
    }

    pub fn bomb_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_bomb).count() as CellCount
    }

    /// All coordinates in row order: `y` outer, `x` inner.
    pub fn coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (width, height) = self.size();
        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }

    /// Cells of row `y` in increasing `x` order.
    pub fn row(&self, y: Coord) -> impl Iterator<Item = Cell> + '_ {
        (0..self.width()).map(move |x| self.cell((x, y)))
    }

    pub fn view(&self, coords: Coord2) -> CellView {
        let cell = self.cell(coords);
        CellView {
            is_opened: cell.is_opened(),
            is_flagged: cell.is_flagged(),
            is_bomb: cell.is_bomb,
            adjacent_bombs: self.adjacent_bomb_count(coords),
        }
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_count_ignores_visibility() {
        let mut board = Board::from_bomb_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();
        assert_eq!(board.adjacent_bomb_count((1, 1)), 2);

        board.cell_mut((0, 0)).state = CellState::Flagged;
        board.cell_mut((2, 2)).state = CellState::Opened;
        assert_eq!(board.adjacent_bomb_count((1, 1)), 2);
        assert_eq!(board.adjacent_bomb_count((0, 0)), 0);
        assert_eq!(board.adjacent_bomb_count((1, 0)), 1);
    }

    #[test]
    fn rejects_out_of_range_bombs() {
        assert_eq!(
            Board::from_bomb_coords((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
        assert_eq!(
            Board::from_bomb_coords((0, 2), &[]),
            Err(GameError::InvalidSize)
        );
    }

    #[test]
    fn coords_are_row_major() {
        let board = Board::from_bomb_coords((2, 2), &[]).unwrap();
        let coords: Vec<_> = board.coords().collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn view_reports_render_data() {
        let board = Board::from_bomb_coords((2, 1), &[(0, 0)]).unwrap();
        let view = board.view((1, 0));
        assert!(!view.is_opened);
        assert!(!view.is_flagged);
        assert!(!view.is_bomb);
        assert_eq!(view.adjacent_bombs, 1);
        assert!(board.view((0, 0)).is_bomb);
        assert_eq!(board.bomb_count(), 1);
        assert!(board[(0, 0)].is_bomb);
    }
}
