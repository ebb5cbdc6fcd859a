use crate::error::BoardError;

/// Position of a cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellCoord {
    pub row: usize,
    pub column: usize,
}

impl CellCoord {
    #[inline]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Fixed-size grid of alive/dead cells, stored row-major.
///
/// The edges are hard boundaries: there is no wrap-around and any access
/// outside `rows × columns` is rejected with [`BoardError::OutOfRange`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<bool>,
}

impl Board {
    /// creates an all-dead board
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![false; rows * columns],
        }
    }

    /// Builds a board from rows of `'#'` (alive) and `'.'` (dead).
    ///
    /// Every row must have the same length.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&str]) -> Self {
        let columns = rows.first().map_or(0, |row| row.len());
        let mut board = Self::new(rows.len(), columns);
        for (r, line) in rows.iter().enumerate() {
            assert_eq!(line.len(), columns, "ragged row {r} in board fixture");
            for (c, ch) in line.chars().enumerate() {
                board.cells[r * columns + c] = ch == '#';
            }
        }
        board
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// total number of cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// true when no cell is alive
    pub fn all_dead(&self) -> bool {
        !self.cells.iter().any(|&alive| alive)
    }

    /// number of alive cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    #[inline]
    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.row < self.rows && coord.column < self.columns
    }

    #[inline]
    pub fn index_of(&self, coord: CellCoord) -> Option<usize> {
        self.contains(coord)
            .then(|| coord.row * self.columns + coord.column)
    }

    #[inline]
    pub fn coord_of(&self, idx: usize) -> CellCoord {
        CellCoord::new(idx / self.columns, idx % self.columns)
    }

    pub fn get(&self, row: usize, column: usize) -> Result<bool, BoardError> {
        let idx = self.checked_index(row, column)?;
        Ok(self.cells[idx])
    }

    pub fn set(&mut self, row: usize, column: usize, value: bool) -> Result<(), BoardError> {
        let idx = self.checked_index(row, column)?;
        self.cells[idx] = value;
        Ok(())
    }

    /// kills every cell
    pub fn reset(&mut self) {
        self.cells.fill(false);
    }

    /// Fills the board with a coin flip per cell.
    pub fn randomize(&mut self, rng: &mut fastrand::Rng) {
        for cell in self.cells.iter_mut() {
            *cell = rng.bool();
        }
    }

    /// Raw row-major cell states.
    #[inline]
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Coordinates of every alive cell, in row-major order.
    pub fn alive_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &alive)| alive)
            .map(|(idx, _)| self.coord_of(idx))
    }

    /// Unchecked alive test for callers that already iterate inside the bounds.
    #[inline]
    pub(crate) fn is_alive(&self, row: usize, column: usize) -> bool {
        self.cells[row * self.columns + column]
    }

    #[inline]
    pub(crate) fn cells_mut(&mut self) -> &mut [bool] {
        &mut self.cells
    }

    /// Reshapes the board to `rows × columns`, killing every cell.
    pub(crate) fn resize(&mut self, rows: usize, columns: usize) {
        self.rows = rows;
        self.columns = columns;
        self.cells.clear();
        self.cells.resize(rows * columns, false);
    }

    fn checked_index(&self, row: usize, column: usize) -> Result<usize, BoardError> {
        self.index_of(CellCoord::new(row, column))
            .ok_or(BoardError::OutOfRange {
                row,
                column,
                rows: self.rows,
                columns: self.columns,
            })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn new_board_is_dead() {
        let board = Board::new(20, 30);
        assert_eq!(board.rows(), 20);
        assert_eq!(board.columns(), 30);
        assert_eq!(board.cell_count(), 600);
        assert!(board.all_dead());
        assert_eq!(board.population(), 0);
    }

    #[test]
    fn set_then_get() {
        let mut board = Board::new(5, 5);
        board.set(2, 3, true).unwrap();
        assert!(board.get(2, 3).unwrap());
        board.set(2, 3, false).unwrap();
        assert!(!board.get(2, 3).unwrap());
    }

    #[test]
    fn reset_kills_everything() {
        let mut board = Board::new(4, 6);
        for r in 0..4 {
            for c in 0..6 {
                board.set(r, c, (r + c) % 2 == 0).unwrap();
            }
        }
        assert_eq!(board.population(), 12);

        board.reset();
        for r in 0..4 {
            for c in 0..6 {
                assert!(!board.get(r, c).unwrap());
            }
        }
    }

    #[test]
    fn out_of_range_is_rejected() {
        let mut board = Board::new(3, 4);
        let err = BoardError::OutOfRange {
            row: 3,
            column: 0,
            rows: 3,
            columns: 4,
        };
        assert_eq!(board.get(3, 0), Err(err));
        assert_eq!(board.set(3, 0, true), Err(err));
        assert!(board.get(0, 4).is_err());
        assert!(board.set(0, 4, true).is_err());
        // nothing was clamped onto the edge
        assert!(board.all_dead());
        // last valid cell
        assert!(board.set(2, 3, true).is_ok());
    }

    #[test]
    fn index_and_coord_agree() {
        let board = Board::new(4, 7);
        let coord = CellCoord::new(2, 5);
        let idx = board.index_of(coord).unwrap();
        assert_eq!(idx, 19);
        assert_eq!(board.coord_of(idx), coord);
        assert_eq!(board.index_of(CellCoord::new(4, 0)), None);
    }

    #[test]
    fn alive_cells_in_row_major_order() {
        let board = Board::from_rows(&[".#.", "..#", "#.."]);
        let alive: Vec<_> = board.alive_cells().collect();
        assert_eq!(
            alive,
            vec![
                CellCoord::new(0, 1),
                CellCoord::new(1, 2),
                CellCoord::new(2, 0)
            ]
        );
    }

    #[test]
    fn randomize_is_seed_deterministic() {
        let mut a = Board::new(16, 16);
        let mut b = Board::new(16, 16);
        a.randomize(&mut fastrand::Rng::with_seed(7));
        b.randomize(&mut fastrand::Rng::with_seed(7));
        assert_eq!(a, b);
        assert!(a.population() > 0);
        assert!(a.population() < a.cell_count());
    }
}
