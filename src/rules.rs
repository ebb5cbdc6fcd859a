//! Conway's Game of Life transition rule (B3/S23) on a bounded board.

use crate::board::Board;

/// Counts alive cells among the up-to-8 neighbours of `(row, column)`.
///
/// Neighbours outside the board do not exist, so edge and corner cells can
/// have at most 5 and 3 neighbours respectively.
pub(crate) fn live_neighbours(board: &Board, row: usize, column: usize) -> u8 {
    debug_assert!(row < board.rows() && column < board.columns());
    let row_lo = row.saturating_sub(1);
    let row_hi = (row + 1).min(board.rows().saturating_sub(1));
    let col_lo = column.saturating_sub(1);
    let col_hi = (column + 1).min(board.columns().saturating_sub(1));

    let mut count = 0;
    for r in row_lo..=row_hi {
        for c in col_lo..=col_hi {
            if (r, c) != (row, column) && board.is_alive(r, c) {
                count += 1;
            }
        }
    }
    count
}

/// B3/S23: alive survives on 2 or 3 neighbours, dead is born on exactly 3.
#[inline]
pub fn transition(alive: bool, neighbours: u8) -> bool {
    matches!((alive, neighbours), (true, 2) | (true, 3) | (false, 3))
}

/// Computes the next generation into a fresh board. `board` is left untouched.
pub fn next_generation(board: &Board) -> Board {
    let mut next = Board::new(board.rows(), board.columns());
    step_into(board, &mut next);
    next
}

/// Computes the next generation of `current` into `next`.
///
/// Every cell is evaluated against `current` only, never against partially
/// written output. `next` is reshaped when its dimensions differ.
pub fn step_into(current: &Board, next: &mut Board) {
    if next.rows() != current.rows() || next.columns() != current.columns() {
        next.resize(current.rows(), current.columns());
    }

    let columns = current.columns();
    for (idx, cell) in next.cells_mut().iter_mut().enumerate() {
        let (row, column) = (idx / columns, idx % columns);
        let alive = current.is_alive(row, column);
        *cell = transition(alive, live_neighbours(current, row, column));
    }
}
