//! Mapping between layout pixels (top-left origin, y down) and grid cells.

use crate::board::CellCoord;

/// Axis-aligned square covering one cell, in layout pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

/// A grid line at an inner cell boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridLine {
    /// vertical line at this x offset
    Vertical(u32),
    /// horizontal line at this y offset
    Horizontal(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub rows: usize,
    pub columns: usize,
    pub cell_size: u32,
}

impl GridGeometry {
    pub fn new(rows: usize, columns: usize, cell_size: u32) -> Self {
        Self {
            rows,
            columns,
            cell_size,
        }
    }

    /// full layout size in pixels, `(width, height)`; validated configs keep it within `u32`
    #[inline]
    pub fn layout_size(&self) -> (u32, u32) {
        (
            self.columns as u32 * self.cell_size,
            self.rows as u32 * self.cell_size,
        )
    }

    /// Maps a layout pixel to the cell under it.
    ///
    /// Pixels left of or above the layout give `None`. Pixels on or past the
    /// right/bottom boundary land in the last column/row, so a pointer resting
    /// on the window edge still hits a valid cell.
    pub fn cell_at(&self, x: i32, y: i32) -> Option<CellCoord> {
        if x < 0 || y < 0 || self.rows == 0 || self.columns == 0 || self.cell_size == 0 {
            return None;
        }
        let column = (x as u32 / self.cell_size) as usize;
        let row = (y as u32 / self.cell_size) as usize;
        Some(CellCoord::new(
            row.min(self.rows - 1),
            column.min(self.columns - 1),
        ))
    }

    #[inline]
    pub fn cell_rect(&self, coord: CellCoord) -> CellRect {
        CellRect {
            x: coord.column as u32 * self.cell_size,
            y: coord.row as u32 * self.cell_size,
            size: self.cell_size,
        }
    }

    /// One rectangle per alive cell; everything else is background.
    #[cfg(test)]
    pub(crate) fn alive_rects<'a>(
        &'a self,
        board: &'a crate::board::Board,
    ) -> impl Iterator<Item = CellRect> + 'a {
        board.alive_cells().map(|coord| self.cell_rect(coord))
    }

    /// Lines at every inner cell boundary (the outer frame is the window edge).
    pub fn grid_lines(&self) -> impl Iterator<Item = GridLine> + '_ {
        let vertical = (1..self.columns).map(|c| GridLine::Vertical(c as u32 * self.cell_size));
        let horizontal = (1..self.rows).map(|r| GridLine::Horizontal(r as u32 * self.cell_size));
        vertical.chain(horizontal)
    }
}
