use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::ElementSize;

pub const DEFAULT_CELL_PX: f64 = 15.0;

// Labels may overhang the row below by this much.
const ROW_OVERHANG_PX: f64 = 10.0;

/// Rows past this index are never stored; occupying them is a no-op.
pub const MAX_GRID_ROWS: u32 = 4096;
/// Widest or tallest footprint `Footprint::from_pixels` produces, in cells.
pub const MAX_SPAN_CELLS: u32 = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellSize {
    pub width: f64,
    pub height: f64,
}

impl Default for CellSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_CELL_PX,
            height: DEFAULT_CELL_PX,
        }
    }
}

/// Horizontal extent and height of a label, in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footprint {
    pub col: i64,
    pub col_span: u32,
    pub row_span: u32,
}

impl Footprint {
    #[must_use]
    pub fn new(col: i64, col_span: u32, row_span: u32) -> Self {
        Self {
            col,
            col_span: col_span.max(1),
            row_span: row_span.max(1),
        }
    }

    /// Footprint of an element whose left edge sits at `left`.
    ///
    /// Only the left half of the element's width reserves columns, so
    /// neighbouring labels may interleave their right halves.
    #[must_use]
    pub fn from_pixels(left: f64, size: ElementSize, cell: CellSize) -> Self {
        let col = (left / cell.width).floor();
        let col_span = ((size.width * 0.5) / cell.width).ceil();
        let row_span = ((size.height - ROW_OVERHANG_PX) / cell.height).ceil();
        Self::new(
            if col.is_finite() { col as i64 } else { 0 },
            span_cells(col_span),
            span_cells(row_span),
        )
    }
}

fn span_cells(value: f64) -> u32 {
    if value.is_finite() && value >= 1.0 {
        value.min(f64::from(MAX_SPAN_CELLS)) as u32
    } else {
        1
    }
}

/// Highest row index a footprint may start on for a viewport height.
#[must_use]
pub fn max_row_for_height(height: f64, cell: CellSize) -> u32 {
    let rows = (height / cell.height).floor() - 1.0;
    if rows.is_finite() && rows > 0.0 {
        rows as u32
    } else {
        0
    }
}

/// Sparse occupancy counts keyed by `(column, row)`.
#[derive(Debug, Clone, Default)]
pub struct SpatialGrid {
    columns: HashMap<i64, SmallVec<[u32; 8]>>,
}

impl SpatialGrid {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn occupy(&mut self, col: i64, row: u32, col_span: u32, row_span: u32) {
        let row_end = row.saturating_add(row_span.max(1)).min(MAX_GRID_ROWS) as usize;
        if row as usize >= row_end {
            return;
        }
        for column in columns(col, col_span) {
            let cells = self.columns.entry(column).or_default();
            if cells.len() < row_end {
                cells.resize(row_end, 0);
            }
            for cell in &mut cells[row as usize..row_end] {
                *cell = cell.saturating_add(1);
            }
        }
    }

    /// Maximum occupancy within the footprint.
    #[must_use]
    pub fn query(&self, col: i64, row: u32, col_span: u32, row_span: u32) -> u32 {
        let row_start = row as usize;
        let row_end = row.saturating_add(row_span.max(1)) as usize;
        columns(col, col_span)
            .filter_map(|column| self.columns.get(&column))
            .flat_map(|cells| {
                cells
                    .get(row_start..row_end.min(cells.len()))
                    .unwrap_or(&[])
                    .iter()
                    .copied()
            })
            .max()
            .unwrap_or(0)
    }

    /// First free row below `max_row`, or the least crowded one when every
    /// candidate is taken.
    #[must_use]
    pub fn find_lowest_free_row(&self, col: i64, col_span: u32, row_span: u32, max_row: u32) -> u32 {
        let mut best_row = 0;
        let mut best_occupancy = u32::MAX;
        let mut row: u32 = 0;
        while row.saturating_add(row_span) < max_row {
            let occupancy = self.query(col, row, col_span, row_span);
            if occupancy == 0 {
                return row;
            }
            if occupancy < best_occupancy {
                best_row = row;
                best_occupancy = occupancy;
            }
            row += 1;
        }
        if best_occupancy != u32::MAX {
            debug!(
                col,
                row = best_row,
                occupancy = best_occupancy,
                "no free row; using least crowded"
            );
        }
        best_row
    }

    /// Finds a row for `footprint`, occupies it, and returns the row.
    pub fn place(&mut self, footprint: Footprint, max_row: u32) -> u32 {
        let row = self.find_lowest_free_row(
            footprint.col,
            footprint.col_span,
            footprint.row_span,
            max_row,
        );
        self.occupy(footprint.col, row, footprint.col_span, footprint.row_span);
        row
    }

    pub fn clear(&mut self) {
        self.columns.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

fn columns(col: i64, col_span: u32) -> impl Iterator<Item = i64> {
    let end = col.saturating_add(i64::from(col_span.max(1)));
    col..end
}
