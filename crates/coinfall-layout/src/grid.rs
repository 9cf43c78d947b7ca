//! Fixed rows × columns board with 4-neighbor adjacency.
//!
//! Cells are addressed row-major: index `r * columns + c`. The neighbor
//! lists are computed once at construction and never change.

use coinfall_core::constants::{GRID_COLUMNS, GRID_ROWS};
use coinfall_core::types::GridShape;

/// Immutable board topology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    shape: GridShape,
    neighbors: Vec<Vec<usize>>,
}

impl Grid {
    pub fn new(shape: GridShape) -> Self {
        let GridShape { rows, columns } = shape;
        let mut neighbors = Vec::with_capacity(rows * columns);
        for r in 0..rows {
            for c in 0..columns {
                let mut adj = Vec::with_capacity(4);
                if r > 0 {
                    adj.push((r - 1) * columns + c);
                }
                if r + 1 < rows {
                    adj.push((r + 1) * columns + c);
                }
                if c > 0 {
                    adj.push(r * columns + c - 1);
                }
                if c + 1 < columns {
                    adj.push(r * columns + c + 1);
                }
                neighbors.push(adj);
            }
        }
        Self { shape, neighbors }
    }

    /// The 3 × 5 reference board.
    pub fn standard() -> Self {
        Self::new(GridShape { rows: GRID_ROWS, columns: GRID_COLUMNS })
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Up/down/left/right neighbors of `index` that lie on the board.
    ///
    /// Out-of-range indices have no neighbors.
    pub fn neighbors(&self, index: usize) -> &[usize] {
        self.neighbors.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `(row, column)` of a cell index.
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index / self.shape.columns, index % self.shape.columns)
    }

    pub fn are_adjacent(&self, a: usize, b: usize) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Whether `cells` form a single 4-connected region.
    ///
    /// The empty set counts as connected.
    pub fn is_connected(&self, cells: &[usize]) -> bool {
        let Some(&start) = cells.first() else {
            return true;
        };
        let mut seen = vec![start];
        let mut stack = vec![start];
        while let Some(cell) = stack.pop() {
            for &n in self.neighbors(cell) {
                if cells.contains(&n) && !seen.contains(&n) {
                    seen.push(n);
                    stack.push(n);
                }
            }
        }
        let mut distinct = cells.to_vec();
        distinct.sort_unstable();
        distinct.dedup();
        seen.len() == distinct.len()
    }
}
