//! D4 symmetry group operations for board canonicalization

use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::{Board, CELLS, Cell, SIZE};

/// D4 symmetry transformation (dihedral group of the square)
///
/// Rotations are clockwise. Each transform acts on `(row, col)` as noted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum D4Transform {
    /// `(r, c) -> (r, c)`
    Identity,
    /// `(r, c) -> (c, 2 - r)`
    Rotate90,
    /// `(r, c) -> (2 - r, 2 - c)`
    Rotate180,
    /// `(r, c) -> (2 - c, r)`
    Rotate270,
    /// Mirror across the horizontal axis: `(r, c) -> (2 - r, c)`
    ReflectHorizontal,
    /// Mirror across the vertical axis: `(r, c) -> (r, 2 - c)`
    ReflectVertical,
    /// Transpose: `(r, c) -> (c, r)`
    ReflectMainDiagonal,
    /// `(r, c) -> (2 - c, 2 - r)`
    ReflectAntiDiagonal,
}

impl D4Transform {
    /// All 8 transforms, identity first
    pub const ALL: [D4Transform; 8] = [
        D4Transform::Identity,
        D4Transform::Rotate90,
        D4Transform::Rotate180,
        D4Transform::Rotate270,
        D4Transform::ReflectHorizontal,
        D4Transform::ReflectVertical,
        D4Transform::ReflectMainDiagonal,
        D4Transform::ReflectAntiDiagonal,
    ];

    pub fn all() -> [D4Transform; 8] {
        Self::ALL
    }

    /// Apply transform to a position (0-8)
    pub fn transform_position(&self, pos: usize) -> usize {
        let (row, col) = (pos / SIZE, pos % SIZE);
        let last = SIZE - 1;
        let (row, col) = match self {
            D4Transform::Identity => (row, col),
            D4Transform::Rotate90 => (col, last - row),
            D4Transform::Rotate180 => (last - row, last - col),
            D4Transform::Rotate270 => (last - col, row),
            D4Transform::ReflectHorizontal => (last - row, col),
            D4Transform::ReflectVertical => (row, last - col),
            D4Transform::ReflectMainDiagonal => (col, row),
            D4Transform::ReflectAntiDiagonal => (last - col, last - row),
        };
        row * SIZE + col
    }

    /// Get the inverse transform
    pub fn inverse(&self) -> D4Transform {
        match self {
            D4Transform::Rotate90 => D4Transform::Rotate270,
            D4Transform::Rotate270 => D4Transform::Rotate90,
            // Every other element of D4 is an involution
            other => *other,
        }
    }

    /// Apply transform to an array of cells
    pub fn apply_to_cells(&self, cells: &[Cell; CELLS]) -> [Cell; CELLS] {
        let mut transformed = [Cell::Empty; CELLS];
        for (idx, &cell) in cells.iter().enumerate() {
            transformed[self.transform_position(idx)] = cell;
        }
        transformed
    }
}

impl fmt::Display for D4Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            D4Transform::Identity => "identity",
            D4Transform::Rotate90 => "rotate 90",
            D4Transform::Rotate180 => "rotate 180",
            D4Transform::Rotate270 => "rotate 270",
            D4Transform::ReflectHorizontal => "reflect horizontal",
            D4Transform::ReflectVertical => "reflect vertical",
            D4Transform::ReflectMainDiagonal => "reflect main diagonal",
            D4Transform::ReflectAntiDiagonal => "reflect anti-diagonal",
        };
        f.write_str(name)
    }
}

/// Result of canonicalization: the representative and how to reach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalContext {
    /// The canonical board
    pub board: Board,
    /// The transform that maps the original board to `board`
    pub transform: D4Transform,
}

impl CanonicalContext {
    /// Map a position from original coordinates to canonical coordinates
    pub fn map_to_canonical(&self, pos: usize) -> usize {
        self.transform.transform_position(pos)
    }

    /// Map a position from canonical coordinates back to original coordinates
    pub fn map_to_original(&self, pos: usize) -> usize {
        self.transform.inverse().transform_position(pos)
    }
}

impl Board {
    /// Apply a D4 transform to the board
    pub fn transform(&self, t: &D4Transform) -> Board {
        Board::from_cells_unchecked(t.apply_to_cells(self.cells()))
    }

    /// Find the canonical form together with the transform reaching it.
    ///
    /// The representative is the transformed board whose cells are
    /// lexicographically smallest (`Empty < X < O`). Ties between transforms
    /// producing the same board resolve to the earliest in [`D4Transform::ALL`].
    pub fn canonical_context(&self) -> CanonicalContext {
        let mut best = CanonicalContext {
            board: *self,
            transform: D4Transform::Identity,
        };

        for transform in D4Transform::ALL.into_iter().skip(1) {
            let transformed = self.transform(&transform);
            if transformed.cells() < best.board.cells() {
                best = CanonicalContext {
                    board: transformed,
                    transform,
                };
            }
        }

        best
    }

    /// Get the canonical (lexicographically minimal) form under D4 symmetry
    ///
    /// Two boards are symmetry-equivalent exactly when their canonical forms
    /// are equal, which makes this an exact deduplication key.
    pub fn canonical(&self) -> Board {
        self.canonical_context().board
    }

    /// Whether some D4 transform maps `self` onto `other` mark for mark
    pub fn is_equivalent(&self, other: &Board) -> bool {
        D4Transform::ALL
            .iter()
            .any(|t| self.transform(t) == *other)
    }

    /// Transforms that leave the board unchanged
    pub fn stabilizer(&self) -> Vec<D4Transform> {
        D4Transform::ALL
            .into_iter()
            .filter(|t| self.transform(t) == *self)
            .collect()
    }
}
