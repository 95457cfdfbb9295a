use super::{Cell, FIELD_COLS, FIELD_ROWS, falling_piece::FallingPiece};

/// The playing grid: `FIELD_ROWS` x `FIELD_COLS` cells, rows 0-1 hidden.
///
/// Invariant: no piece ever overlaps a non-empty cell on a committed field.
/// The field itself does not enforce this on [`Self::fill_piece`]; callers
/// verify with [`Self::is_colliding`] first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    rows: [[Cell; FIELD_COLS]; FIELD_ROWS],
}

impl Default for Field {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Field {
    pub const EMPTY: Self = Self {
        rows: [[Cell::Empty; FIELD_COLS]; FIELD_ROWS],
    };

    /// Whether the piece, at its current offset, falls outside the field
    /// bounds or overlaps a non-empty cell.
    ///
    /// Empty cells of the piece's shape never participate.
    #[must_use]
    pub fn is_colliding(&self, piece: &FallingPiece) -> bool {
        piece.occupied_cells().any(|(x, y, _)| {
            let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                // Negative offsets are outside the field.
                return true;
            };
            y >= FIELD_ROWS || x >= FIELD_COLS || !self.rows[y][x].is_empty()
        })
    }

    /// Copies the piece's occupied cells into the field at its offset.
    ///
    /// Precondition: the caller has already verified there is no collision.
    ///
    /// # Panics
    ///
    /// Panics if the piece reaches outside the field; that is a programming
    /// error, not a gameplay condition.
    pub fn fill_piece(&mut self, piece: &FallingPiece) {
        for (x, y, kind) in piece.occupied_cells() {
            let x = usize::try_from(x).expect("piece frozen outside the field");
            let y = usize::try_from(y).expect("piece frozen outside the field");
            self.rows[y][x] = Cell::Piece(kind);
        }
    }

    /// Removes every full row and re-settles the grid under gravity.
    ///
    /// Surviving rows keep their order and slide down by the number of full
    /// rows below them; the vacated top rows become empty. Returns the number
    /// of rows removed.
    pub fn clear_filled_rows(&mut self) -> usize {
        let mut cleared = 0;
        for y in (0..FIELD_ROWS).rev() {
            if self.rows[y].iter().all(|cell| !cell.is_empty()) {
                cleared += 1;
                continue;
            }
            if cleared > 0 {
                self.rows[y + cleared] = self.rows[y];
            }
        }
        self.rows[..cleared].fill([Cell::Empty; FIELD_COLS]);
        cleared
    }

    /// Whether any cell in the given row is non-empty.
    ///
    /// The turn controller calls this on [`TOP_OUT_ROW`](super::TOP_OUT_ROW)
    /// to detect a top-out.
    #[must_use]
    pub fn is_row_occupied(&self, y: usize) -> bool {
        self.rows[y].iter().any(|cell| !cell.is_empty())
    }

    /// Re-zeros the whole grid (session reset).
    pub fn clear(&mut self) {
        *self = Self::EMPTY;
    }

    /// All rows, attic included, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; FIELD_COLS]> {
        self.rows.iter()
    }

    #[must_use]
    pub fn cell(&self, y: usize, x: usize) -> Cell {
        self.rows[y][x]
    }

    #[cfg(test)]
    pub(crate) fn fill_row(&mut self, y: usize, kind: super::PieceKind) {
        self.rows[y] = [Cell::Piece(kind); FIELD_COLS];
    }

    #[cfg(test)]
    pub(crate) fn set_cell(&mut self, y: usize, x: usize, cell: Cell) {
        self.rows[y][x] = cell;
    }
}
