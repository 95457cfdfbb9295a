use crate::PieceCollisionError;

use super::{Field, PieceKind, SPAWN_X, SPAWN_Y, Shape};

/// One-cell movement direction.
///
/// `Up` is supported by the geometry primitive but unused by gameplay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    const fn unit(self) -> (i16, i16) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// A piece in flight over the field.
///
/// The shape is a working copy of the catalog shape: rotation replaces it in
/// place. The next piece and the ghost projection use the same structure.
/// An invisible piece (game over) must not be drawn by the presentation
/// layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallingPiece {
    shape: Shape,
    x: i16,
    y: i16,
    visible: bool,
}

impl FallingPiece {
    /// A fresh piece of the given kind at the spawn offset.
    #[must_use]
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            shape: Shape::of(kind),
            x: SPAWN_X,
            y: SPAWN_Y,
            visible: true,
        }
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn x(&self) -> i16 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> i16 {
        self.y
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Marks the piece as not to be drawn or collision-tested (game over).
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Occupied cells in field coordinates, as `(x, y, kind)`.
    ///
    /// Coordinates may be transiently out of bounds while a candidate offset
    /// is under collision test.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i16, i16, PieceKind)> + '_ {
        self.shape
            .occupied_cells()
            .map(move |(dx, dy, kind)| (self.x + dx, self.y + dy, kind))
    }

    /// Attempts a one-cell move in the given direction.
    ///
    /// On collision the offset is reverted and the piece is left exactly as
    /// it was. This is the single primitive behind gravity, manual shifting,
    /// hard drop, and the ghost projection.
    pub fn try_shift(
        &mut self,
        field: &Field,
        direction: Direction,
    ) -> Result<(), PieceCollisionError> {
        let (dx, dy) = direction.unit();
        self.x += dx;
        self.y += dy;
        if field.is_colliding(self) {
            self.x -= dx;
            self.y -= dy;
            return Err(PieceCollisionError);
        }
        Ok(())
    }

    /// Attempts a 90-degree clockwise rotation with simple wall kicks.
    ///
    /// Exactly three candidate placements are tried, in order: the rotated
    /// shape in place, nudged one column right, then two columns left of the
    /// nudge (one left of the original). There is no kick table beyond these
    /// two horizontal nudges and no vertical kick. On failure both position
    /// and shape are fully restored.
    pub fn try_rotate(&mut self, field: &Field) -> Result<(), PieceCollisionError> {
        let unrotated = self.shape;
        self.shape = self.shape.rotated_cw();
        if !field.is_colliding(self) {
            return Ok(());
        }
        self.x += 1; // right kick
        if !field.is_colliding(self) {
            return Ok(());
        }
        self.x -= 2; // left kick
        if !field.is_colliding(self) {
            return Ok(());
        }
        self.x += 1;
        self.shape = unrotated;
        Err(PieceCollisionError)
    }

    /// The hard-drop landing position: a copy of this piece shifted down
    /// until blocked.
    ///
    /// The result is a read-only projection (the ghost); it is never written
    /// back to the field or the active piece.
    #[must_use]
    pub fn dropped(&self, field: &Field) -> Self {
        let mut ghost = *self;
        while ghost.try_shift(field, Direction::Down).is_ok() {}
        ghost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cell, FIELD_COLS, FIELD_ROWS};

    #[test]
    fn test_shift_moves_by_exactly_one_unit() {
        let field = Field::EMPTY;
        let mut piece = FallingPiece::spawn(PieceKind::T);
        let (x, y) = (piece.x(), piece.y());

        assert!(piece.try_shift(&field, Direction::Right).is_ok());
        assert_eq!((piece.x(), piece.y()), (x + 1, y));
        assert!(piece.try_shift(&field, Direction::Down).is_ok());
        assert_eq!((piece.x(), piece.y()), (x + 1, y + 1));
        assert!(piece.try_shift(&field, Direction::Left).is_ok());
        assert!(piece.try_shift(&field, Direction::Up).is_ok());
        assert_eq!((piece.x(), piece.y()), (x, y));
    }

    #[test]
    fn test_blocked_shift_leaves_piece_unchanged() {
        let field = Field::EMPTY;
        let mut piece = FallingPiece::spawn(PieceKind::O);
        // Walk to the left wall, then push once more.
        while piece.try_shift(&field, Direction::Left).is_ok() {}
        let at_wall = piece;
        assert!(piece.try_shift(&field, Direction::Left).is_err());
        assert_eq!(piece, at_wall);
        assert_eq!(piece.x(), 0);
    }

    #[test]
    fn test_shift_blocked_by_settled_cells() {
        let mut field = Field::EMPTY;
        let mut piece = FallingPiece::spawn(PieceKind::O);
        // O at spawn occupies columns 4-5, rows 0-1. Block column 4 of row 2.
        field.set_cell(2, 4, Cell::Piece(PieceKind::I));
        assert!(piece.try_shift(&field, Direction::Down).is_err());
        assert_eq!(piece.y(), 0);
    }

    #[test]
    fn test_rotation_in_open_space_keeps_offset() {
        let field = Field::EMPTY;
        let mut piece = FallingPiece::spawn(PieceKind::T);
        let (x, y) = (piece.x(), piece.y());
        assert!(piece.try_rotate(&field).is_ok());
        assert_eq!((piece.x(), piece.y()), (x, y));
        assert_eq!(*piece.shape(), Shape::of(PieceKind::T).rotated_cw());
    }

    #[test]
    fn test_rotation_kicks_off_the_left_wall() {
        let field = Field::EMPTY;
        let mut piece = FallingPiece::spawn(PieceKind::I);
        // Vertical I hugging the left wall: occupied column is dx=2, so the
        // piece itself sits at x = -2.
        assert!(piece.try_rotate(&field).is_ok());
        while piece.try_shift(&field, Direction::Left).is_ok() {}
        assert_eq!(piece.x(), -2);

        // Rotating back to horizontal at x = -2 would stick out two columns;
        // the +1 kick is not enough and the net -1 is worse, so it fails.
        let before = piece;
        assert!(piece.try_rotate(&field).is_err());
        assert_eq!(piece, before);

        // One column in, the right kick makes the rotation fit.
        assert!(piece.try_shift(&field, Direction::Right).is_ok());
        assert!(piece.try_rotate(&field).is_ok());
        assert_eq!(piece.x(), 0);
    }

    #[test]
    fn test_failed_rotation_restores_shape_and_offset() {
        let mut field = Field::EMPTY;
        // Box the piece in so no kick candidate fits: occupy every cell of
        // rows 2-3 except the T's current footprint.
        let mut piece = FallingPiece::spawn(PieceKind::T);
        while piece.try_shift(&field, Direction::Down).is_ok() {}
        let parked = piece;
        for y in 0..FIELD_ROWS {
            for x in 0..FIELD_COLS {
                field.set_cell(y, x, Cell::Piece(PieceKind::Z));
            }
        }
        for (x, y, _) in parked.occupied_cells() {
            field.set_cell(y.try_into().unwrap(), x.try_into().unwrap(), Cell::Empty);
        }

        assert!(piece.try_rotate(&field).is_err());
        assert_eq!(piece, parked);
    }

    #[test]
    fn test_ghost_projects_to_the_floor() {
        let field = Field::EMPTY;
        let piece = FallingPiece::spawn(PieceKind::I);
        let ghost = piece.dropped(&field);
        // The I-piece's only occupied shape row is dy=1, which lands on the
        // bottom row when y = 20.
        assert_eq!(ghost.y(), 20);
        assert_eq!(ghost.x(), piece.x());
        // The projection never moves the piece itself.
        assert_eq!(piece.y(), 0);
    }

    #[test]
    fn test_ghost_rests_on_settled_cells() {
        let mut field = Field::EMPTY;
        field.fill_row(21, PieceKind::L);
        let ghost = FallingPiece::spawn(PieceKind::I).dropped(&field);
        assert_eq!(ghost.y(), 19);
    }
}
