//! Core geometry: the piece catalog, the playing field, and the falling piece.

pub use self::{falling_piece::*, field::*, shape::*};

pub(crate) mod falling_piece;
pub(crate) mod field;
pub(crate) mod shape;

/// Total field height, including the hidden attic rows.
pub const FIELD_ROWS: usize = 22;
/// Field width in columns.
pub const FIELD_COLS: usize = 10;
/// Hidden rows at the top of the field, used as a spawn buffer.
///
/// They exist in the grid but are excluded from visible rendering.
pub const ATTIC_ROWS: usize = 2;
/// Row inspected for the top-out check after a piece freezes (the last attic
/// row, directly above the visible area).
pub const TOP_OUT_ROW: usize = 1;

/// Spawn column offset for a fresh piece.
pub const SPAWN_X: i16 = 4;
/// Spawn row offset for a fresh piece.
pub const SPAWN_Y: i16 = 0;
