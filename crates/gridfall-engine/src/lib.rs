//! Rules engine for a falling-block puzzle game.
//!
//! This crate owns the playing field, the active/next piece lifecycle,
//! collision detection, rotation with wall-kick resolution, line clearing,
//! scoring, and difficulty progression. Rendering and raw device polling are
//! external collaborators: they read snapshots from [`GameSession`] and feed
//! sampled input through [`InputInterpreter`].
//!
//! # Example
//!
//! ```
//! use gridfall_engine::{Direction, GameSession};
//!
//! let mut session = GameSession::new(100);
//!
//! // Manipulate the falling piece; blocked moves are ordinary rejections.
//! _ = session.try_shift(Direction::Left);
//! _ = session.try_rotate();
//!
//! // Advance the frame clock; gravity and turn completion happen inside.
//! session.increment_frame();
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Rejection of a move, rotation, or spawn placement that would collide.
///
/// This is an expected control outcome, not a failure: gravity relies on the
/// downward shift being rejected to know when a turn ends.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("piece colliding with the field")]
pub struct PieceCollisionError;

/// Game-over sentinel reported by the turn controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TopOutError {
    /// The attic spawn row is still occupied after line clearing.
    #[display("spawn row occupied after line clear")]
    AtticRowOccupied,
    /// The freshly spawned piece overlaps the settled field.
    #[display("fresh piece collides at spawn")]
    SpawnBlocked,
}
