//! Game orchestration on top of the core geometry.
//!
//! - [`PieceBag`] - 7-bag randomizer with an injectable [`BagSeed`]
//! - [`PlayField`] - field + active/next piece + bag, and the turn controller
//! - [`GameSession`] - session state machine, gravity timing, score
//! - [`InputInterpreter`] - repeat/debounce interpretation of sampled input
//!
//! A turn ends exactly when a downward step is rejected: the piece freezes,
//! full rows clear, the top-out checks run, and the next piece is promoted.
//! [`GameSession`] drives that boundary from its frame clock and folds the
//! turn score into the running total.

pub use self::{game_session::*, input::*, piece_bag::*, play_field::*};

mod game_session;
mod input;
mod piece_bag;
mod play_field;
