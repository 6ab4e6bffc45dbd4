//! An immutable rules engine for a route-claiming train game.
//!
//! The crate models the full state of a two-player game (card piles, hands,
//! tickets, claimed routes) as persistent values: every rule application is
//! a pure function from one [`game_state::GameState`] to the next, and
//! illegal applications fail with an [`Error`] while leaving the original
//! state intact. All randomness is injected by the caller, so a seeded
//! generator replays a game exactly.
//!
//! Turn sequencing, player interaction and any transport layer live outside
//! the crate; [`map::GameMap`] provides a ready-made board to drive it with.

pub mod bag;
pub mod card;
pub mod card_state;
pub mod deck;
pub mod error;
pub mod game_state;
pub mod map;
pub mod player;
pub mod route;
pub mod station;
pub mod ticket;
pub mod trail;

pub use error::{Error, Result};
