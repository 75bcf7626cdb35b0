//! Game rules for Game of the Generals.
//!
//! This module contains pure functions for evaluating combat and game
//! state. Rules are separated from the engine so they can be tested and
//! composed into move contracts on their own.

pub mod combat;
pub mod win;

pub use combat::resolve;
pub use win::check_winner;
