//! Win detection for Game of the Generals.

use crate::types::{Board, Player};
use tracing::instrument;

/// Checks the board for a winner.
///
/// Checks run in a fixed order and the first one that holds decides:
/// 1. Only one player still has a flag on the board.
/// 2. White's flag stands on the last row.
/// 3. Black's flag stands on the first row.
///
/// Returns `None` while none of them holds.
#[instrument(skip(board), ret)]
pub fn check_winner(board: &Board) -> Option<Player> {
    sole_flag_holder(board).or_else(|| {
        Player::ALL
            .into_iter()
            .find(|player| board.has_flag_on_row(*player, player.goal_row()))
    })
}

/// The only player with a flag left, if exactly one has one.
pub fn sole_flag_holder(board: &Board) -> Option<Player> {
    match (board.flag_of(Player::White), board.flag_of(Player::Black)) {
        (Some(_), None) => Some(Player::White),
        (None, Some(_)) => Some(Player::Black),
        _ => None,
    }
}
