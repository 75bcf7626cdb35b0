//! Contract-based validation for moves.
//!
//! Contracts define correctness through preconditions and postconditions.
//! Preconditions are checked before every move; postconditions only in
//! debug builds.

use crate::action::{GameError, Move};
use crate::types::{GameState, GameStatus, MoveType};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), GameError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), GameError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game is being played.
pub struct GameInProgress;

impl GameInProgress {
    /// Fails unless the status is `InProgress`.
    pub fn check(state: &GameState) -> Result<(), GameError> {
        match state.status() {
            GameStatus::InProgress => Ok(()),
            GameStatus::GameOver => Err(GameError::GameOver),
            status => Err(GameError::NotInProgress(status)),
        }
    }
}

/// Precondition: pieces step at most one square, diagonally only when allowed.
pub struct Adjacent;

impl Adjacent {
    /// Fails for steps longer than one square, or disallowed diagonals.
    #[instrument(skip(state))]
    pub fn check(mov: &Move, state: &GameState) -> Result<(), GameError> {
        if mov.from.distance(mov.to) > 1 {
            return Err(GameError::NotAdjacent {
                from: mov.from,
                to: mov.to,
            });
        }
        if !state.options().diagonal_moves && mov.from.is_diagonal_to(mov.to) {
            return Err(GameError::DiagonalNotAllowed {
                from: mov.from,
                to: mov.to,
            });
        }
        Ok(())
    }
}

/// Precondition: the moving piece belongs to the player on move.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Fails if the origin holds the opponent's piece.
    #[instrument(skip(state))]
    pub fn check(mov: &Move, state: &GameState) -> Result<(), GameError> {
        match state.board().piece_at(mov.from) {
            Some(piece) if piece.owner() != state.to_move() => Err(GameError::NotYourPiece {
                square: mov.from,
                player: state.to_move(),
            }),
            _ => Ok(()),
        }
    }
}

/// Precondition: there is a piece to move and it is not stepping onto an ally.
pub struct OccupancyAllowed;

impl OccupancyAllowed {
    /// Fails for an empty origin or an allied destination.
    #[instrument(skip(state))]
    pub fn check(mov: &Move, state: &GameState) -> Result<(), GameError> {
        let board = state.board();
        match board.move_type_for(mov.from, mov.to) {
            MoveType::Move | MoveType::Challenge => Ok(()),
            MoveType::Invalid if board.is_empty(mov.from) => Err(GameError::EmptyOrigin(mov.from)),
            MoveType::Invalid => Err(GameError::OwnPieceAtTarget(mov.to)),
        }
    }
}

/// Composite precondition, checked in rule order.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(state))]
    pub fn check(mov: &Move, state: &GameState) -> Result<(), GameError> {
        GameInProgress::check(state)?;
        Adjacent::check(mov, state)?;
        PlayersTurn::check(mov, state)?;
        OccupancyAllowed::check(mov, state)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Postconditions:
/// - no piece appears out of nowhere
/// - the turn passed to the opponent
pub struct MoveContract;

impl Contract<GameState, Move> for MoveContract {
    fn pre(state: &GameState, action: &Move) -> Result<(), GameError> {
        LegalMove::check(action, state)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), GameError> {
        let mut violations = Vec::new();

        let (count_before, count_after) = (before.board().piece_count(), after.board().piece_count());
        if count_after > count_before {
            warn!(count_before, count_after, "Piece count grew during a move");
            violations.push("piece count never grows");
        }

        if after.to_move() != before.to_move().opponent() {
            warn!(before = %before.to_move(), after = %after.to_move(), "Turn did not pass");
            violations.push("turn passes to the opponent");
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(GameError::InvariantViolation(format!(
                "Postcondition failed: {}",
                violations.join("; ")
            )))
        }
    }
}
