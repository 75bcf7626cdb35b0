//! Challenge resolution between two pieces.

use crate::types::{ChallengeResult, Piece, Rank};
use tracing::instrument;

/// Decides a challenge between `challenger` and `target`.
///
/// Rules are tried in a fixed order and the first match is final:
/// 1. A challenging Flag only beats the other Flag.
/// 2. Equal ranks draw.
/// 3. A challenging Spy beats everything but a Private.
/// 4. A challenging Private only beats the Spy.
/// 5. Any other piece loses against the Spy.
/// 6. Otherwise the higher power wins.
#[instrument(ret)]
pub fn resolve(challenger: Piece, target: Piece) -> ChallengeResult {
    use ChallengeResult::*;

    let (attacker, defender) = (challenger.rank(), target.rank());

    if attacker == Rank::Flag {
        return if defender == Rank::Flag {
            ChallengerWins
        } else {
            ChallengerLoses
        };
    }

    if attacker == defender {
        return Draw;
    }

    match (attacker, defender) {
        (Rank::Spy, Rank::Private) => ChallengerLoses,
        (Rank::Spy, _) => ChallengerWins,
        (Rank::Private, Rank::Spy) => ChallengerWins,
        (Rank::Private, _) => ChallengerLoses,
        (_, Rank::Spy) => ChallengerLoses,
        _ if attacker.power() > defender.power() => ChallengerWins,
        _ => ChallengerLoses,
    }
}
