//! Game of the Generals engine: the game state machine.
//!
//! The engine owns the [`GameState`] and applies typed [`Command`]s to it.
//! Status moves forward only: `PreSetup -> Setup -> InProgress -> GameOver`.

use crate::action::{GameError, Move};
use crate::command::{Command, HELP_TEXT};
use crate::contracts::{Contract, MoveContract};
use crate::coord::Coord;
use crate::rules::{check_winner, resolve};
use crate::setup::{SetupSource, parse_setup};
use crate::types::{
    ChallengeResult, GameState, GameStatus, MoveType, Piece, Player, Rank, RuleOptions,
};
use tracing::{debug, info, instrument, warn};

/// What happened when a move was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The piece stepped into an empty square.
    Moved {
        /// The moving piece.
        piece: Piece,
        /// The step taken.
        mov: Move,
    },
    /// The piece challenged an opposing piece.
    Challenged {
        /// The moving piece.
        challenger: Piece,
        /// The piece that was on the destination.
        target: Piece,
        /// The step taken.
        mov: Move,
        /// How the challenge went.
        result: ChallengeResult,
    },
}

impl std::fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveOutcome::Moved { piece, mov } => write!(f, "{piece} moves {mov}"),
            MoveOutcome::Challenged {
                challenger,
                target,
                mov,
                result,
            } => write!(
                f,
                "{challenger} on {} challenges {target} on {}: {result}",
                mov.from, mov.to
            ),
        }
    }
}

/// Successful result of applying a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// Help was requested.
    Help,
    /// A piece was placed.
    Placed {
        /// Square written.
        coord: Coord,
        /// Piece now on it.
        piece: Piece,
    },
    /// A setup was loaded and play has begun.
    SetupLoaded {
        /// Number of placements applied.
        placed: usize,
    },
    /// Setup was declared finished.
    Started,
    /// A move was applied.
    Moved(MoveOutcome),
    /// The game was ended on request.
    Terminated,
}

impl std::fmt::Display for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Feedback::Help => f.write_str(HELP_TEXT),
            Feedback::Placed { coord, piece } => write!(f, "Placed {piece} on {coord}"),
            Feedback::SetupLoaded { placed } => {
                write!(f, "Loaded {placed} pieces. Let the battle begin!")
            }
            Feedback::Started => f.write_str("Setup complete. Let the battle begin!"),
            Feedback::Moved(outcome) => write!(f, "{outcome}"),
            Feedback::Terminated => f.write_str("Exiting game."),
        }
    }
}

/// The line reported after every turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum StatusReport {
    /// Pieces still need to be placed.
    #[display("please set up the board")]
    SetUpBoard,
    /// Waiting on a player.
    #[display("{} to move", _0)]
    ToMove(Player),
    /// The game was won.
    #[display("{} wins", _0)]
    Wins(Player),
}

/// Game of the Generals engine.
#[derive(Debug)]
pub struct Engine {
    state: GameState,
    setup_source: Box<dyn SetupSource>,
    last_command: Option<Command>,
}

impl Engine {
    /// Creates an engine with an empty board in `PreSetup`.
    #[instrument(skip(setup_source))]
    pub fn new(options: RuleOptions, setup_source: Box<dyn SetupSource>) -> Self {
        Self {
            state: GameState::new(options),
            setup_source,
            last_command: None,
        }
    }

    /// Returns the current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    /// Returns the player on move.
    pub fn to_move(&self) -> Player {
        self.state.to_move()
    }

    /// Returns the recorded winner.
    pub fn winner(&self) -> Option<Player> {
        self.state.winner()
    }

    /// The most recently applied command.
    pub fn last_command(&self) -> Option<&Command> {
        self.last_command.as_ref()
    }

    /// False once the game is over.
    pub fn is_running(&self) -> bool {
        self.state.status() != GameStatus::GameOver
    }

    /// Opens the setup phase and returns the help text to show.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> &'static str {
        if self.state.status() == GameStatus::PreSetup {
            info!("Starting game, entering setup");
            self.state.set_status(GameStatus::Setup);
        }
        HELP_TEXT
    }

    /// Applies one command.
    ///
    /// The command is remembered as the last command whether or not it
    /// succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`GameError`] describing why the command was rejected.
    /// Rejected commands leave the game state as it was, except for
    /// [`GameError::InvariantViolation`]: debug builds check move
    /// postconditions after the board has changed.
    #[instrument(skip(self), fields(status = %self.state.status()))]
    pub fn apply(&mut self, command: Command) -> Result<Feedback, GameError> {
        self.last_command = Some(command);

        let result = match command {
            Command::ShowHelp => Ok(Feedback::Help),
            Command::Terminate => self.terminate(),
            Command::LoadSetupFile => self.load_setup(),
            Command::Ready => self.ready(),
            Command::PlacePiece {
                player,
                coord,
                rank,
            } => self.place(player, coord, rank),
            Command::MovePiece(mov) => self.make_move(mov).map(Feedback::Moved),
            Command::Invalid => Err(GameError::InvalidCommand),
        };

        if let Err(error) = &result {
            debug!(%error, "Command rejected");
        }
        result
    }

    /// Ends the game without a winner.
    #[instrument(skip(self))]
    pub fn terminate(&mut self) -> Result<Feedback, GameError> {
        if !self.is_running() {
            return Err(GameError::GameOver);
        }
        info!("Terminating game");
        self.state.set_status(GameStatus::GameOver);
        Ok(Feedback::Terminated)
    }

    /// Puts `player`'s `rank` on `coord`, replacing whatever was there.
    ///
    /// During play a placement can decide the game, so the board is
    /// checked for a winner afterwards.
    #[instrument(skip(self))]
    pub fn place(&mut self, player: Player, coord: Coord, rank: Rank) -> Result<Feedback, GameError> {
        self.require_placement_allowed()?;

        let piece = Piece::new(player, rank);
        self.state.board_mut().place(coord, piece);
        debug!(%coord, %piece, "Placed piece");
        self.evaluate();
        Ok(Feedback::Placed { coord, piece })
    }

    /// Replays the setup source as placements and starts play.
    ///
    /// Nothing is placed unless the whole source is readable and valid.
    #[instrument(skip(self))]
    pub fn load_setup(&mut self) -> Result<Feedback, GameError> {
        self.require_placement_allowed()?;

        let text = self.setup_source.read_setup().inspect_err(|error| {
            warn!(%error, "Setup source unavailable");
        })?;
        let placements = parse_setup(&text)?;

        let board = self.state.board_mut();
        for placement in &placements {
            board.place(placement.coord, placement.piece);
        }
        info!(placed = placements.len(), "Setup loaded");

        self.begin_play();
        Ok(Feedback::SetupLoaded {
            placed: placements.len(),
        })
    }

    /// Ends interactive setup and starts play.
    #[instrument(skip(self))]
    pub fn ready(&mut self) -> Result<Feedback, GameError> {
        match self.state.status() {
            GameStatus::PreSetup => Err(GameError::NotStarted),
            GameStatus::InProgress => Err(GameError::SetupComplete),
            GameStatus::GameOver => Err(GameError::GameOver),
            GameStatus::Setup => {
                self.begin_play();
                Ok(Feedback::Started)
            }
        }
    }

    /// Moves one piece, resolving a challenge if the destination is held
    /// by the opponent, then passes the turn.
    ///
    /// # Errors
    ///
    /// Rejects moves when the game is not in progress, when the squares are
    /// not adjacent, when the piece is not the mover's, or when the origin is
    /// empty or the destination holds an ally.
    #[instrument(skip(self), fields(player = %self.state.to_move()))]
    pub fn make_move(&mut self, mov: Move) -> Result<MoveOutcome, GameError> {
        MoveContract::pre(&self.state, &mov)?;

        #[cfg(debug_assertions)]
        let before = self.state.clone();

        let board = self.state.board_mut();
        let outcome = match (board.move_type_for(mov.from, mov.to), board.piece_at(mov.from)) {
            (MoveType::Move, Some(piece)) => {
                board.clear(mov.from);
                board.place(mov.to, piece);
                MoveOutcome::Moved { piece, mov }
            }
            (MoveType::Challenge, Some(challenger)) => {
                let target = board.piece_at(mov.to).ok_or(GameError::EmptyOrigin(mov.to))?;
                let result = resolve(challenger, target);
                board.clear(mov.from);
                match result {
                    ChallengeResult::ChallengerWins => board.place(mov.to, challenger),
                    ChallengeResult::ChallengerLoses => {}
                    ChallengeResult::Draw => board.clear(mov.to),
                }
                MoveOutcome::Challenged {
                    challenger,
                    target,
                    mov,
                    result,
                }
            }
            // Preconditions rule out an empty origin or an allied target.
            (_, None) => return Err(GameError::EmptyOrigin(mov.from)),
            (MoveType::Invalid, Some(_)) => return Err(GameError::OwnPieceAtTarget(mov.to)),
        };

        self.state.pass_turn();

        #[cfg(debug_assertions)]
        MoveContract::post(&before, &self.state)?;

        info!(%outcome, "Move applied");
        self.evaluate();
        Ok(outcome)
    }

    /// Checks for a winner and ends the game if there is one.
    ///
    /// Only a game in progress can be won; calling this in any other
    /// phase does nothing.
    #[instrument(skip(self), ret)]
    pub fn evaluate(&mut self) -> Option<Player> {
        if self.state.status() != GameStatus::InProgress {
            return self.state.winner();
        }

        let winner = check_winner(self.state.board())?;
        info!(%winner, "Game won");
        self.state.declare_winner(winner);
        Some(winner)
    }

    /// The status line to show after a turn, if any.
    pub fn report(&self) -> Option<StatusReport> {
        match (self.state.status(), self.state.winner()) {
            (GameStatus::PreSetup, _) => None,
            (GameStatus::Setup, _) => Some(StatusReport::SetUpBoard),
            (GameStatus::InProgress, _) => Some(StatusReport::ToMove(self.state.to_move())),
            (GameStatus::GameOver, Some(winner)) => Some(StatusReport::Wins(winner)),
            (GameStatus::GameOver, None) => None,
        }
    }

    fn require_placement_allowed(&self) -> Result<(), GameError> {
        match self.state.status() {
            GameStatus::PreSetup => Err(GameError::NotStarted),
            GameStatus::GameOver => Err(GameError::GameOver),
            GameStatus::Setup | GameStatus::InProgress => Ok(()),
        }
    }

    fn begin_play(&mut self) {
        self.state.set_status(GameStatus::InProgress);
        info!(first = %self.state.to_move(), "Play begins");
        self.evaluate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::interpret;
    use crate::coord::decode;
    use crate::setup::{InlineSetup, NoSetup};

    fn at(label: &str) -> Coord {
        decode(label).unwrap()
    }

    fn started(setup: &str) -> Engine {
        let mut engine = Engine::new(RuleOptions::default(), Box::new(InlineSetup::new(setup)));
        engine.start();
        engine
    }

    #[test]
    fn test_start_enters_setup() {
        let mut engine = Engine::new(RuleOptions::default(), Box::new(NoSetup));
        assert_eq!(engine.status(), GameStatus::PreSetup);
        assert_eq!(engine.report(), None);

        assert_eq!(engine.start(), HELP_TEXT);
        assert_eq!(engine.status(), GameStatus::Setup);
        assert_eq!(engine.report(), Some(StatusReport::SetUpBoard));
    }

    #[test]
    fn test_commands_before_start_are_rejected() {
        let mut engine = Engine::new(RuleOptions::default(), Box::new(NoSetup));
        assert_eq!(
            engine.apply(interpret("SET W A1 FLG")),
            Err(GameError::NotStarted)
        );
        assert_eq!(engine.apply(interpret("help")), Ok(Feedback::Help));
    }

    #[test]
    fn test_last_command_slot_holds_latest() {
        let mut engine = started("");
        assert_eq!(engine.last_command(), None);

        engine.apply(interpret("SET W A1 FLG")).unwrap();
        let _ = engine.apply(interpret("nonsense"));
        assert_eq!(engine.last_command(), Some(&Command::Invalid));
    }

    #[test]
    fn test_ready_starts_play() {
        let mut engine = started("");
        engine.apply(interpret("SET W A1 FLG")).unwrap();
        engine.apply(interpret("SET B I8 FLG")).unwrap();

        assert_eq!(engine.apply(Command::Ready), Ok(Feedback::Started));
        assert_eq!(engine.status(), GameStatus::InProgress);
        assert_eq!(engine.report(), Some(StatusReport::ToMove(Player::White)));
        assert_eq!(engine.apply(Command::Ready), Err(GameError::SetupComplete));
    }

    #[test]
    fn test_move_requires_play() {
        let mut engine = started("");
        engine.apply(interpret("SET W A1 CPT")).unwrap();
        assert_eq!(
            engine.apply(interpret("MV A1 A2")),
            Err(GameError::NotInProgress(GameStatus::Setup))
        );
    }

    #[test]
    fn test_challenge_outcomes_update_board() {
        let setup = "\
SET W A1 FLG
SET B I8 FLG
SET W C3 COL
SET B C4 MAJ
SET W E3 SGT
SET B E4 SGT
SET W G3 PVT
SET B G4 SPY";
        let mut engine = started(setup);
        engine.apply(Command::LoadSetupFile).unwrap();

        // Colonel beats Major and advances.
        let outcome = engine.make_move(Move::new(at("C3"), at("C4"))).unwrap();
        assert!(matches!(
            outcome,
            MoveOutcome::Challenged { result: ChallengeResult::ChallengerWins, .. }
        ));
        assert!(engine.state().board().is_empty(at("C3")));
        assert_eq!(
            engine.state().board().piece_at(at("C4")),
            Some(Piece::new(Player::White, Rank::Colonel))
        );

        // Sergeants draw: both removed.
        engine.make_move(Move::new(at("E4"), at("E3"))).unwrap();
        assert!(engine.state().board().is_empty(at("E3")));
        assert!(engine.state().board().is_empty(at("E4")));

        // Private takes the Spy.
        engine.make_move(Move::new(at("G3"), at("G4"))).unwrap();
        assert_eq!(
            engine.state().board().piece_at(at("G4")),
            Some(Piece::new(Player::White, Rank::Private))
        );
    }

    #[test]
    fn test_losing_challenger_is_removed() {
        let mut engine = started("SET W A1 FLG\nSET B I8 FLG\nSET W D4 SGT\nSET B D5 COL");
        engine.load_setup().unwrap();

        let outcome = engine.make_move(Move::new(at("D4"), at("D5"))).unwrap();
        assert!(matches!(
            outcome,
            MoveOutcome::Challenged { result: ChallengeResult::ChallengerLoses, .. }
        ));
        assert!(engine.state().board().is_empty(at("D4")));
        assert_eq!(
            engine.state().board().piece_at(at("D5")),
            Some(Piece::new(Player::Black, Rank::Colonel))
        );
        assert_eq!(engine.to_move(), Player::Black);
    }

    #[test]
    fn test_private_cannot_take_flag() {
        let mut engine = started("SET W A1 FLG\nSET B I8 FLG\nSET W H7 PVT");
        engine.load_setup().unwrap();

        engine.make_move(Move::new(at("H7"), at("H8"))).unwrap();
        engine.make_move(Move::new(at("I8"), at("I7"))).unwrap();

        let outcome = engine.make_move(Move::new(at("H8"), at("I7"))).unwrap();
        assert!(matches!(
            outcome,
            MoveOutcome::Challenged { result: ChallengeResult::ChallengerLoses, .. }
        ));
        assert!(engine.state().board().is_empty(at("H8")));
        assert!(engine.is_running());
    }

    #[test]
    fn test_officer_capturing_flag_ends_game() {
        let mut engine = started("SET W A1 FLG\nSET B I8 FLG\nSET W H8 MAJ");
        engine.load_setup().unwrap();

        engine.make_move(Move::new(at("H8"), at("I8"))).unwrap();
        assert_eq!(engine.status(), GameStatus::GameOver);
        assert_eq!(engine.winner(), Some(Player::White));
        assert_eq!(engine.report(), Some(StatusReport::Wins(Player::White)));
        assert_eq!(
            engine.make_move(Move::new(at("I8"), at("I7"))),
            Err(GameError::GameOver)
        );
    }

    #[test]
    fn test_load_setup_is_atomic() {
        let mut engine = started("SET W A1 FLG\nSET B I9 FLG");
        assert_eq!(
            engine.load_setup(),
            Err(GameError::InvalidSetupLine {
                line: 2,
                text: "SET B I9 FLG".to_string(),
            })
        );
        assert_eq!(engine.state().board().piece_count(), 0);
        assert_eq!(engine.status(), GameStatus::Setup);
    }

    #[test]
    fn test_unavailable_setup_leaves_board_empty() {
        let mut engine = Engine::new(RuleOptions::default(), Box::new(NoSetup));
        engine.start();
        assert!(matches!(
            engine.apply(Command::LoadSetupFile),
            Err(GameError::SetupUnavailable(_))
        ));
        assert_eq!(engine.state().board().piece_count(), 0);
        assert_eq!(engine.status(), GameStatus::Setup);
    }

    #[test]
    fn test_terminate_has_no_result_line() {
        let mut engine = started("");
        assert_eq!(engine.apply(Command::Terminate), Ok(Feedback::Terminated));
        assert!(!engine.is_running());
        assert_eq!(engine.winner(), None);
        assert_eq!(engine.report(), None);
        assert_eq!(engine.apply(Command::Terminate), Err(GameError::GameOver));
    }

    #[test]
    fn test_placement_during_play_can_win() {
        let mut engine = started("SET W A1 FLG\nSET B I8 FLG");
        engine.load_setup().unwrap();

        engine.apply(interpret("SET W I8 MAJ")).unwrap();

        assert_eq!(engine.status(), GameStatus::GameOver);
        assert_eq!(engine.winner(), Some(Player::White));
        assert_eq!(engine.report(), Some(StatusReport::Wins(Player::White)));
    }

    #[test]
    fn test_placement_during_setup_never_wins() {
        let mut engine = started("");
        engine.apply(interpret("SET W A1 FLG")).unwrap();

        assert_eq!(engine.status(), GameStatus::Setup);
        assert_eq!(engine.winner(), None);
    }

    #[test]
    fn test_first_player_option() {
        let options = RuleOptions {
            first_player: Player::Black,
            ..RuleOptions::default()
        };
        let mut engine = Engine::new(options, Box::new(InlineSetup::new("SET W A1 FLG\nSET B I8 FLG")));
        engine.start();
        engine.load_setup().unwrap();
        assert_eq!(engine.report(), Some(StatusReport::ToMove(Player::Black)));
    }
}
