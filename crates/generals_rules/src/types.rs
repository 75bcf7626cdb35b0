//! Core domain types for Game of the Generals.

use crate::coord::{COLUMNS, Coord, ROWS};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// White sets up on rows 1-3 and races its flag toward row 8.
    #[serde(rename = "W")]
    White,
    /// Black sets up on rows 6-8 and races its flag toward row 1.
    #[serde(rename = "B")]
    Black,
}

impl Player {
    /// Both players, White first.
    pub const ALL: [Player; 2] = [Player::White, Player::Black];

    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Parses the single-letter identity (`W` or `B`).
    pub fn from_letter(token: &str) -> Option<Self> {
        match token {
            "W" => Some(Player::White),
            "B" => Some(Player::Black),
            _ => None,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Player::White => "White",
            Player::Black => "Black",
        }
    }

    /// Row index a flag must reach for a crossing win.
    pub fn goal_row(self) -> usize {
        match self {
            Player::White => ROWS - 1,
            Player::Black => 0,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Piece rank, written in commands as a three-character code.
///
/// Ordered from strongest officer down to the flag.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, strum::Display,
)]
pub enum Rank {
    /// Five-star General.
    #[strum(to_string = "5SG")]
    FiveStarGeneral,
    /// Four-star General.
    #[strum(to_string = "4SG")]
    FourStarGeneral,
    /// Three-star General.
    #[strum(to_string = "3SG")]
    ThreeStarGeneral,
    /// Two-star General.
    #[strum(to_string = "2SG")]
    TwoStarGeneral,
    /// One-star General.
    #[strum(to_string = "1SG")]
    OneStarGeneral,
    /// Colonel.
    #[strum(to_string = "COL")]
    Colonel,
    /// Lieutenant Colonel.
    #[strum(to_string = "LTC")]
    LieutenantColonel,
    /// Major.
    #[strum(to_string = "MAJ")]
    Major,
    /// Captain.
    #[strum(to_string = "CPT")]
    Captain,
    /// First Lieutenant.
    #[strum(to_string = "1LT")]
    FirstLieutenant,
    /// Second Lieutenant.
    #[strum(to_string = "2LT")]
    SecondLieutenant,
    /// Sergeant.
    #[strum(to_string = "SGT")]
    Sergeant,
    /// Private: the only piece that beats the Spy.
    #[strum(to_string = "PVT")]
    Private,
    /// Spy: beats every officer, loses to a Private.
    #[strum(to_string = "SPY")]
    Spy,
    /// Flag: capturing it ends the game.
    #[strum(to_string = "FLG")]
    Flag,
}

impl Rank {
    /// Parses a three-character rank code such as `FLG` or `5SG`.
    pub fn from_code(code: &str) -> Option<Self> {
        code.parse().ok()
    }

    /// The three-character code.
    pub fn code(self) -> String {
        self.to_string()
    }

    /// Comparison power used between basic ranks.
    ///
    /// Spy and Flag carry sentinel values; their fights are decided by
    /// explicit rules, never by comparing these numbers.
    pub fn power(self) -> i32 {
        match self {
            Rank::FiveStarGeneral => 12,
            Rank::FourStarGeneral => 11,
            Rank::ThreeStarGeneral => 10,
            Rank::TwoStarGeneral => 9,
            Rank::OneStarGeneral => 8,
            Rank::Colonel => 7,
            Rank::LieutenantColonel => 6,
            Rank::Major => 5,
            Rank::Captain => 4,
            Rank::FirstLieutenant => 3,
            Rank::SecondLieutenant => 2,
            Rank::Sergeant => 1,
            Rank::Private => 0,
            Rank::Spy => 99,
            Rank::Flag => -1,
        }
    }

    /// Officers and the sergeant: everything except Private, Spy and Flag.
    pub fn is_basic(self) -> bool {
        !matches!(self, Rank::Private | Rank::Spy | Rank::Flag)
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Rank::FiveStarGeneral => "Five-star General",
            Rank::FourStarGeneral => "Four-star General",
            Rank::ThreeStarGeneral => "Three-star General",
            Rank::TwoStarGeneral => "Two-star General",
            Rank::OneStarGeneral => "One-star General",
            Rank::Colonel => "Colonel",
            Rank::LieutenantColonel => "Lieutenant Colonel",
            Rank::Major => "Major",
            Rank::Captain => "Captain",
            Rank::FirstLieutenant => "First Lieutenant",
            Rank::SecondLieutenant => "Second Lieutenant",
            Rank::Sergeant => "Sergeant",
            Rank::Private => "Private",
            Rank::Spy => "Spy",
            Rank::Flag => "Flag",
        }
    }
}

/// A piece on the board: who owns it and what it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_new::new)]
pub struct Piece {
    owner: Player,
    rank: Rank,
}

impl Piece {
    /// The owning player.
    pub fn owner(self) -> Player {
        self.owner
    }

    /// The piece's rank.
    pub fn rank(self) -> Rank {
        self.rank
    }

    /// Shorthand for `self.rank().power()`.
    pub fn power(self) -> i32 {
        self.rank.power()
    }

    /// True if this is `player`'s flag.
    pub fn is_flag_of(self, player: Player) -> bool {
        self.rank == Rank::Flag && self.owner == player
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.owner, self.rank.name())
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a piece.
    Occupied(Piece),
}

impl Square {
    /// The occupant, if any.
    pub fn piece(self) -> Option<Piece> {
        match self {
            Square::Empty => None,
            Square::Occupied(piece) => Some(piece),
        }
    }
}

/// What kind of move a from/to pair describes on the current board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum MoveType {
    /// Into an empty square.
    #[display("move")]
    Move,
    /// Into a square held by the opponent.
    #[display("challenge")]
    Challenge,
    /// From an empty square, or onto an allied piece.
    #[display("invalid")]
    Invalid,
}

/// Outcome of a challenge, from the challenger's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ChallengeResult {
    /// Challenger removes the target and takes its square.
    #[display("challenger wins")]
    ChallengerWins,
    /// Challenger is removed; the target stays.
    #[display("challenger loses")]
    ChallengerLoses,
    /// Both pieces are removed.
    #[display("draw")]
    Draw,
}

/// 9x8 Game of the Generals board.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    /// Squares indexed `[row][column]`.
    squares: [[Square; COLUMNS]; ROWS],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the square at the given coordinate.
    pub fn get(&self, coord: Coord) -> Square {
        self.squares[coord.row()][coord.column()]
    }

    /// The piece at `coord`, if any.
    pub fn piece_at(&self, coord: Coord) -> Option<Piece> {
        self.get(coord).piece()
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, coord: Coord) -> bool {
        self.get(coord) == Square::Empty
    }

    /// Puts `piece` on `coord`, replacing any occupant.
    pub fn place(&mut self, coord: Coord, piece: Piece) {
        self.squares[coord.row()][coord.column()] = Square::Occupied(piece);
    }

    /// Empties `coord`.
    pub fn clear(&mut self, coord: Coord) {
        self.squares[coord.row()][coord.column()] = Square::Empty;
    }

    /// Classifies a step from `from` to `to` by occupancy alone.
    pub fn move_type_for(&self, from: Coord, to: Coord) -> MoveType {
        match (self.get(from), self.get(to)) {
            (Square::Empty, _) => MoveType::Invalid,
            (Square::Occupied(_), Square::Empty) => MoveType::Move,
            (Square::Occupied(mover), Square::Occupied(target)) => {
                if mover.owner() == target.owner() {
                    MoveType::Invalid
                } else {
                    MoveType::Challenge
                }
            }
        }
    }

    /// All occupied squares, row by row.
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        Coord::all().filter_map(|coord| self.piece_at(coord).map(|piece| (coord, piece)))
    }

    /// Number of pieces on the board.
    pub fn piece_count(&self) -> usize {
        self.pieces().count()
    }

    /// Where `player`'s flag stands, if it is on the board.
    ///
    /// Setup never limits flag counts; the first flag in row order is
    /// returned.
    pub fn flag_of(&self, player: Player) -> Option<Coord> {
        self.pieces()
            .find(|(_, piece)| piece.is_flag_of(player))
            .map(|(coord, _)| coord)
    }

    /// True if any of `player`'s flags stands on `row`.
    pub fn has_flag_on_row(&self, player: Player, row: usize) -> bool {
        self.pieces()
            .any(|(coord, piece)| coord.row() == row && piece.is_flag_of(player))
    }
}

/// Phase of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GameStatus {
    /// Engine constructed but not started.
    #[display("pre-setup")]
    PreSetup,
    /// Pieces are being placed.
    #[display("setup")]
    Setup,
    /// Players are moving.
    #[display("in progress")]
    InProgress,
    /// Terminal: someone won or the game was ended.
    #[display("game over")]
    GameOver,
}

/// Rule variations chosen before the game starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleOptions {
    /// Allow one-square diagonal steps as well as orthogonal ones.
    pub diagonal_moves: bool,
    /// Player who makes the first move.
    pub first_player: Player,
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self {
            diagonal_moves: true,
            first_player: Player::White,
        }
    }
}

/// Complete game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// The board.
    board: Board,
    /// Current player to move.
    to_move: Player,
    /// Game status.
    status: GameStatus,
    /// Winner, once one is decided.
    winner: Option<Player>,
    /// Rules in force for this game.
    options: RuleOptions,
}

impl GameState {
    /// Creates an empty pre-setup state.
    pub fn new(options: RuleOptions) -> Self {
        Self {
            board: Board::new(),
            to_move: options.first_player,
            status: GameStatus::PreSetup,
            winner: None,
            options,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current player.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the winner, if the game was won.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Returns the rules in force.
    pub fn options(&self) -> &RuleOptions {
        &self.options
    }

    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub(crate) fn set_status(&mut self, status: GameStatus) {
        self.status = status;
    }

    pub(crate) fn pass_turn(&mut self) {
        self.to_move = self.to_move.opponent();
    }

    /// Records `winner` and ends the game.
    pub(crate) fn declare_winner(&mut self, winner: Player) {
        self.winner = Some(winner);
        self.status = GameStatus::GameOver;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(RuleOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::decode;
    use strum::IntoEnumIterator;

    fn at(label: &str) -> Coord {
        decode(label).unwrap()
    }

    #[test]
    fn test_rank_codes_are_three_characters() {
        assert_eq!(Rank::iter().count(), 15);
        for rank in Rank::iter() {
            assert_eq!(rank.code().len(), 3, "{rank:?}");
            assert_eq!(Rank::from_code(&rank.code()), Some(rank));
        }
        assert_eq!(Rank::from_code("XYZ"), None);
        assert_eq!(Rank::from_code("flg"), None);
    }

    #[test]
    fn test_power_table() {
        assert_eq!(Rank::FiveStarGeneral.power(), 12);
        assert_eq!(Rank::Colonel.power(), 7);
        assert_eq!(Rank::Private.power(), 0);
        assert_eq!(Rank::Spy.power(), 99);
        assert_eq!(Rank::Flag.power(), -1);
        assert_eq!(Rank::iter().filter(|r| r.is_basic()).count(), 12);
    }

    #[test]
    fn test_player_identity() {
        assert_eq!(Player::from_letter("W"), Some(Player::White));
        assert_eq!(Player::from_letter("B"), Some(Player::Black));
        assert_eq!(Player::from_letter("X"), None);
        assert_eq!(Player::White.opponent(), Player::Black);
        assert_eq!(Player::Black.to_string(), "Black");
    }

    #[test]
    fn test_player_serializes_as_letter() {
        let json = serde_json::to_string(&Player::Black).unwrap();
        assert_eq!(json, "\"B\"");
        let player: Player = serde_json::from_str("\"W\"").unwrap();
        assert_eq!(player, Player::White);
    }

    #[test]
    fn test_place_overwrites_without_residue() {
        let mut board = Board::new();
        let flag = Piece::new(Player::White, Rank::Flag);
        let spy = Piece::new(Player::Black, Rank::Spy);

        board.place(at("C3"), flag);
        assert_eq!(board.piece_at(at("C3")), Some(flag));

        board.place(at("C3"), spy);
        assert_eq!(board.piece_at(at("C3")), Some(spy));
        assert_eq!(board.piece_count(), 1);
    }

    #[test]
    fn test_clear() {
        let mut board = Board::new();
        board.place(at("D4"), Piece::new(Player::White, Rank::Major));
        board.clear(at("D4"));
        assert!(board.is_empty(at("D4")));
        assert_eq!(board.piece_count(), 0);
    }

    #[test]
    fn test_move_type_for() {
        let mut board = Board::new();
        board.place(at("A1"), Piece::new(Player::White, Rank::Captain));
        board.place(at("A2"), Piece::new(Player::White, Rank::Private));
        board.place(at("B2"), Piece::new(Player::Black, Rank::Private));

        assert_eq!(board.move_type_for(at("A1"), at("B1")), MoveType::Move);
        assert_eq!(board.move_type_for(at("A1"), at("A2")), MoveType::Invalid);
        assert_eq!(board.move_type_for(at("A1"), at("B2")), MoveType::Challenge);
        assert_eq!(board.move_type_for(at("C3"), at("C4")), MoveType::Invalid);
        assert_eq!(board.move_type_for(at("A1"), at("A1")), MoveType::Invalid);
    }

    #[test]
    fn test_flag_queries() {
        let mut board = Board::new();
        assert_eq!(board.flag_of(Player::White), None);

        board.place(at("E8"), Piece::new(Player::White, Rank::Flag));
        assert_eq!(board.flag_of(Player::White), Some(at("E8")));
        assert!(board.has_flag_on_row(Player::White, 7));
        assert!(!board.has_flag_on_row(Player::Black, 7));
    }
}
