//! Game-tagged positions.
//!
//! The controller holds one `BoardState` per match and dispatches on the
//! variant; everything below it (move generation, terminal detection,
//! search) is reached through the per-game types and the `Game` trait.

use arena_chess::{Chess, ChessRules, Color, Move, Position, Square};
use arena_core::{CoreError, Game, Outcome, Side};
use arena_search::games::{Player, TicTacToe, TicTacToeAction, TicTacToeState};
use arena_search::Minimax;
use serde::{Deserialize, Serialize};

use crate::{
    CheckFlags, ChessMove, GameType, GridCoord, IllegalMoveReason, MatchConfig, MoveRecord,
    PlayerMove, PromotionChoice,
};

/// A position of either game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "BoardRecord", try_from = "BoardRecord")]
pub enum BoardState {
    TicTacToe(TicTacToeState),
    Chess(Position),
}

/// A move that has been checked against a position and can be applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolvedMove {
    TicTacToe(TicTacToeAction),
    Chess(Move),
}

impl ResolvedMove {
    /// The wire form of this move
    pub fn to_player_move(self) -> PlayerMove {
        match self {
            ResolvedMove::TicTacToe(action) => {
                PlayerMove::cell(action.row().into(), action.col().into())
            }
            ResolvedMove::Chess(mv) => {
                let mut wire = ChessMove::new(grid_coord(mv.from()), grid_coord(mv.to()));
                wire.promotion = mv
                    .promotion_piece()
                    .and_then(|piece| PromotionChoice::try_from(piece).ok());
                PlayerMove::Chess(wire)
            }
        }
    }

    pub fn notation(self) -> String {
        match self {
            ResolvedMove::TicTacToe(action) => action.to_string(),
            ResolvedMove::Chess(mv) => mv.to_string(),
        }
    }

    /// History entry for `side` playing this move
    pub fn record(self, side: Side) -> MoveRecord {
        MoveRecord {
            side,
            notation: self.notation(),
            mv: self.to_player_move(),
        }
    }
}

fn grid_coord(sq: Square) -> GridCoord {
    GridCoord::new(sq.grid_row(), sq.grid_col())
}

fn square_at(row: i32, col: i32) -> Option<Square> {
    let row = u8::try_from(row).ok()?;
    let col = u8::try_from(col).ok()?;
    Square::from_grid(row, col)
}

impl BoardState {
    /// Canonical starting position
    pub fn starting(game_type: GameType) -> Self {
        match game_type {
            GameType::TicTacToe => BoardState::TicTacToe(TicTacToeState::new()),
            GameType::Chess => BoardState::Chess(Position::starting()),
        }
    }

    pub fn game_type(&self) -> GameType {
        match self {
            BoardState::TicTacToe(_) => GameType::TicTacToe,
            BoardState::Chess(_) => GameType::Chess,
        }
    }

    pub fn side_to_move(&self) -> Side {
        match self {
            BoardState::TicTacToe(state) => state.current_player().into(),
            BoardState::Chess(pos) => pos.side_to_move().into(),
        }
    }

    /// Final outcome, or `None` while the game is in progress.
    ///
    /// `rules` only affects chess.
    pub fn outcome(&self, rules: ChessRules) -> Option<Outcome> {
        match self {
            BoardState::TicTacToe(state) => TicTacToe.outcome(state),
            BoardState::Chess(pos) => Chess::new(rules).outcome(pos),
        }
    }

    /// Which kings are attacked; tic-tac-toe has none
    pub fn check_flags(&self) -> Option<CheckFlags> {
        match self {
            BoardState::TicTacToe(_) => None,
            BoardState::Chess(pos) => Some(CheckFlags {
                first: pos.is_in_check(Color::White),
                second: pos.is_in_check(Color::Black),
            }),
        }
    }

    /// Destinations of the piece on `origin` if it belongs to the side to
    /// move, in generation order. Promotion variants collapse into one entry.
    pub fn legal_destinations_from(&self, origin: GridCoord) -> Vec<GridCoord> {
        let BoardState::Chess(pos) = self else {
            return Vec::new();
        };
        let Some(from) = Square::from_grid(origin.row, origin.col) else {
            return Vec::new();
        };
        let mut destinations: Vec<_> = pos
            .legal_moves_from(from)
            .into_iter()
            .map(|mv| grid_coord(mv.to()))
            .collect();
        destinations.dedup();
        destinations
    }

    /// Check a submitted move against this position.
    pub fn resolve(&self, mv: &PlayerMove) -> Result<ResolvedMove, IllegalMoveReason> {
        match (self, mv) {
            (BoardState::TicTacToe(state), PlayerMove::Cell(cell)) => {
                let action = u8::try_from(cell.row)
                    .ok()
                    .zip(u8::try_from(cell.col).ok())
                    .and_then(|(row, col)| TicTacToeAction::from_coords(row, col))
                    .ok_or(IllegalMoveReason::OffBoard)?;
                if state.get(action.0.into()).is_some() {
                    return Err(IllegalMoveReason::Occupied);
                }
                Ok(ResolvedMove::TicTacToe(action))
            }
            (BoardState::Chess(pos), PlayerMove::Chess(chess)) => {
                resolve_chess(pos, chess).map(ResolvedMove::Chess)
            }
            _ => Err(IllegalMoveReason::WrongGame),
        }
    }

    /// Apply a move produced by [`BoardState::resolve`] or [`BoardState::engine_reply`].
    ///
    /// # Panics
    ///
    /// Panics if the move belongs to the other game.
    pub fn apply(&self, mv: ResolvedMove) -> BoardState {
        match (self, mv) {
            (BoardState::TicTacToe(state), ResolvedMove::TicTacToe(action)) => {
                BoardState::TicTacToe(TicTacToe.apply(state, action))
            }
            (BoardState::Chess(pos), ResolvedMove::Chess(mv)) => BoardState::Chess(pos.make_move(mv)),
            (board, mv) => panic!("cannot apply {mv:?} to a {} board", board.game_type()),
        }
    }

    /// Search the best move for the side to move.
    pub fn engine_reply(&self, config: &MatchConfig) -> arena_core::Result<ResolvedMove> {
        match self {
            BoardState::TicTacToe(state) => {
                let result = Minimax::new(config.tictactoe_search).search(&TicTacToe, state)?;
                Ok(ResolvedMove::TicTacToe(result.best_action))
            }
            BoardState::Chess(pos) => {
                let game = Chess::new(config.chess_rules);
                let result = Minimax::new(config.chess_search).search(&game, pos)?;
                Ok(ResolvedMove::Chess(result.best_action))
            }
        }
    }

    /// Display grid, row 0 first
    pub fn to_grid(&self) -> Vec<Vec<String>> {
        match self {
            BoardState::TicTacToe(state) => state.to_grid(),
            BoardState::Chess(pos) => pos.to_grid(),
        }
    }
}

fn resolve_chess(pos: &Position, wire: &ChessMove) -> Result<Move, IllegalMoveReason> {
    let from = square_at(wire.from_row, wire.from_col).ok_or(IllegalMoveReason::OffBoard)?;
    let to = square_at(wire.to_row, wire.to_col).ok_or(IllegalMoveReason::OffBoard)?;

    if pos
        .piece_at(from)
        .map_or(true, |piece| piece.color != pos.side_to_move())
    {
        return Err(IllegalMoveReason::NoOwnPiece);
    }

    let candidates: Vec<Move> = pos
        .pseudo_legal_moves_from(from)
        .into_iter()
        .filter(|mv| mv.to() == to)
        .collect();
    if candidates.is_empty() {
        return Err(IllegalMoveReason::UnreachableDestination);
    }

    let promotion = wire.promotion.map(Into::into);
    let mv = candidates
        .into_iter()
        .find(|mv| mv.matches(from, to, promotion))
        .ok_or(IllegalMoveReason::InvalidPromotion)?;

    if pos.make_move(mv).is_in_check(pos.side_to_move()) {
        return Err(IllegalMoveReason::LeavesKingInCheck);
    }
    Ok(mv)
}

/// Serialized form of a [`BoardState`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "game_type", rename_all = "snake_case")]
enum BoardRecord {
    TicTacToe {
        board: Vec<Vec<String>>,
        current_player: String,
    },
    Chess {
        board: Vec<Vec<String>>,
        current_player: String,
        fen: String,
        move_count: u32,
    },
}

impl From<BoardState> for BoardRecord {
    fn from(state: BoardState) -> Self {
        match state {
            BoardState::TicTacToe(state) => BoardRecord::TicTacToe {
                board: state.to_grid(),
                current_player: state.current_player().mark().to_string(),
            },
            BoardState::Chess(pos) => BoardRecord::Chess {
                board: pos.to_grid(),
                current_player: pos.side_to_move().name().to_string(),
                fen: pos.to_fen(),
                move_count: pos.plies_played(),
            },
        }
    }
}

impl TryFrom<BoardRecord> for BoardState {
    type Error = CoreError;

    fn try_from(record: BoardRecord) -> Result<Self, CoreError> {
        match record {
            BoardRecord::TicTacToe {
                board,
                current_player,
            } => {
                let player = Player::from_mark(&current_player).ok_or_else(|| {
                    CoreError::InvalidPosition(format!("invalid current_player: {current_player:?}"))
                })?;
                Ok(BoardState::TicTacToe(TicTacToeState::from_grid(&board, player)?))
            }
            BoardRecord::Chess {
                board,
                current_player,
                fen,
                move_count,
            } => {
                // The FEN carries castling, en passant and the clocks; the
                // rest of the record must agree with it.
                let pos = Position::from_fen(&fen)?;
                if pos.to_grid() != board {
                    return Err(CoreError::InvalidPosition(
                        "board does not match fen".to_string(),
                    ));
                }
                if Color::from_name(&current_player) != Some(pos.side_to_move()) {
                    return Err(CoreError::InvalidPosition(format!(
                        "current_player {current_player:?} does not match fen"
                    )));
                }
                if move_count != pos.plies_played() {
                    return Err(CoreError::InvalidPosition(format!(
                        "move_count {move_count} does not match fen"
                    )));
                }
                Ok(BoardState::Chess(pos))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chess(fen: &str) -> BoardState {
        BoardState::Chess(Position::from_fen(fen).unwrap())
    }

    fn chess_move(from: (u8, u8), to: (u8, u8)) -> PlayerMove {
        PlayerMove::chess(GridCoord::new(from.0, from.1), GridCoord::new(to.0, to.1))
    }

    #[test]
    fn test_starting_positions() {
        let ttt = BoardState::starting(GameType::TicTacToe);
        assert_eq!(ttt.side_to_move(), Side::First);
        assert_eq!(ttt.outcome(ChessRules::default()), None);
        assert_eq!(ttt.check_flags(), None);

        let chess = BoardState::starting(GameType::Chess);
        assert_eq!(chess.game_type(), GameType::Chess);
        assert_eq!(chess.to_grid()[0][4], "k");
        assert_eq!(chess.to_grid()[7][4], "K");
        assert_eq!(chess.check_flags(), Some(CheckFlags::default()));
    }

    #[test]
    fn test_resolve_tictactoe() {
        let board = BoardState::starting(GameType::TicTacToe);
        let mv = board.resolve(&PlayerMove::cell(1, 1)).unwrap();
        assert_eq!(mv, ResolvedMove::TicTacToe(TicTacToeAction(4)));

        let board = board.apply(mv);
        assert_eq!(board.resolve(&PlayerMove::cell(1, 1)), Err(IllegalMoveReason::Occupied));
        assert_eq!(board.resolve(&PlayerMove::cell(3, 0)), Err(IllegalMoveReason::OffBoard));
        assert_eq!(board.resolve(&PlayerMove::cell(0, -1)), Err(IllegalMoveReason::OffBoard));
        assert_eq!(
            board.resolve(&chess_move((6, 4), (4, 4))),
            Err(IllegalMoveReason::WrongGame)
        );
    }

    #[test]
    fn test_resolve_chess_reasons() {
        let board = BoardState::starting(GameType::Chess);
        let e2e4 = board.resolve(&chess_move((6, 4), (4, 4))).unwrap();
        assert_eq!(e2e4, ResolvedMove::Chess(Move::double_pawn_push(Square::E2, Square::E4)));

        // empty origin
        assert_eq!(
            board.resolve(&chess_move((4, 4), (3, 4))),
            Err(IllegalMoveReason::NoOwnPiece)
        );
        // black pawn while white is to move
        assert_eq!(
            board.resolve(&chess_move((1, 4), (3, 4))),
            Err(IllegalMoveReason::NoOwnPiece)
        );
        assert_eq!(
            board.resolve(&chess_move((6, 4), (3, 4))),
            Err(IllegalMoveReason::UnreachableDestination)
        );
        assert_eq!(
            board.resolve(&chess_move((6, 4), (8, 4))),
            Err(IllegalMoveReason::OffBoard)
        );
        assert_eq!(board.resolve(&PlayerMove::cell(0, 0)), Err(IllegalMoveReason::WrongGame));
    }

    #[test]
    fn test_resolve_self_check() {
        // The e2 knight is pinned by the e8 rook
        let board = chess("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1");
        assert_eq!(
            board.resolve(&chess_move((6, 4), (5, 2))),
            Err(IllegalMoveReason::LeavesKingInCheck)
        );
        assert!(board.legal_destinations_from(GridCoord::new(6, 4)).is_empty());
    }

    #[test]
    fn test_resolve_promotion() {
        let board = chess("8/P7/8/8/8/8/8/4K2k w - - 0 1");
        let queen = board.resolve(&chess_move((1, 0), (0, 0))).unwrap();
        let ResolvedMove::Chess(queen) = queen else {
            panic!("expected a chess move");
        };
        assert_eq!(queen.promotion_piece(), Some(arena_chess::PieceType::Queen));

        let PlayerMove::Chess(wire) = chess_move((1, 0), (0, 0)) else {
            unreachable!()
        };
        let knight = board
            .resolve(&PlayerMove::Chess(wire.with_promotion(PromotionChoice::Knight)))
            .unwrap();
        assert_eq!(knight.notation(), "a7a8n");

        // a promotion letter on a non-promoting move
        let start = BoardState::starting(GameType::Chess);
        let PlayerMove::Chess(push) = chess_move((6, 4), (5, 4)) else {
            unreachable!()
        };
        assert_eq!(
            start.resolve(&PlayerMove::Chess(push.with_promotion(PromotionChoice::Queen))),
            Err(IllegalMoveReason::InvalidPromotion)
        );
    }

    #[test]
    fn test_legal_destinations_collapse_promotions() {
        let board = chess("8/P7/8/8/8/8/8/4K2k w - - 0 1");
        assert_eq!(
            board.legal_destinations_from(GridCoord::new(1, 0)),
            vec![GridCoord::new(0, 0)]
        );

        let start = BoardState::starting(GameType::Chess);
        assert_eq!(
            start.legal_destinations_from(GridCoord::new(7, 6)),
            vec![GridCoord::new(5, 5), GridCoord::new(5, 7)]
        );
        assert!(start.legal_destinations_from(GridCoord::new(9, 9)).is_empty());
        assert!(BoardState::starting(GameType::TicTacToe)
            .legal_destinations_from(GridCoord::new(0, 0))
            .is_empty());
    }

    #[test]
    fn test_engine_move_round_trips_through_wire_form() {
        let board = BoardState::starting(GameType::Chess);
        let reply = board.engine_reply(&MatchConfig::default()).unwrap();
        assert_eq!(board.resolve(&reply.to_player_move()), Ok(reply));
    }

    #[test]
    fn test_check_flags() {
        let board = chess("4r1k1/8/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(
            board.check_flags(),
            Some(CheckFlags {
                first: true,
                second: false
            })
        );
    }

    #[test]
    fn test_chess_record_json() {
        let board = BoardState::starting(GameType::Chess)
            .apply(ResolvedMove::Chess(Move::double_pawn_push(Square::E2, Square::E4)));
        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json["game_type"], "chess");
        assert_eq!(json["current_player"], "black");
        assert_eq!(json["move_count"], 1);
        assert_eq!(json["board"][4][4], "P");
        assert_eq!(json["board"][6][4], "");

        let decoded: BoardState = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, board);
    }

    #[test]
    fn test_tictactoe_record_json() {
        let board = BoardState::starting(GameType::TicTacToe)
            .apply(ResolvedMove::TicTacToe(TicTacToeAction(4)));
        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json["game_type"], "tic_tac_toe");
        assert_eq!(json["current_player"], "O");
        assert_eq!(json["board"][1][1], "X");

        let decoded: BoardState = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, board);
    }

    #[test]
    fn test_chess_record_must_agree_with_fen() {
        let mut json = serde_json::to_value(BoardState::starting(GameType::Chess)).unwrap();
        json["current_player"] = "black".into();
        assert!(serde_json::from_value::<BoardState>(json).is_err());

        let mut json = serde_json::to_value(BoardState::starting(GameType::Chess)).unwrap();
        json["board"][6][4] = "".into();
        assert!(serde_json::from_value::<BoardState>(json).is_err());

        let mut json = serde_json::to_value(BoardState::starting(GameType::Chess)).unwrap();
        json["move_count"] = 7.into();
        assert!(serde_json::from_value::<BoardState>(json).is_err());
    }

    #[test]
    fn test_chess_record_rejects_bad_en_passant() {
        let mut json = serde_json::to_value(chess("4k3/8/8/3PP3/8/8/8/4K3 w - - 0 1")).unwrap();
        json["fen"] = "4k3/8/8/3PP3/8/8/8/4K3 w - e6 0 1".into();
        let err = serde_json::from_value::<BoardState>(json).unwrap_err();
        assert!(err.to_string().contains("en passant"), "{err}");
    }

    #[test]
    fn test_record_rejects_unknown_game() {
        let json = serde_json::json!({
            "game_type": "checkers",
            "board": [],
            "current_player": "X"
        });
        assert!(serde_json::from_value::<BoardState>(json).is_err());
    }
}
