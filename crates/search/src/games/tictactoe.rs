//! Tic-tac-toe.
//!
//! Tic-tac-toe is a solved game where perfect play always results in a
//! draw, which makes it a good check on the search: a full-depth minimax
//! never loses, and two of them always draw.

use std::fmt;

use arena_core::{CoreError, Game, Outcome, Result, Side};

/// Tic-tac-toe player.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opposing player.
    pub fn opposite(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Cell mark used on the wire
    pub fn mark(self) -> &'static str {
        match self {
            Player::X => "X",
            Player::O => "O",
        }
    }

    /// Parse a cell mark ("X" / "O")
    pub fn from_mark(mark: &str) -> Option<Self> {
        match mark {
            "X" => Some(Player::X),
            "O" => Some(Player::O),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mark())
    }
}

impl From<Player> for Side {
    fn from(player: Player) -> Side {
        match player {
            Player::X => Side::First,
            Player::O => Side::Second,
        }
    }
}

impl From<Side> for Player {
    fn from(side: Side) -> Player {
        match side {
            Side::First => Player::X,
            Side::Second => Player::O,
        }
    }
}

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2], // top row
    [3, 4, 5], // middle row
    [6, 7, 8], // bottom row
    [0, 3, 6], // left column
    [1, 4, 7], // center column
    [2, 5, 8], // right column
    [0, 4, 8], // main diagonal
    [2, 4, 6], // anti-diagonal
];

/// Tic-tac-toe board state.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct TicTacToeState {
    /// Board: 9 cells, indexed 0-8 (row-major).
    /// ```text
    /// 0 | 1 | 2
    /// ---------
    /// 3 | 4 | 5
    /// ---------
    /// 6 | 7 | 8
    /// ```
    board: [Option<Player>; 9],

    /// Current player to move.
    current: Player,

    /// Cached winner (if any).
    winner: Option<Player>,
}

impl TicTacToeState {
    /// Create a new empty board with X to move.
    pub fn new() -> Self {
        Self {
            board: [None; 9],
            current: Player::X,
            winner: None,
        }
    }

    /// Get the current player to move.
    pub fn current_player(&self) -> Player {
        self.current
    }

    /// Get the winner, if any.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Get the piece at a cell, if any.
    pub fn get(&self, cell: usize) -> Option<Player> {
        self.board.get(cell).copied().flatten()
    }

    /// True if every cell holds a mark.
    pub fn is_full(&self) -> bool {
        self.board.iter().all(|c| c.is_some())
    }

    /// Players with a completed line, at most one per player.
    fn line_owners(&self) -> Vec<Player> {
        let mut owners = Vec::new();
        for line in LINES {
            if let Some(player) = self.board[line[0]] {
                if self.board[line[1]] == Some(player)
                    && self.board[line[2]] == Some(player)
                    && !owners.contains(&player)
                {
                    owners.push(player);
                }
            }
        }
        owners
    }

    /// Encode as a 3x3 grid of `""`, `"X"` or `"O"`.
    pub fn to_grid(&self) -> Vec<Vec<String>> {
        self.board
            .chunks(3)
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map(|p| p.mark().to_string()).unwrap_or_default())
                    .collect()
            })
            .collect()
    }

    /// Decode a 3x3 grid with `current` to move.
    ///
    /// Rejects boards that cannot arise in play: X must have the same number
    /// of marks as O (X to move) or one more (O to move), and at most one
    /// player may own a line.
    pub fn from_grid<S: AsRef<str>>(grid: &[Vec<S>], current: Player) -> Result<Self> {
        if grid.len() != 3 || grid.iter().any(|row| row.len() != 3) {
            return Err(CoreError::InvalidPosition(
                "tic-tac-toe grid must be 3x3".to_string(),
            ));
        }

        let mut board = [None; 9];
        for (i, cell) in grid.iter().flatten().enumerate() {
            let cell = cell.as_ref();
            if cell.is_empty() {
                continue;
            }
            board[i] = Some(Player::from_mark(cell).ok_or_else(|| {
                CoreError::InvalidPosition(format!("invalid cell: {cell:?}"))
            })?);
        }

        let count = |p: Player| board.iter().filter(|&&c| c == Some(p)).count();
        let (xs, os) = (count(Player::X), count(Player::O));
        let expected = match xs.checked_sub(os) {
            Some(0) => Player::X,
            Some(1) => Player::O,
            _ => {
                return Err(CoreError::InvalidPosition(format!(
                    "{xs} X marks and {os} O marks cannot occur in play"
                )))
            }
        };
        if expected != current {
            return Err(CoreError::InvalidPosition(format!(
                "{current} cannot be to move with {xs} X marks and {os} O marks"
            )));
        }

        let mut state = Self {
            board,
            current,
            winner: None,
        };
        let owners = state.line_owners();
        if owners.len() > 1 {
            return Err(CoreError::InvalidPosition(
                "both players have a completed line".to_string(),
            ));
        }
        state.winner = owners.first().copied();
        Ok(state)
    }
}

impl Default for TicTacToeState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TicTacToeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            if row > 0 {
                writeln!(f, "-----------")?;
            }
            for col in 0..3 {
                if col > 0 {
                    write!(f, "|")?;
                }
                match self.board[row * 3 + col] {
                    Some(player) => write!(f, " {player} ")?,
                    None => write!(f, "   ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Tic-tac-toe action (cell index 0-8).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TicTacToeAction(pub u8);

impl TicTacToeAction {
    /// Action for the cell at (row, col), if on the board.
    pub fn from_coords(row: u8, col: u8) -> Option<Self> {
        (row < 3 && col < 3).then(|| TicTacToeAction(row * 3 + col))
    }

    /// Get the row (0-2).
    pub fn row(self) -> u8 {
        self.0 / 3
    }

    /// Get the column (0-2).
    pub fn col(self) -> u8 {
        self.0 % 3
    }
}

impl fmt::Display for TicTacToeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row(), self.col())
    }
}

/// Tic-tac-toe game implementation.
#[derive(Clone, Copy, Debug, Default)]
pub struct TicTacToe;

impl Game for TicTacToe {
    type State = TicTacToeState;
    type Action = TicTacToeAction;

    fn initial_state(&self) -> Self::State {
        TicTacToeState::new()
    }

    fn side_to_move(&self, state: &Self::State) -> Side {
        state.current.into()
    }

    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action> {
        if state.winner.is_some() {
            return Vec::new();
        }
        state
            .board
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| TicTacToeAction(i as u8))
            .collect()
    }

    /// # Panics
    ///
    /// Panics if the cell is already occupied.
    fn apply(&self, state: &Self::State, action: Self::Action) -> Self::State {
        let cell = action.0 as usize;
        assert!(
            state.board[cell].is_none(),
            "apply called on occupied cell {action}"
        );
        let mut new_state = state.clone();
        new_state.board[cell] = Some(state.current);
        new_state.current = state.current.opposite();
        new_state.winner = new_state.line_owners().first().copied();
        new_state
    }

    fn outcome(&self, state: &Self::State) -> Option<Outcome> {
        match state.winner {
            Some(player) => Some(Outcome::Win(player.into())),
            None if state.is_full() => Some(Outcome::Draw),
            None => None,
        }
    }

    /// Only terminal positions carry a score; the search always reaches them.
    fn evaluate(&self, _state: &Self::State, _perspective: Side) -> i32 {
        0
    }
}
