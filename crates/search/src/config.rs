//! Search configuration parameters.
//!
//! Search is bounded by ply depth and, optionally, by a node budget. Both
//! are deterministic: the same position and config always give the same
//! move, regardless of machine speed.

use serde::{Deserialize, Serialize};

/// Minimax search configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum search depth in plies. Values below 1 are treated as 1.
    pub max_depth: u32,

    /// Optional cap on visited nodes. Once reached, every further node is
    /// scored statically as if it sat at the depth cutoff.
    pub max_nodes: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::for_chess()
    }
}

impl SearchConfig {
    /// Full-depth search for tic-tac-toe (the game never lasts more than 9 plies).
    pub fn for_tictactoe() -> Self {
        Self {
            max_depth: 9,
            max_nodes: None,
        }
    }

    /// Depth 3, the opponent strength the chess engine ships with.
    pub fn for_chess() -> Self {
        Self {
            max_depth: 3,
            max_nodes: None,
        }
    }

    /// Create a config with the specified depth and no node budget.
    pub fn with_depth(max_depth: u32) -> Self {
        Self {
            max_depth,
            max_nodes: None,
        }
    }

    /// Set a node budget.
    pub fn with_node_budget(mut self, max_nodes: u64) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    /// Depth actually searched.
    pub fn effective_depth(&self) -> u32 {
        self.max_depth.max(1)
    }
}
