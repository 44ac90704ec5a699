//! # nogo-mcts
//!
//! Decision engine for 9x9 NoGo: root-parallel Monte-Carlo tree search
//! with RAVE, plus a deterministic opening heuristic built on eye shapes.
//! The search core reaches the rules only through the [`Game`] trait; a
//! complete NoGo board ships as the default implementation.
//!
//! ```
//! use nogo_mcts::{Agent, Board};
//!
//! let mut agent = Agent::from_args("name=demo role=black seed=7 simulation=50").unwrap();
//! agent.open_episode("");
//! let board = Board::new();
//! let mov = agent.decide(&board).expect("empty board has legal moves");
//! assert!(nogo_mcts::Game::is_legal(&board, mov));
//! ```

// Engine infrastructure
mod agent;   // Decision entry and episode lifecycle
mod arena;   // Bump-allocated node storage
mod board;   // NoGo rule engine
mod config;  // Typed key=value configuration
mod game;    // Board interface trait and core types
mod mcts;    // Search phases and root-parallel driver
mod opening; // Edge/corner eye heuristic

#[cfg(test)]
mod arena_tests;
#[cfg(test)]
mod opening_tests;

pub use agent::Agent;
pub use arena::{ArenaExhausted, Node, NodeArena, NodeId};
pub use board::Board;
pub use config::{AgentConfig, ConfigError, SearchMode, OPENING_MOVES};
pub use game::{neighbors, Color, Game, Move, Position, BOARD_CELLS, BOARD_SIZE};
pub use mcts::{Search, SearchLimits, DEFAULT_ARENA_CAPACITY, DEFAULT_BUDGET, RAVE_BIAS};
pub use opening::{opening_move, CORNER_POINTS, EDGE_POINTS};
