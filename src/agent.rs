//! # Decision entry
//!
//! [`Agent`] turns a board state into a move. `Random` agents shuffle
//! the placements and take the first legal one; `MCTS` agents consult
//! the opening heuristic for their first few moves of an episode and run
//! the root-parallel search otherwise. `decide` returns `None` exactly
//! when the agent's colour has no legal move.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::{AgentConfig, ConfigError, SearchMode, OPENING_MOVES};
use crate::game::{Color, Game, Move, Position, BOARD_CELLS};
use crate::mcts::{Search, SearchLimits};
use crate::opening::opening_move;

pub struct Agent {
    config: AgentConfig,
    /// Resolved once at construction; worker `k` of every decision
    /// derives its seed from this, so decisions carry no hidden state.
    base_seed: u64,
    rng: StdRng,
    pub(crate) moves_made: u32,
    pub(crate) opening_enabled: bool,
}

impl Agent {
    pub fn new(config: AgentConfig) -> Agent {
        let base_seed = config.seed.unwrap_or_else(|| rand::rng().random());
        Agent {
            config,
            base_seed,
            rng: StdRng::seed_from_u64(base_seed),
            moves_made: 0,
            opening_enabled: true,
        }
    }

    /// Construct from a `key=value` argument string.
    pub fn from_args(args: &str) -> Result<Agent, ConfigError> {
        AgentConfig::parse(args).map(Agent::new)
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn color(&self) -> Color {
        self.config.color
    }

    /// A new game begins: reset the move counter and re-arm the opening
    /// heuristic.
    pub fn open_episode(&mut self, _flag: &str) {
        self.moves_made = 0;
        self.opening_enabled = true;
    }

    /// Nothing to persist between episodes.
    pub fn close_episode(&mut self, _flag: &str) {}

    /// Choose a move on `board`, or `None` when no legal move exists for
    /// this agent's colour (or the configured search mode is unknown).
    pub fn decide<B: Game>(&mut self, board: &B) -> Option<Move> {
        let decision = match &self.config.search {
            SearchMode::Random => self.random_move(board),
            SearchMode::Mcts => self.mcts_move(board),
            SearchMode::Other(_) => None,
        };
        self.moves_made += 1;
        decision
    }

    fn random_move<B: Game>(&mut self, board: &B) -> Option<Move> {
        let mut order: [Position; BOARD_CELLS] = std::array::from_fn(|i| i);
        order.shuffle(&mut self.rng);
        let color = self.config.color;
        order
            .into_iter()
            .map(|pos| Move::new(pos, color))
            .find(|&mov| board.is_legal(mov))
    }

    fn mcts_move<B: Game>(&mut self, board: &B) -> Option<Move> {
        let color = self.config.color;
        if !board.has_legal_move(color) {
            return None;
        }
        if self.opening_enabled && self.moves_made < OPENING_MOVES {
            match opening_move(board, color) {
                Some(pos) if board.is_legal(Move::new(pos, color)) => {
                    debug!(pos, %color, "opening heuristic move");
                    return Some(Move::new(pos, color));
                }
                _ => {
                    // The rule found nothing usable; stay with search for
                    // the rest of the episode.
                    debug!(%color, "opening heuristic disabled");
                    self.opening_enabled = false;
                }
            }
        }
        let limits = SearchLimits {
            budget: self.config.budget,
            playout_cap: self.config.playout_cap,
            ..SearchLimits::default()
        };
        Search::new(color, self.base_seed)
            .threads(self.config.threads)
            .limits(limits)
            .best_move(board)
    }
}
