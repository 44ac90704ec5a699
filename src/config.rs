//! # Agent configuration
//!
//! Agents are constructed from `key=value` argument strings in the
//! episode driver's format. Parsing happens once, into a typed record;
//! malformed values are construction-time errors rather than surprises
//! inside the search loop.

use crate::game::Color;
use std::time::Duration;
use thiserror::Error;

/// Characters a `name` must not contain.
const NAME_FORBIDDEN: &str = "[]():; ";

/// How many of the agent's moves may come from the opening heuristic.
pub const OPENING_MOVES: u32 = 8;

/// Default wall-clock budget per decision, in seconds.
const DEFAULT_BUDGET_SECS: f64 = 0.98;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid name: {0:?}")]
    InvalidName(String),
    #[error("invalid role: {0:?}")]
    InvalidRole(String),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Move-selection strategy. Anything other than `Random` or `MCTS` is
/// kept verbatim and makes the agent decline to move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchMode {
    Random,
    Mcts,
    Other(String),
}

/// Typed agent configuration.
#[derive(Clone, Debug)]
pub struct AgentConfig {
    pub name: String,
    pub color: Color,
    pub search: SearchMode,
    /// PRNG seed; entropy-seeded when absent.
    pub seed: Option<u64>,
    /// Per-worker playout cap; unbounded when absent.
    pub playout_cap: Option<u64>,
    /// Root-parallel worker count.
    pub threads: usize,
    /// Wall-clock budget per decision.
    pub budget: Duration,
}

impl AgentConfig {
    /// Parse whitespace-separated `key=value` tokens.
    ///
    /// Recognised keys: `name`, `role`, `search`, `seed`, `simulation`,
    /// `thread`, `budget`. Unknown keys and tokens without `=` are
    /// ignored; later duplicates win.
    pub fn parse(args: &str) -> Result<AgentConfig, ConfigError> {
        let mut name = String::from("unknown");
        let mut role: Option<String> = None;
        let mut search = SearchMode::Mcts;
        let mut seed = None;
        let mut playout_cap = None;
        let mut threads = 1usize;
        let mut budget = Duration::from_secs_f64(DEFAULT_BUDGET_SECS);

        for token in args.split_whitespace() {
            let Some((key, value)) = token.split_once('=') else {
                continue;
            };
            match key {
                "name" => name = value.to_string(),
                "role" => role = Some(value.to_string()),
                "search" => {
                    search = match value {
                        "Random" => SearchMode::Random,
                        "MCTS" => SearchMode::Mcts,
                        other => SearchMode::Other(other.to_string()),
                    }
                }
                "seed" => seed = Some(parse_number("seed", value)?),
                "simulation" => playout_cap = Some(parse_number("simulation", value)?),
                "thread" => {
                    let count: u64 = parse_number("thread", value)?;
                    if count == 0 {
                        return Err(ConfigError::InvalidValue {
                            key: "thread",
                            value: value.to_string(),
                        });
                    }
                    threads = count as usize;
                }
                "budget" => {
                    let secs: f64 = value.parse().map_err(|_| ConfigError::InvalidValue {
                        key: "budget",
                        value: value.to_string(),
                    })?;
                    if !secs.is_finite() || secs <= 0.0 {
                        return Err(ConfigError::InvalidValue {
                            key: "budget",
                            value: value.to_string(),
                        });
                    }
                    budget = Duration::from_secs_f64(secs);
                }
                _ => {}
            }
        }

        if name.chars().any(|c| NAME_FORBIDDEN.contains(c)) {
            return Err(ConfigError::InvalidName(name));
        }
        let color = match role.as_deref() {
            Some("black") => Color::Black,
            Some("white") => Color::White,
            other => return Err(ConfigError::InvalidRole(other.unwrap_or("").to_string())),
        };

        Ok(AgentConfig {
            name,
            color,
            search,
            seed,
            playout_cap,
            threads,
            budget,
        })
    }
}

fn parse_number(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}
