//! # Monte-Carlo tree search with RAVE
//!
//! The search runs the classic phases per iteration:
//!
//! 1. **Selection**: descend from the root by blended UCB/RAVE score,
//!    expanding the first unseen legal child of any node on the way.
//! 2. **Simulation**: uniformly random legal moves until the player to
//!    move is stuck (in NoGo the stuck player has lost).
//! 3. **Back-propagation**: the 0/1 outcome feeds the primary and RAVE
//!    counters along the path, plus RAVE side updates on the siblings
//!    matching later same-side moves of the path.
//!
//! Parallelism is at the root: each worker thread builds an independent
//! tree on its own arena and RNG, and the final choice maximises the sum
//! of per-thread blended child values. Workers share nothing, so the hot
//! loop takes no locks; results are combined only after the pool joins.
//!
//! ## Key parameters
//!
//! - `RAVE_BIAS` (0.025): the `b` in the RAVE blending weight `beta`.
//! - Exploration term: `sqrt(2 * log10(parent.count) / child.count)`,
//!   added for the searcher's own nodes and subtracted for the
//!   opponent's, whose best child is the score minimiser.
//! - Budget: 0.98 s wall clock per decision; an optional playout cap and
//!   arena exhaustion end the loop early.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::arena::{ArenaExhausted, NodeArena, NodeId};
use crate::game::{Color, Game, Move, Position, BOARD_CELLS};

/// The `b` constant in the RAVE weight formula.
pub const RAVE_BIAS: f64 = 0.025;

/// Default wall-clock budget per decision.
pub const DEFAULT_BUDGET: Duration = Duration::from_millis(980);

/// Default per-worker arena size; sized so a budgeted search on a 9x9
/// board does not exhaust it.
pub const DEFAULT_ARENA_CAPACITY: usize = 50_000;

/// Longest possible descent: one entry per cell, plus the slot the
/// terminal probe would have written.
const MAX_PATH: usize = BOARD_CELLS + 1;

// ============================================================================
// SELECTION FORMULA
// ============================================================================

/// RAVE blending weight; approaches 0 as the primary count grows.
#[inline]
pub(crate) fn beta(count: u32, rave_count: u32) -> f64 {
    let n = count as f64;
    let rn = rave_count as f64;
    rn / (rn + n + 4.0 * rn * n * RAVE_BIAS * RAVE_BIAS)
}

/// `(1 - beta) * q + beta * q_rave` for a node's statistics.
///
/// Callers guarantee `count >= 1` and `rave_count >= 1`: children are
/// born with both at 1 and the counters only grow.
#[inline]
pub(crate) fn blended_value(count: u32, val: u32, rave_count: u32, rave_val: u32) -> f64 {
    let q = val as f64 / count as f64;
    let q_rave = rave_val as f64 / rave_count as f64;
    let b = beta(count, rave_count);
    (1.0 - b) * q + b * q_rave
}

// ============================================================================
// SEARCH PHASES
// ============================================================================

/// One selection step at `parent`.
///
/// Visits candidate positions in the freshly shuffled order of `perm`,
/// so ties between equal scores break uniformly at random. The first
/// legal move without a child node is taken immediately (expansion
/// before re-selection). Returns `true` when `parent`'s player has no
/// legal move, leaving `board` and `path` untouched; otherwise records
/// the chosen position in `path[depth]` and plays it on `board`.
pub(crate) fn select<B: Game, R: Rng>(
    arena: &NodeArena,
    parent: NodeId,
    board: &mut B,
    searcher: Color,
    path: &mut [Position],
    depth: usize,
    perm: &mut [Position; BOARD_CELLS],
    rng: &mut R,
) -> bool {
    perm.shuffle(rng);
    let node = arena.get(parent);
    let same = node.color == searcher;
    // Sentinels outside the reachable score range, so the first scored
    // candidate always becomes the incumbent.
    let mut best_score = if same { -1.0 } else { 1.2e30 };
    let mut best_pos: Option<Position> = None;
    for &pos in perm.iter() {
        if !board.is_legal(Move::new(pos, node.color)) {
            continue;
        }
        let Some(child_id) = node.child_at(pos) else {
            best_pos = Some(pos);
            break;
        };
        let child = arena.get(child_id);
        let explore = (2.0 * (node.count as f64).log10() / child.count as f64).sqrt();
        let value = blended_value(child.count, child.val, child.rave_count, child.rave_val);
        let score = if same { value + explore } else { value - explore };
        let better = if same { score > best_score } else { score < best_score };
        if better {
            best_score = score;
            best_pos = Some(pos);
        }
    }
    let Some(pos) = best_pos else {
        return true;
    };
    path[depth] = pos;
    board.set(pos, node.color);
    board.advance_turn();
    false
}

/// Random playout to the end of the game.
///
/// Alternates uniformly random legal moves until the player to move is
/// stuck. Terminates within 81 plies because every move fills a cell.
/// Returns 1 when the stuck player is not `searcher` (a win), else 0.
pub(crate) fn playout<B: Game, R: Rng>(
    board: &mut B,
    searcher: Color,
    perm: &mut [Position; BOARD_CELLS],
    rng: &mut R,
) -> u32 {
    let mut to_play = board.to_move();
    loop {
        perm.shuffle(rng);
        let Some(&pos) = perm
            .iter()
            .find(|&&pos| board.is_legal(Move::new(pos, to_play)))
        else {
            break;
        };
        board.set(pos, to_play);
        board.advance_turn();
        to_play = to_play.opponent();
    }
    u32::from(to_play != searcher)
}

/// Propagate `outcome` along the descent path and grow the tree.
///
/// `len` counts selection steps; when the descent ended at a terminal
/// position the final step recorded no move and is dropped. Every path
/// node gets the outcome added to both its primary and RAVE counters,
/// and the RAVE side update credits `child[path[j]]` for the later
/// same-side moves `j = i + 2, i + 4, ...` where that sibling already
/// exists. A non-terminal descent ends by allocating the leaf it stopped
/// at, seeded with the outcome as its first visit.
pub(crate) fn update(
    arena: &mut NodeArena,
    root: NodeId,
    outcome: u32,
    len: usize,
    terminal: bool,
    path: &[Position],
) -> Result<(), ArenaExhausted> {
    let len = len - usize::from(terminal);
    let mut cur = root;
    let mut last = root;
    for i in 0..len {
        let mut j = i + 2;
        while j < len {
            if let Some(sibling) = arena.get(cur).child_at(path[j]) {
                let node = arena.get_mut(sibling);
                node.rave_val += outcome;
                node.rave_count += 1;
            }
            j += 2;
        }
        let node = arena.get_mut(cur);
        node.val += outcome;
        node.count += 1;
        node.rave_val += outcome;
        node.rave_count += 1;
        last = cur;
        // Absent only at the expansion step, which is always the last.
        if let Some(next) = arena.get(cur).child_at(path[i]) {
            cur = next;
        }
    }
    if !terminal {
        let color = arena.get(last).color.opponent();
        let leaf = arena.alloc(color)?;
        let node = arena.get_mut(leaf);
        node.val = outcome;
        node.rave_val = outcome;
        node.count = 1;
        node.rave_count = 1;
        arena.get_mut(last).child[path[len - 1]] = Some(leaf);
    }
    Ok(())
}

// ============================================================================
// PER-THREAD SEARCHER
// ============================================================================

/// Bounds on one worker's search loop.
#[derive(Clone, Copy, Debug)]
pub struct SearchLimits {
    /// Wall-clock budget, checked at the loop head.
    pub budget: Duration,
    /// Optional cap on iterations (playouts) per worker.
    pub playout_cap: Option<u64>,
    /// Node slots per worker arena.
    pub arena_capacity: usize,
}

impl Default for SearchLimits {
    fn default() -> SearchLimits {
        SearchLimits {
            budget: DEFAULT_BUDGET,
            playout_cap: None,
            arena_capacity: DEFAULT_ARENA_CAPACITY,
        }
    }
}

/// What one worker hands back for aggregation.
#[derive(Clone, Debug)]
pub struct RootSummary {
    /// Blended value per root child, `None` where never expanded.
    pub scores: [Option<f64>; BOARD_CELLS],
    /// Iterations completed.
    pub playouts: u64,
    /// Nodes allocated.
    pub nodes: usize,
    /// Whether the arena soft-stopped the search.
    pub exhausted: bool,
}

impl Default for RootSummary {
    fn default() -> RootSummary {
        RootSummary {
            scores: [None; BOARD_CELLS],
            playouts: 0,
            nodes: 0,
            exhausted: false,
        }
    }
}

/// Run one independent search tree and summarise its root.
pub(crate) fn run_worker<B: Game>(
    board: &B,
    searcher: Color,
    seed: u64,
    limits: &SearchLimits,
) -> RootSummary {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut arena = NodeArena::with_capacity(limits.arena_capacity);
    let mut perm: [Position; BOARD_CELLS] = std::array::from_fn(|i| i);

    let Ok(root) = arena.alloc(searcher) else {
        return RootSummary::default();
    };
    {
        // Sentinel counters: val = rave_val = 1 with count = rave_count = 0,
        // so the root's first real update brings count to 1 and keeps
        // log10(parent.count) in the selection formula well-defined.
        let node = arena.get_mut(root);
        node.val = 1;
        node.rave_val = 1;
    }

    let start = Instant::now();
    let mut playouts = 0u64;
    let mut exhausted = false;
    while start.elapsed() < limits.budget
        && limits.playout_cap.is_none_or(|cap| playouts < cap)
    {
        let mut scratch = *board;
        let mut path = [0; MAX_PATH];
        let mut depth = 0;
        let mut node = root;
        let terminal;
        loop {
            let ended = select(
                &arena,
                node,
                &mut scratch,
                searcher,
                &mut path,
                depth,
                &mut perm,
                &mut rng,
            );
            depth += 1;
            if ended {
                terminal = true;
                break;
            }
            match arena.get(node).child_at(path[depth - 1]) {
                Some(next) => node = next,
                None => {
                    terminal = false;
                    break;
                }
            }
        }
        let outcome = if terminal {
            // The player to move at the terminal board is stuck and has
            // lost; no playout needed.
            u32::from(scratch.to_move() != searcher)
        } else {
            playout(&mut scratch, searcher, &mut perm, &mut rng)
        };
        playouts += 1;
        if update(&mut arena, root, outcome, depth, terminal, &path).is_err() {
            exhausted = true;
            break;
        }
    }

    let mut scores = [None; BOARD_CELLS];
    let root_node = arena.get(root);
    for (pos, slot) in scores.iter_mut().enumerate() {
        if let Some(id) = root_node.child_at(pos) {
            let child = arena.get(id);
            *slot = Some(blended_value(
                child.count,
                child.val,
                child.rave_count,
                child.rave_val,
            ));
        }
    }
    RootSummary {
        scores,
        playouts,
        nodes: arena.len(),
        exhausted,
    }
}

// ============================================================================
// ROOT-PARALLEL DRIVER
// ============================================================================

/// Root-parallel MCTS over independent per-thread trees.
///
/// Worker `k` seeds its RNG with `seed + k`, so a fixed seed and a
/// single thread make the whole decision reproducible. Nothing persists
/// between calls to [`Search::best_move`].
#[derive(Clone, Debug)]
pub struct Search {
    color: Color,
    seed: u64,
    threads: usize,
    limits: SearchLimits,
}

impl Search {
    pub fn new(color: Color, seed: u64) -> Search {
        Search {
            color,
            seed,
            threads: 1,
            limits: SearchLimits::default(),
        }
    }

    /// Number of root-parallel workers (at least 1).
    pub fn threads(mut self, threads: usize) -> Search {
        self.threads = threads.max(1);
        self
    }

    pub fn limits(mut self, limits: SearchLimits) -> Search {
        self.limits = limits;
        self
    }

    /// Pick a move for the configured colour, or `None` when that colour
    /// has no legal move.
    pub fn best_move<B: Game>(&self, board: &B) -> Option<Move> {
        if !board.has_legal_move(self.color) {
            return None;
        }
        let started = Instant::now();
        let summaries = self.run_workers(board);
        for (worker, summary) in summaries.iter().enumerate() {
            if summary.exhausted {
                warn!(
                    worker,
                    nodes = summary.nodes,
                    "arena exhausted, search stopped early"
                );
            }
            debug!(
                worker,
                playouts = summary.playouts,
                nodes = summary.nodes,
                "worker finished"
            );
        }
        let pos = aggregate(board, self.color, &summaries)?;
        info!(
            pos,
            color = %self.color,
            threads = self.threads,
            playouts = summaries.iter().map(|s| s.playouts).sum::<u64>(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "search decided"
        );
        Some(Move::new(pos, self.color))
    }

    fn run_workers<B: Game>(&self, board: &B) -> Vec<RootSummary> {
        if self.threads == 1 {
            return vec![run_worker(board, self.color, self.seed, &self.limits)];
        }
        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()
        {
            Ok(pool) => pool,
            Err(err) => {
                warn!(%err, "thread pool unavailable, searching sequentially");
                return (0..self.threads)
                    .map(|k| {
                        run_worker(board, self.color, self.seed.wrapping_add(k as u64), &self.limits)
                    })
                    .collect();
            }
        };
        pool.install(|| {
            (0..self.threads)
                .into_par_iter()
                .map(|k| {
                    run_worker(board, self.color, self.seed.wrapping_add(k as u64), &self.limits)
                })
                .collect()
        })
    }
}

/// Sum each root child's blended value across workers and take the
/// best-scoring legal position, ties to the smallest index. Positions no
/// worker expanded keep a -1 sentinel and lose to any real contribution.
pub(crate) fn aggregate<B: Game>(
    board: &B,
    color: Color,
    summaries: &[RootSummary],
) -> Option<Position> {
    let mut sums: [Option<f64>; BOARD_CELLS] = [None; BOARD_CELLS];
    for summary in summaries {
        for (pos, score) in summary.scores.iter().enumerate() {
            if let Some(value) = score {
                sums[pos] = Some(sums[pos].unwrap_or(0.0) + value);
            }
        }
    }
    let mut best: Option<(Position, f64)> = None;
    for (pos, sum) in sums.iter().enumerate() {
        if !board.is_legal(Move::new(pos, color)) {
            continue;
        }
        let score = sum.unwrap_or(-1.0);
        if best.is_none_or(|(_, incumbent)| score > incumbent) {
            best = Some((pos, score));
        }
    }
    best.map(|(pos, _)| pos)
}
