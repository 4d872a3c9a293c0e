//! Fixed-depth alpha-beta search
//!
//! Negamax with alpha-beta pruning over copies of the position. One unit of
//! depth is one change of the side to move: a capture chain keeps the same
//! side on turn for several plies, and those plies are searched at the same
//! depth. A chain is therefore never cut off halfway by the horizon, and a
//! long chain costs no more depth than a single step.
//!
//! # Example
//!
//! ```
//! use dama::board::Side;
//! use dama::rules::Position;
//! use dama::search::Searcher;
//!
//! let mut searcher = Searcher::new();
//! let position = Position::initial(Side::Black);
//!
//! let result = searcher.search(&position, 2);
//! assert!(result.best_move.is_some());
//! ```

use crate::board::Side;
use crate::eval::{evaluate_position, PieceScore};
use crate::rules::{legal_moves, max_captures, Move, Position};

/// Infinity score for alpha-beta bounds
const INF: i32 = PieceScore::WIN + 1;

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// Total beta cutoffs (fail-high)
    pub beta_cutoffs: u64,
    /// Beta cutoffs on the first move tried
    pub first_move_cutoffs: u64,
    /// Plies searched where the same side moved again (chain continuations)
    pub chain_plies: u64,
    /// Deepest ply reached, counting chain continuations
    pub max_ply: u32,
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found, if any
    pub best_move: Option<Move>,
    /// Evaluation score of the best move for the side to move
    pub score: i32,
    /// Depth searched
    pub depth: i8,
    /// Total nodes searched
    pub nodes: u64,
    /// Search diagnostics
    pub stats: SearchStats,
}

/// Alpha-beta searcher. Holds only counters; positions are passed by value.
#[derive(Debug, Default)]
pub struct Searcher {
    nodes: u64,
    stats: SearchStats,
}

impl Searcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick a move for the side to move in `position`.
    ///
    /// Candidates are first narrowed to the moves with the highest capture
    /// count, then each is searched to `depth`. Returns no move when the side
    /// to move has none.
    pub fn search(&mut self, position: &Position, depth: i8) -> SearchResult {
        self.nodes = 0;
        self.stats = SearchStats::default();

        let depth = depth.max(1);
        let moves = legal_moves(position);
        let max = max_captures(&moves);
        let candidates = moves.into_iter().filter(|m| m.total_captures == max);

        let side = position.turn;
        let mut best_move = None;
        let mut best_score = -INF;
        let mut alpha = -INF;

        for mv in candidates {
            let child = position.play(&mv);
            let score = self.child_score(side, &child, depth, alpha, INF, 1);

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(score);
        }

        if best_move.is_none() {
            best_score = -PieceScore::WIN;
        }

        SearchResult {
            best_move,
            score: best_score,
            depth,
            nodes: self.nodes,
            stats: self.stats.clone(),
        }
    }

    /// Score of `child` for `parent_side`. Depth is spent only when the
    /// turn actually passes.
    fn child_score(
        &mut self,
        parent_side: Side,
        child: &Position,
        depth: i8,
        alpha: i32,
        beta: i32,
        ply: u32,
    ) -> i32 {
        if child.turn == parent_side {
            self.stats.chain_plies += 1;
            self.alpha_beta(child, depth, alpha, beta, ply)
        } else {
            -self.alpha_beta(child, depth - 1, -beta, -alpha, ply)
        }
    }

    fn alpha_beta(&mut self, position: &Position, depth: i8, mut alpha: i32, beta: i32, ply: u32) -> i32 {
        self.nodes += 1;
        self.stats.max_ply = self.stats.max_ply.max(ply);

        if depth <= 0 || position.outcome().is_some() {
            return evaluate_position(position, position.turn);
        }

        let moves = legal_moves(position);
        if moves.is_empty() {
            // No stalemate rule: a side that cannot move has lost
            return -PieceScore::WIN;
        }

        let mut best = -INF;
        for (i, mv) in moves.iter().enumerate() {
            let child = position.play(mv);
            let score = self.child_score(position.turn, &child, depth, alpha, beta, ply + 1);

            if score > best {
                best = score;
            }
            alpha = alpha.max(score);
            if alpha >= beta {
                self.stats.beta_cutoffs += 1;
                if i == 0 {
                    self.stats.first_move_cutoffs += 1;
                }
                break;
            }
        }
        best
    }
}
