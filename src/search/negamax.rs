//! Negamax with alpha-beta (§4.6). Grounded on the teacher's `negamax` in
//! `src/search.rs` (TT/null-move/killer plumbing), with the teacher's late
//! move reduction removed (not part of this design) and the PV returned
//! directly from each node rather than rebuilt by walking the TT chain.

use shakmaty::{Chess, Color, Move, Position, Role};

use crate::eval::terminal_score;
use crate::fingerprint::Fingerprint;
use crate::ordering;
use crate::position::Position as GambitPosition;
use crate::tt::TTFlag;
use crate::types::{Score, MATE_SCORE, SCORE_INFINITY};

use super::quiescence::quiescence;
use super::Engine;

const NODES_PER_CLOCK_POLL: u64 = 1_000;
const NULL_MOVE_MIN_DEPTH: i32 = 3;
const NULL_MOVE_REDUCTION: i32 = 3;

fn has_rook_or_queen(pos: &Chess, color: Color) -> bool {
    let rooks_and_queens = pos.board().by_role(Role::Rook) | pos.board().by_role(Role::Queen);
    (rooks_and_queens & pos.board().by_color(color)).into_iter().next().is_some()
}

impl Engine {
    /// `negamax(board, depth, alpha, beta, ply, can_null) -> (score, pv)`.
    /// Every recursive call negates the returned score; windows are always
    /// passed in the caller's sign convention.
    pub fn negamax(
        &mut self,
        pos: &Chess,
        depth: i32,
        mut alpha: Score,
        beta: Score,
        ply: u32,
        can_null: bool,
    ) -> (Score, Vec<Move>) {
        if self.stopped {
            return (0, Vec::new());
        }

        self.nodes += 1;
        if self.nodes % NODES_PER_CLOCK_POLL == 0 && self.time_is_up() {
            self.stopped = true;
            return (0, Vec::new());
        }

        if let Some(score) = terminal_score(pos, ply, &self.position_history) {
            return (score, Vec::new());
        }

        if depth <= 0 {
            let score = quiescence(pos, alpha, beta, 0, ply, &self.position_history, &mut self.nodes);
            return (score, Vec::new());
        }
        let depth_u8 = depth as u8;

        let fingerprint = Fingerprint::of(pos);
        if let Some((score, _best_move, pv)) = self.tt.probe(fingerprint, depth_u8, alpha, beta, ply) {
            return (score, pv);
        }

        let in_check = pos.is_check();
        if can_null
            && depth >= NULL_MOVE_MIN_DEPTH
            && !in_check
            && beta.abs() < MATE_SCORE - 1_000
            && has_rook_or_queen(pos, pos.turn())
        {
            if let Some(null_pos) = GambitPosition::new(pos.clone()).null_move() {
                self.position_history.push(fingerprint);
                let (score, _) = self.negamax(
                    null_pos.chess(),
                    depth - NULL_MOVE_REDUCTION,
                    -beta,
                    -beta + 1,
                    ply + 1,
                    false,
                );
                self.position_history.pop();
                let score = -score;

                if score >= beta {
                    self.tt.store(fingerprint, depth_u8, beta, TTFlag::LowerBound, None, Vec::new(), ply);
                    return (beta, Vec::new());
                }
            }
        }

        let hash_move = self.tt.best_move(fingerprint);
        let killers = self.killers.at(ply as usize).clone();
        let moves = ordering::order_moves(pos, hash_move.as_ref(), &killers, &self.history);

        if moves.is_empty() {
            return (0, Vec::new());
        }

        let original_alpha = alpha;
        let mut best_score = -SCORE_INFINITY;
        let mut best_move: Option<Move> = None;
        let mut best_pv: Vec<Move> = Vec::new();

        for scored in moves {
            let mv = scored.mv;
            let Ok(child) = pos.clone().play(&mv) else { continue };

            self.position_history.push(fingerprint);
            let (score, sub_pv) = self.negamax(&child, depth - 1, -beta, -alpha, ply + 1, true);
            self.position_history.pop();
            let score = -score;

            if self.stopped {
                return (0, Vec::new());
            }

            if score > best_score {
                best_score = score;
                best_move = Some(mv.clone());
            }

            if score > alpha {
                alpha = score;
                let mut pv = Vec::with_capacity(sub_pv.len() + 1);
                pv.push(mv.clone());
                pv.extend(sub_pv);
                best_pv = pv;
            }

            if score >= beta {
                if mv.capture().is_none() {
                    self.killers.store(ply as usize, mv.clone());
                    if let Some(from) = mv.from() {
                        self.history.update(pos.turn(), from, mv.to(), depth_u8);
                    }
                }
                self.tt.store(fingerprint, depth_u8, beta, TTFlag::LowerBound, Some(mv), best_pv.clone(), ply);
                return (beta, best_pv);
            }
        }

        let flag = if alpha <= original_alpha {
            TTFlag::UpperBound
        } else {
            TTFlag::Exact
        };
        self.tt.store(fingerprint, depth_u8, alpha, flag, best_move, best_pv.clone(), ply);
        (alpha, best_pv)
    }
}
