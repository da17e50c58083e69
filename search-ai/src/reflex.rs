//! 反射型智能体：只看一步，按后继局面的评估分数选择动作

use games::MultiAgentGame;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use crate::error::{Result, SearchError};
use crate::evaluate::Evaluation;

/// 反射型智能体
///
/// 在得分最高的动作之间均匀随机选择。
pub struct ReflexAgent<E> {
    evaluator: E,
    rng: ChaCha8Rng,
}

impl<E> ReflexAgent<E> {
    pub fn new(evaluator: E, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { evaluator, rng }
    }

    /// 为智能体 0 选择动作
    pub fn choose_action<G>(&mut self, state: &G) -> Result<G::Action>
    where
        G: MultiAgentGame,
        E: Evaluation<G>,
    {
        let actions = state.legal_actions(0);
        let scores: Vec<f64> = actions
            .iter()
            .map(|&action| self.evaluator.evaluate(&state.generate_successor(0, action)))
            .collect();

        let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let candidates: Vec<G::Action> = actions
            .iter()
            .zip(&scores)
            .filter(|(_, &score)| score == best)
            .map(|(&action, _)| action)
            .collect();

        let action = candidates
            .choose(&mut self.rng)
            .copied()
            .ok_or(SearchError::NoLegalMoves)?;
        trace!(action = ?action, score = best, candidates = candidates.len(), "reflex choice");
        Ok(action)
    }
}
