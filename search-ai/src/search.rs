//! 对抗搜索引擎
//!
//! Minimax、Alpha-Beta 剪枝与 Expectimax 共用同一套递归：
//! 智能体 0 取最大值，其余智能体按策略取最小值或均值。
//! 深度按完整轮数计，到达深度上限且轮到智能体 0 时用评估函数截断。

use games::MultiAgentGame;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AdversarialConfig;
use crate::error::{Result, SearchError};
use crate::evaluate::{Evaluation, EvaluatorKind};

/// 搜索策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchPolicy {
    /// 对手取最小值
    #[default]
    Minimax,
    /// 与 Minimax 结果相同，但剪去无关分支
    AlphaBeta,
    /// 对手均匀随机行动，取子节点均值
    Expectimax,
}

impl SearchPolicy {
    /// 指定智能体在该策略下的角色
    pub fn role(&self, agent: usize) -> AgentRole {
        if agent == 0 {
            return AgentRole::Maximizer;
        }
        match self {
            SearchPolicy::Minimax | SearchPolicy::AlphaBeta => AgentRole::Minimizer,
            SearchPolicy::Expectimax => AgentRole::Chance,
        }
    }
}

/// 智能体角色，决定子节点分数的聚合方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentRole {
    Maximizer,
    Minimizer,
    Chance,
}

/// 搜索结果
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome<A> {
    pub action: A,
    pub score: f64,
}

/// 单次搜索的统计信息
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdversarialStats {
    /// 访问的节点数
    pub nodes: u64,
    /// 评估函数调用次数
    pub evaluations: u64,
}

/// 对抗搜索引擎
pub struct AdversarialSearch<E> {
    config: AdversarialConfig,
    evaluator: E,
    stats: AdversarialStats,
}

impl AdversarialSearch<EvaluatorKind> {
    /// 使用配置中指定的 Pacman 评估函数
    pub fn from_config(config: AdversarialConfig) -> Result<Self> {
        let evaluator = config.evaluator;
        Self::new(config, evaluator)
    }
}

impl<E> AdversarialSearch<E> {
    /// 创建引擎，配置无效时返回错误
    pub fn new(config: AdversarialConfig, evaluator: E) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            evaluator,
            stats: AdversarialStats::default(),
        })
    }

    pub fn config(&self) -> &AdversarialConfig {
        &self.config
    }

    /// 最近一次搜索的统计
    pub fn stats(&self) -> AdversarialStats {
        self.stats
    }

    /// 为最大化方（智能体 0）选择动作
    pub fn search<G>(&mut self, state: &G) -> Result<SearchOutcome<G::Action>>
    where
        G: MultiAgentGame,
        E: Evaluation<G>,
    {
        self.stats = AdversarialStats::default();

        if state.is_win() || state.is_lose() {
            return Err(SearchError::NoLegalMoves);
        }

        let (action, score) = self.value(state, 0, 0, f64::NEG_INFINITY, f64::INFINITY);
        let action = action.ok_or(SearchError::NoLegalMoves)?;

        debug!(
            policy = ?self.config.policy,
            depth = self.config.depth,
            nodes = self.stats.nodes,
            evaluations = self.stats.evaluations,
            action = ?action,
            score,
            "adversarial search finished"
        );

        Ok(SearchOutcome { action, score })
    }

    /// 递归求值，返回 (动作, 分数)
    ///
    /// 机会节点不对应具体动作，返回 None。Alpha-Beta 剪枝时返回的分数可能只是界。
    fn value<G>(
        &mut self,
        state: &G,
        depth: u32,
        agent: usize,
        mut alpha: f64,
        mut beta: f64,
    ) -> (Option<G::Action>, f64)
    where
        G: MultiAgentGame,
        E: Evaluation<G>,
    {
        self.stats.nodes += 1;

        // 终局
        if state.is_win() || state.is_lose() {
            return (None, self.evaluate(state));
        }

        // 到达深度上限
        if depth == self.config.depth && agent == 0 {
            return (None, self.evaluate(state));
        }

        let actions = state.legal_actions(agent);
        assert!(!actions.is_empty(), "agent {agent} has no legal actions in a non-terminal state");

        let (next_agent, next_depth) = if agent + 1 == state.num_agents() {
            (0, depth + 1)
        } else {
            (agent + 1, depth)
        };

        let role = self.config.policy.role(agent);
        let pruning = self.config.policy == SearchPolicy::AlphaBeta;
        let mut running = match role {
            AgentRole::Maximizer => f64::NEG_INFINITY,
            _ => f64::INFINITY,
        };
        let mut scores = Vec::with_capacity(actions.len());

        for &action in &actions {
            let successor = state.generate_successor(agent, action);
            let (_, score) = self.value(&successor, next_depth, next_agent, alpha, beta);
            scores.push(score);

            if !pruning {
                continue;
            }
            match role {
                AgentRole::Maximizer => {
                    running = running.max(score);
                    if running > beta {
                        return (Some(action), running);
                    }
                    alpha = alpha.max(running);
                }
                AgentRole::Minimizer => {
                    running = running.min(score);
                    if running < alpha {
                        return (Some(action), running);
                    }
                    beta = beta.min(running);
                }
                AgentRole::Chance => {}
            }
        }

        match role {
            AgentRole::Maximizer => {
                let index = first_extremum(&scores, |a, b| a > b);
                (Some(actions[index]), scores[index])
            }
            AgentRole::Minimizer => {
                let index = first_extremum(&scores, |a, b| a < b);
                (Some(actions[index]), scores[index])
            }
            AgentRole::Chance => {
                let mean = scores.iter().sum::<f64>() / scores.len() as f64;
                (None, mean)
            }
        }
    }

    fn evaluate<G>(&mut self, state: &G) -> f64
    where
        E: Evaluation<G>,
    {
        self.stats.evaluations += 1;
        self.evaluator.evaluate(state)
    }
}

/// 第一个极值的下标；`better(a, b)` 为真表示 a 严格优于 b
fn first_extremum(scores: &[f64], better: impl Fn(f64, f64) -> bool) -> usize {
    let mut best = 0;
    for (i, &score) in scores.iter().enumerate().skip(1) {
        if better(score, scores[best]) {
            best = i;
        }
    }
    best
}
