//! 搜索配置

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};
use crate::evaluate::EvaluatorKind;
use crate::search::SearchPolicy;

/// 默认 UCB 探索常数
pub const DEFAULT_UCB_CONST: f64 = 0.5;

/// 默认搜索深度（轮数）
pub const DEFAULT_DEPTH: u32 = 2;

/// MCTS 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MctsConfig {
    /// 每次决策的 rollout 次数，0 表示随机走子
    pub rollouts: u32,
    /// UCB 探索常数
    pub ucb_const: f64,
    /// 随机数种子，缺省时取系统熵
    pub seed: Option<u64>,
}

impl MctsConfig {
    pub fn new(rollouts: u32) -> Self {
        Self {
            rollouts,
            ..Self::default()
        }
    }

    pub fn with_ucb_const(mut self, ucb_const: f64) -> Self {
        self.ucb_const = ucb_const;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        if !self.ucb_const.is_finite() || self.ucb_const < 0.0 {
            return Err(SearchError::InvalidConfig {
                reason: format!(
                    "ucb_const must be finite and non-negative, got {}",
                    self.ucb_const
                ),
            });
        }
        Ok(())
    }
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            rollouts: 0,
            ucb_const: DEFAULT_UCB_CONST,
            seed: None,
        }
    }
}

/// 对抗搜索配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdversarialConfig {
    /// 搜索深度，按完整轮数计（每个智能体各走一步为一轮）
    pub depth: u32,
    pub policy: SearchPolicy,
    pub evaluator: EvaluatorKind,
}

impl AdversarialConfig {
    pub fn new(policy: SearchPolicy, depth: u32) -> Self {
        Self {
            depth,
            policy,
            ..Self::default()
        }
    }

    pub fn with_evaluator(mut self, evaluator: EvaluatorKind) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        if self.depth == 0 {
            return Err(SearchError::InvalidConfig {
                reason: "depth must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for AdversarialConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            policy: SearchPolicy::Minimax,
            evaluator: EvaluatorKind::Score,
        }
    }
}
