//! 局面评估函数
//!
//! 对抗搜索在截断深度和终局处调用评估函数，分数越高对最大化方越有利。
//! 评估函数在每个叶子上都会被调用，必须足够廉价。

use std::fmt;
use std::str::FromStr;

use games::PacmanState;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// 默认威胁半径：幽灵在此曼哈顿距离内才计入评估
pub const DEFAULT_THREAT_RADIUS: usize = 3;

/// 评估函数
pub trait Evaluation<S> {
    fn evaluate(&self, state: &S) -> f64;
}

impl<S, F> Evaluation<S> for F
where
    F: Fn(&S) -> f64,
{
    fn evaluate(&self, state: &S) -> f64 {
        self(state)
    }
}

/// 直接使用游戏得分
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEvaluator;

impl Evaluation<PacmanState> for ScoreEvaluator {
    fn evaluate(&self, state: &PacmanState) -> f64 {
        state.score() as f64
    }
}

/// 得分减去最近豆子的距离；幽灵进入威胁半径后，再减去最近幽灵的距离
#[derive(Debug, Clone, Copy)]
pub struct ThreatAwareEvaluator {
    pub threat_radius: usize,
}

impl Default for ThreatAwareEvaluator {
    fn default() -> Self {
        Self {
            threat_radius: DEFAULT_THREAT_RADIUS,
        }
    }
}

impl Evaluation<PacmanState> for ThreatAwareEvaluator {
    fn evaluate(&self, state: &PacmanState) -> f64 {
        let pacman = state.pacman_position();

        let food_distance = state
            .food()
            .iter()
            .map(|food| pacman.manhattan(*food))
            .min()
            .unwrap_or(0);

        let ghost_distance = state
            .ghost_positions()
            .iter()
            .map(|ghost| pacman.manhattan(*ghost))
            .min();

        let mut score = state.score() as f64 - food_distance as f64;
        if let Some(distance) = ghost_distance {
            if distance <= self.threat_radius {
                score -= distance as f64;
            }
        }
        score
    }
}

/// 按名称选择的 Pacman 评估函数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluatorKind {
    /// 游戏得分
    #[default]
    Score,
    /// 兼顾豆子与威胁距离
    Better,
}

impl Evaluation<PacmanState> for EvaluatorKind {
    fn evaluate(&self, state: &PacmanState) -> f64 {
        match self {
            EvaluatorKind::Score => ScoreEvaluator.evaluate(state),
            EvaluatorKind::Better => ThreatAwareEvaluator::default().evaluate(state),
        }
    }
}

impl FromStr for EvaluatorKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "score" => Ok(EvaluatorKind::Score),
            "better" => Ok(EvaluatorKind::Better),
            _ => Err(SearchError::UnknownEvaluator {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for EvaluatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluatorKind::Score => write!(f, "score"),
            EvaluatorKind::Better => write!(f, "better"),
        }
    }
}
