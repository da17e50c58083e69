//! 博弈搜索引擎
//!
//! 包含:
//! - 蒙特卡洛树搜索 (MCTS)，支持子树复用
//! - Minimax / Alpha-Beta / Expectimax 对抗搜索
//! - Pacman 局面评估函数
//! - 反射型智能体

mod config;
mod error;
mod evaluate;
mod mcts;
mod reflex;
mod search;

pub use config::{AdversarialConfig, MctsConfig, DEFAULT_DEPTH, DEFAULT_UCB_CONST};
pub use error::{Result, SearchError};
pub use evaluate::{
    Evaluation, EvaluatorKind, ScoreEvaluator, ThreatAwareEvaluator, DEFAULT_THREAT_RADIUS,
};
pub use mcts::{MctsEngine, MctsStats, NodeId, SearchNode, SearchTree};
pub use reflex::ReflexAgent;
pub use search::{AdversarialSearch, AdversarialStats, AgentRole, SearchOutcome, SearchPolicy};
