//! 蒙特卡洛树搜索
//!
//! - `node`：节点统计（访问次数、胜率估计、UCB 权重）
//! - `tree`：基于 Vec 的搜索树，支持回传与子树复用
//! - `engine`：rollout 驱动的搜索引擎

mod engine;
mod node;
mod tree;

pub use engine::{MctsEngine, MctsStats};
pub use node::{NodeId, SearchNode};
pub use tree::SearchTree;
