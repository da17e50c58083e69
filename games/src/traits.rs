//! 搜索引擎使用的游戏抽象
//!
//! - [`TwoPlayerGame`]：双人轮流走子（Connect-Four 约定），供 MCTS 使用
//! - [`MultiAgentGame`]：一个最大化方加若干对手（Pacman 约定），供对抗搜索使用

use std::fmt::Debug;
use std::hash::Hash;

/// 双人零和游戏
///
/// 所有方法都不修改当前状态，`successor` 返回新状态。
pub trait TwoPlayerGame: Clone {
    /// 走法类型
    type Move: Copy + Eq + Hash + Debug;

    /// 当前局面的所有合法走法（非终局时不为空）
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// 走出 `mv` 之后的局面
    ///
    /// `mv` 必须来自 `legal_moves`，否则属于调用方违约，直接 panic。
    fn successor(&self, mv: Self::Move) -> Self;

    /// 是否终局（有人获胜或无子可走）
    fn is_terminal(&self) -> bool;

    /// 终局结果：+1 先手胜，-1 后手胜，0 和棋或未分胜负
    fn terminal_value(&self) -> i8;

    /// 当前走子方：+1 先手，-1 后手
    fn turn(&self) -> i8;

    /// 局面的规范键，相同局面的键相同
    fn key(&self) -> String;
}

/// 多智能体游戏
///
/// 智能体 0 为最大化方，其余智能体按编号轮流行动。
pub trait MultiAgentGame: Clone {
    /// 动作类型
    type Action: Copy + Eq + Debug;

    /// 智能体数量（含最大化方）
    fn num_agents(&self) -> usize;

    /// 指定智能体的合法动作
    fn legal_actions(&self, agent: usize) -> Vec<Self::Action>;

    /// 指定智能体执行动作后的局面
    ///
    /// `action` 必须来自 `legal_actions(agent)`，否则直接 panic。
    fn generate_successor(&self, agent: usize, action: Self::Action) -> Self;

    /// 最大化方是否已获胜
    fn is_win(&self) -> bool;

    /// 最大化方是否已失败
    fn is_lose(&self) -> bool;
}
