//! 错误类型定义

use thiserror::Error;

/// 游戏规则错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    /// 列号越界
    #[error("Invalid column: {column} (width: {width})")]
    InvalidColumn { column: usize, width: usize },

    /// 该列已满
    #[error("Column {column} is full")]
    ColumnFull { column: usize },

    /// 游戏已结束
    #[error("Game is already over")]
    GameOver,

    /// 无效的智能体编号
    #[error("Invalid agent index: {agent} (agents: {num_agents})")]
    InvalidAgent { agent: usize, num_agents: usize },

    /// 非法动作
    #[error("Illegal action {action} for agent {agent}")]
    IllegalAction { agent: usize, action: String },

    /// 无效的地图布局
    #[error("Invalid layout: {reason}")]
    InvalidLayout { reason: String },

    /// 未知的内置地图
    #[error("Unknown layout: {name}")]
    UnknownLayout { name: String },
}

/// 游戏操作结果类型
pub type Result<T> = std::result::Result<T, GameError>;
