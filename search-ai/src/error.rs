//! 搜索错误类型

use thiserror::Error;

/// 搜索引擎错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// 配置无效（在搜索开始前拒绝）
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// 根局面已是终局，没有可选走法
    #[error("No legal moves: the root state is terminal")]
    NoLegalMoves,

    /// 未知的评估函数名称
    #[error("Unknown evaluation function: {name}")]
    UnknownEvaluator { name: String },
}

/// 搜索结果类型
pub type Result<T> = std::result::Result<T, SearchError>;
