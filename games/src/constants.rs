//! 游戏常量定义

/// Connect-Four 棋盘高度（行数）
pub const HEIGHT: usize = 6;

/// Connect-Four 棋盘宽度（列数）
pub const WIDTH: usize = 8;

/// 连成一线获胜所需的棋子数
pub const CONNECT: usize = 4;

/// 先手方
pub const FIRST_PLAYER: i8 = 1;

/// 后手方
pub const SECOND_PLAYER: i8 = -1;

/// Pacman 每走一步扣除的分数
pub const TIME_PENALTY: i32 = 1;

/// 吃掉一个豆子的得分
pub const FOOD_SCORE: i32 = 10;

/// 吃光所有豆子的奖励
pub const WIN_SCORE: i32 = 500;

/// 被幽灵抓住的惩罚
pub const LOSE_PENALTY: i32 = 500;
