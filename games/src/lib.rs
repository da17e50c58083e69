//! 搜索引擎共享的游戏规则库
//!
//! 包含:
//! - 双人 / 多智能体游戏抽象 (TwoPlayerGame, MultiAgentGame)
//! - Connect-Four 棋盘与胜负判定
//! - Pacman 网格游戏与地图布局解析
//! - 棋盘渲染

mod connect4;
mod constants;
mod error;
mod grid;
mod layout;
mod pacman;
mod traits;

pub use connect4::ConnectFour;
pub use constants::*;
pub use error::{GameError, Result};
pub use grid::{Direction, Position};
pub use layout::{Layout, MINIMAX_LAYOUT, SMALL_LAYOUT, TEST_LAYOUT};
pub use pacman::{PacmanState, Status};
pub use traits::{MultiAgentGame, TwoPlayerGame};
