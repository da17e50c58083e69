//! 搜索智能体对局程序
//!
//! 包含:
//! - 命令行与配置文件
//! - Connect-Four 对局（MCTS 对随机或 MCTS）
//! - Pacman 对局（对抗搜索或反射型智能体对随机幽灵）
//! - 对局统计

pub mod cli;
pub mod config;
pub mod connect4_match;
pub mod pacman_match;
pub mod stats;

use anyhow::Result;

pub use cli::{Cli, Command, Connect4Args, PacmanArgs};
pub use config::{ArenaConfig, Connect4Settings, PacmanAgent, PacmanSettings};
pub use connect4_match::{play_game as play_connect4, run_connect4};
pub use pacman_match::{play_game as play_pacman, run_pacman, PacmanResult};
pub use stats::MatchStats;

/// 按子命令运行对局
pub fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ArenaConfig::load(path)?,
        None => ArenaConfig::default(),
    };

    match cli.command {
        Command::Connect4(args) => {
            let settings = args.apply(config.connect4);
            run_connect4(&settings)
        }
        Command::Pacman(args) => {
            let settings = args.apply(config.pacman);
            run_pacman(&settings)
        }
    }
}
