//! 命令行参数

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use search_ai::EvaluatorKind;

use crate::config::{Connect4Settings, PacmanAgent, PacmanSettings};

#[derive(Parser, Debug)]
#[command(name = "arena", about = "Run search agents against each other")]
pub struct Cli {
    /// JSON config file; explicit flags override its values
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play Connect-Four with an MCTS agent
    Connect4(Connect4Args),
    /// Play Pacman with a search agent against random ghosts
    Pacman(PacmanArgs),
}

#[derive(Args, Debug, Default)]
pub struct Connect4Args {
    /// Root-to-leaf play-throughs per MCTS move (0 plays randomly)
    #[arg(long)]
    pub rollouts: Option<u32>,

    /// Number of games to play
    #[arg(long)]
    pub num_games: Option<u32>,

    /// The MCTS agent moves second
    #[arg(long)]
    pub second: bool,

    /// Show the board with MCTS move rankings at each MCTS turn
    #[arg(long)]
    pub display_board: bool,

    /// If non-zero, the opponent is also MCTS with this many rollouts
    #[arg(long)]
    pub rollouts_second_agent: Option<u32>,

    /// UCB exploration constant
    #[arg(long)]
    pub ucb_const: Option<f64>,

    /// Random seed for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Connect4Args {
    /// 用命令行中显式给出的参数覆盖配置
    pub fn apply(&self, mut settings: Connect4Settings) -> Connect4Settings {
        if let Some(rollouts) = self.rollouts {
            settings.rollouts = rollouts;
        }
        if let Some(num_games) = self.num_games {
            settings.num_games = num_games;
        }
        if self.second {
            settings.second = true;
        }
        if self.display_board {
            settings.display_board = true;
        }
        if let Some(rollouts) = self.rollouts_second_agent {
            settings.rollouts_second_agent = rollouts;
        }
        if let Some(ucb_const) = self.ucb_const {
            settings.ucb_const = ucb_const;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        settings
    }
}

#[derive(Args, Debug, Default)]
pub struct PacmanArgs {
    /// Pacman agent
    #[arg(long, value_enum)]
    pub agent: Option<PacmanAgent>,

    /// Search depth in full rounds
    #[arg(long)]
    pub depth: Option<u32>,

    /// Evaluation function (score or better)
    #[arg(long)]
    pub eval: Option<EvaluatorKind>,

    /// Built-in layout name (test, small, minimax)
    #[arg(long)]
    pub layout: Option<String>,

    /// Number of games to play
    #[arg(long)]
    pub num_games: Option<u32>,

    /// Random seed for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop a game after this many Pacman moves
    #[arg(long)]
    pub max_moves: Option<u32>,
}

impl PacmanArgs {
    /// 用命令行中显式给出的参数覆盖配置
    pub fn apply(&self, mut settings: PacmanSettings) -> PacmanSettings {
        if let Some(agent) = self.agent {
            settings.agent = agent;
        }
        if let Some(depth) = self.depth {
            settings.depth = depth;
        }
        if let Some(eval) = self.eval {
            settings.eval = eval;
        }
        if let Some(layout) = &self.layout {
            settings.layout = layout.clone();
        }
        if let Some(num_games) = self.num_games {
            settings.num_games = num_games;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        if let Some(max_moves) = self.max_moves {
            settings.max_moves = max_moves;
        }
        settings
    }
}
