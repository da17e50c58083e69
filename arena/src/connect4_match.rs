//! Connect-Four 对局
//!
//! MCTS 智能体对随机玩家，或两个 MCTS 智能体对弈。
//! 每个智能体各自持有搜索树，每走一步都把树移到对应子树上继续使用。

use anyhow::Result;
use games::{ConnectFour, TwoPlayerGame, FIRST_PLAYER, SECOND_PLAYER};
use search_ai::{MctsConfig, MctsEngine, SearchTree};
use tracing::{debug, info};

use crate::config::Connect4Settings;
use crate::stats::MatchStats;

/// 持有搜索树的玩家；rollout 次数为 0 时即随机玩家
struct TreePlayer {
    engine: MctsEngine,
    tree: SearchTree<ConnectFour>,
}

impl TreePlayer {
    fn new(config: MctsConfig) -> Result<Self> {
        Ok(Self {
            engine: MctsEngine::new(config)?,
            tree: SearchTree::new(ConnectFour::new()),
        })
    }

    fn is_mcts(&self) -> bool {
        self.engine.config().rollouts > 0
    }

    fn choose(&mut self) -> Result<usize> {
        Ok(self.engine.search(&mut self.tree)?)
    }

    /// 任何一方走子后调用
    fn observe(&mut self, mv: usize) {
        let tree = std::mem::replace(&mut self.tree, SearchTree::new(ConnectFour::new()));
        self.tree = tree.reroot(mv);
    }
}

/// 进行一局对局，返回终局局面
///
/// `game_index` 用于为每局派生不同的随机种子。
pub fn play_game(settings: &Connect4Settings, game_index: u64) -> Result<ConnectFour> {
    let mcts_side = if settings.second {
        SECOND_PLAYER
    } else {
        FIRST_PLAYER
    };
    let mut agent = TreePlayer::new(settings.mcts_config(settings.rollouts, game_index * 2))?;
    let mut opponent = TreePlayer::new(
        settings.mcts_config(settings.rollouts_second_agent, game_index * 2 + 1),
    )?;

    let mut state = ConnectFour::new();
    while !state.is_terminal() {
        let player = if state.turn() == mcts_side {
            &mut agent
        } else {
            &mut opponent
        };

        let mv = player.choose()?;
        if settings.display_board && player.is_mcts() {
            let tree = &player.tree;
            println!("{}", tree.root_state().render_with_ranks(&tree.move_ranks()));
        }
        debug!(turn = state.turn(), column = mv, "move played");

        state = state.play(mv)?;
        agent.observe(mv);
        opponent.observe(mv);
    }

    info!(
        game = game_index,
        outcome = state.terminal_value(),
        moves = state.moves_played(),
        "Connect-Four game finished"
    );
    Ok(state)
}

/// 进行多局对局并统计结果
pub fn run_multiple_games(settings: &Connect4Settings) -> Result<MatchStats> {
    let mut stats = MatchStats::new();
    for i in 0..settings.num_games {
        info!("Game {}", i);
        let state = play_game(settings, u64::from(i))?;
        stats.record_connect4(state.terminal_value());
    }
    Ok(stats)
}

/// 胜负描述
pub fn outcome_message(outcome: i8) -> &'static str {
    match outcome {
        FIRST_PLAYER => "Player 1 wins",
        SECOND_PLAYER => "Player 2 wins",
        _ => "It's a draw",
    }
}

/// 命令行入口
pub fn run_connect4(settings: &Connect4Settings) -> Result<()> {
    if settings.num_games > 1 {
        let stats = run_multiple_games(settings)?;
        println!(
            "Player 1 games won: {}/{}",
            stats.first_player_wins, settings.num_games
        );
        println!("Draws: {}/{}", stats.draws, settings.num_games);
    } else {
        let state = play_game(settings, 0)?;
        println!("{}", state.render());
        println!("{}", outcome_message(state.terminal_value()));
    }
    Ok(())
}
