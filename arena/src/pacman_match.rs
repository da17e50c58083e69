//! Pacman 对局
//!
//! Pacman 由对抗搜索或反射型智能体控制，幽灵均匀随机行动。

use anyhow::{Context, Result};
use games::{Direction, Layout, MultiAgentGame, PacmanState, Status};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use search_ai::{AdversarialSearch, EvaluatorKind, ReflexAgent};
use tracing::{debug, info};

use crate::config::PacmanSettings;
use crate::stats::MatchStats;

/// 单局结果
#[derive(Debug, Clone, PartialEq)]
pub struct PacmanResult {
    pub status: Status,
    pub score: i32,
    /// Pacman 走过的步数
    pub moves: u32,
    pub final_state: PacmanState,
}

impl PacmanResult {
    pub fn won(&self) -> bool {
        self.status == Status::Won
    }
}

/// Pacman 控制器
enum Controller {
    Search(AdversarialSearch<EvaluatorKind>),
    Reflex(ReflexAgent<EvaluatorKind>),
}

impl Controller {
    fn new(settings: &PacmanSettings, seed: Option<u64>) -> Result<Self> {
        match settings.adversarial_config() {
            Some(config) => Ok(Controller::Search(AdversarialSearch::from_config(config)?)),
            None => Ok(Controller::Reflex(ReflexAgent::new(settings.eval, seed))),
        }
    }

    fn choose(&mut self, state: &PacmanState) -> Result<Direction> {
        let action = match self {
            Controller::Search(search) => search.search(state)?.action,
            Controller::Reflex(agent) => agent.choose_action(state)?,
        };
        Ok(action)
    }
}

fn rng_from(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// 进行一局对局
///
/// `game_index` 用于为每局派生不同的随机种子。
pub fn play_game(settings: &PacmanSettings, game_index: u64) -> Result<PacmanResult> {
    let layout = Layout::builtin(&settings.layout)
        .with_context(|| format!("加载地图失败: {}", settings.layout))?;
    let seed = settings.seed.map(|s| s.wrapping_add(game_index * 2));
    let mut controller = Controller::new(settings, seed)?;
    let mut ghost_rng = rng_from(settings.seed.map(|s| s.wrapping_add(game_index * 2 + 1)));

    let mut state = PacmanState::new(layout);
    let mut moves = 0;

    while state.status() == Status::Playing && moves < settings.max_moves {
        let action = controller.choose(&state)?;
        state = state.apply(0, action)?;
        moves += 1;
        debug!(action = %action, score = state.score(), "Pacman moved");

        for ghost in 1..state.num_agents() {
            if state.status() != Status::Playing {
                break;
            }
            let actions = state.legal_actions(ghost);
            let Some(&ghost_action) = actions.choose(&mut ghost_rng) else {
                break;
            };
            state = state.apply(ghost, ghost_action)?;
        }
    }

    info!(
        game = game_index,
        status = ?state.status(),
        score = state.score(),
        moves,
        "Pacman game finished"
    );

    Ok(PacmanResult {
        status: state.status(),
        score: state.score(),
        moves,
        final_state: state,
    })
}

/// 进行多局对局并统计结果
pub fn run_multiple_games(settings: &PacmanSettings) -> Result<MatchStats> {
    let mut stats = MatchStats::new();
    for i in 0..settings.num_games {
        info!("Game {}", i);
        let result = play_game(settings, u64::from(i))?;
        stats.record_pacman(result.won(), result.score);
    }
    Ok(stats)
}

/// 命令行入口
pub fn run_pacman(settings: &PacmanSettings) -> Result<()> {
    if settings.num_games > 1 {
        let stats = run_multiple_games(settings)?;
        println!("Pacman games won: {}/{}", stats.pacman_wins, settings.num_games);
        println!("Average score: {:.2}", stats.average_score());
    } else {
        let result = play_game(settings, 0)?;
        println!("{}", result.final_state);
        println!("Score: {}", result.score);
        match result.status {
            Status::Won => println!("Pacman wins"),
            Status::Lost => println!("Pacman loses"),
            Status::Playing => println!("Move limit reached after {} moves", result.moves),
        }
    }
    Ok(())
}
