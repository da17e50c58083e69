//! 对局配置
//!
//! 配置文件为 JSON，缺省字段取默认值；命令行参数覆盖文件中的值。

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use search_ai::{
    AdversarialConfig, EvaluatorKind, MctsConfig, SearchPolicy, DEFAULT_DEPTH, DEFAULT_UCB_CONST,
};
use serde::{Deserialize, Serialize};

/// 默认 Pacman 地图
pub const DEFAULT_LAYOUT: &str = "test";

/// 单局 Pacman 的默认步数上限
pub const DEFAULT_MAX_MOVES: u32 = 500;

/// 配置文件内容
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub connect4: Connect4Settings,
    pub pacman: PacmanSettings,
}

impl ArenaConfig {
    /// 从 JSON 文件加载配置
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {:?}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("解析配置文件失败: {:?}", path))
    }
}

/// Connect-Four 对局设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Connect4Settings {
    /// MCTS 智能体的 rollout 次数，0 为随机走子
    pub rollouts: u32,
    pub num_games: u32,
    /// MCTS 智能体后手
    pub second: bool,
    /// 每次 MCTS 决策后打印带名次的棋盘
    pub display_board: bool,
    /// 非 0 时对手也是 MCTS 智能体
    pub rollouts_second_agent: u32,
    pub ucb_const: f64,
    pub seed: Option<u64>,
}

impl Connect4Settings {
    /// 指定 rollout 次数与种子偏移的 MCTS 配置
    pub fn mcts_config(&self, rollouts: u32, seed_offset: u64) -> MctsConfig {
        let config = MctsConfig::new(rollouts).with_ucb_const(self.ucb_const);
        match self.seed {
            Some(seed) => config.with_seed(seed.wrapping_add(seed_offset)),
            None => config,
        }
    }
}

impl Default for Connect4Settings {
    fn default() -> Self {
        Self {
            rollouts: 0,
            num_games: 1,
            second: false,
            display_board: false,
            rollouts_second_agent: 0,
            ucb_const: DEFAULT_UCB_CONST,
            seed: None,
        }
    }
}

/// Pacman 智能体类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PacmanAgent {
    #[default]
    Minimax,
    #[value(name = "alphabeta")]
    AlphaBeta,
    Expectimax,
    Reflex,
}

impl PacmanAgent {
    /// 对应的搜索策略，反射型智能体没有
    pub fn policy(&self) -> Option<SearchPolicy> {
        match self {
            PacmanAgent::Minimax => Some(SearchPolicy::Minimax),
            PacmanAgent::AlphaBeta => Some(SearchPolicy::AlphaBeta),
            PacmanAgent::Expectimax => Some(SearchPolicy::Expectimax),
            PacmanAgent::Reflex => None,
        }
    }
}

/// Pacman 对局设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacmanSettings {
    pub agent: PacmanAgent,
    pub depth: u32,
    pub eval: EvaluatorKind,
    /// 内置地图名称
    pub layout: String,
    pub num_games: u32,
    pub seed: Option<u64>,
    /// 超过该步数仍未分出胜负则结束
    pub max_moves: u32,
}

impl PacmanSettings {
    /// 对抗搜索配置；反射型智能体返回 None
    pub fn adversarial_config(&self) -> Option<AdversarialConfig> {
        self.agent
            .policy()
            .map(|policy| AdversarialConfig::new(policy, self.depth).with_evaluator(self.eval))
    }
}

impl Default for PacmanSettings {
    fn default() -> Self {
        Self {
            agent: PacmanAgent::default(),
            depth: DEFAULT_DEPTH,
            eval: EvaluatorKind::default(),
            layout: DEFAULT_LAYOUT.to_string(),
            num_games: 1,
            seed: None,
            max_moves: DEFAULT_MAX_MOVES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_partial_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "connect4": {{ "rollouts": 250, "second": true }},
                "pacman": {{ "agent": "alphabeta", "eval": "better", "depth": 3 }}
            }}"#
        )
        .unwrap();

        let config = ArenaConfig::load(file.path()).unwrap();
        assert_eq!(config.connect4.rollouts, 250);
        assert!(config.connect4.second);
        assert_eq!(config.connect4.num_games, 1);
        assert_eq!(config.connect4.ucb_const, DEFAULT_UCB_CONST);

        assert_eq!(config.pacman.agent, PacmanAgent::AlphaBeta);
        assert_eq!(config.pacman.eval, EvaluatorKind::Better);
        assert_eq!(config.pacman.depth, 3);
        assert_eq!(config.pacman.layout, DEFAULT_LAYOUT);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ArenaConfig::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("读取配置文件失败"));
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = ArenaConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("解析配置文件失败"));
    }

    #[test]
    fn test_mcts_config_seed_offset() {
        let settings = Connect4Settings {
            seed: Some(10),
            ucb_const: 1.5,
            ..Connect4Settings::default()
        };
        let config = settings.mcts_config(100, 3);
        assert_eq!(config.rollouts, 100);
        assert_eq!(config.ucb_const, 1.5);
        assert_eq!(config.seed, Some(13));

        let unseeded = Connect4Settings::default().mcts_config(5, 3);
        assert!(unseeded.seed.is_none());
    }

    #[test]
    fn test_reflex_has_no_adversarial_config() {
        let settings = PacmanSettings {
            agent: PacmanAgent::Reflex,
            ..PacmanSettings::default()
        };
        assert!(settings.adversarial_config().is_none());

        let settings = PacmanSettings {
            agent: PacmanAgent::Expectimax,
            depth: 4,
            ..PacmanSettings::default()
        };
        let config = settings.adversarial_config().unwrap();
        assert_eq!(config.policy, SearchPolicy::Expectimax);
        assert_eq!(config.depth, 4);
    }
}
