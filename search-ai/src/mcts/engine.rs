//! MCTS 搜索引擎
//!
//! 每次 rollout 依次执行：选择与展开、随机模拟、结果回传。

use games::TwoPlayerGame;
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use super::node::NodeId;
use super::tree::SearchTree;
use crate::config::MctsConfig;
use crate::error::{Result, SearchError};

/// 单次搜索的统计信息
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MctsStats {
    /// 完成的 rollout 次数
    pub rollouts: u32,
    /// 搜索结束时的树节点数
    pub nodes: usize,
    /// 选择阶段到达的最大深度
    pub max_depth: usize,
}

/// MCTS 引擎
pub struct MctsEngine {
    config: MctsConfig,
    rng: ChaCha8Rng,
    stats: MctsStats,
}

impl MctsEngine {
    /// 创建引擎，配置无效时返回错误
    pub fn new(config: MctsConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Ok(Self {
            config,
            rng,
            stats: MctsStats::default(),
        })
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// 最近一次搜索的统计
    pub fn stats(&self) -> MctsStats {
        self.stats
    }

    /// 在给定搜索树上执行搜索，返回根局面的推荐走法
    ///
    /// 搜索树由调用方持有，可在走子后通过 [`SearchTree::reroot`] 复用子树。
    pub fn search<G: TwoPlayerGame>(&mut self, tree: &mut SearchTree<G>) -> Result<G::Move> {
        self.stats = MctsStats::default();

        if tree.root_state().is_terminal() {
            return Err(SearchError::NoLegalMoves);
        }

        // 没有 rollout 预算时随机走子
        if self.config.rollouts == 0 {
            return self.random_move(tree.root_state());
        }

        for _ in 0..self.config.rollouts {
            self.rollout(tree);
        }
        self.stats.rollouts = self.config.rollouts;
        self.stats.nodes = tree.len();

        let mv = tree.best_move().ok_or(SearchError::NoLegalMoves)?;
        debug!(
            rollouts = self.stats.rollouts,
            nodes = self.stats.nodes,
            max_depth = self.stats.max_depth,
            mv = ?mv,
            "MCTS search finished"
        );
        Ok(mv)
    }

    /// 以新建的搜索树搜索一次
    pub fn choose_move<G: TwoPlayerGame>(&mut self, state: &G) -> Result<G::Move> {
        let mut tree = SearchTree::new(state.clone());
        self.search(&mut tree)
    }

    /// 均匀随机选择一个合法走法
    pub fn random_move<G: TwoPlayerGame>(&mut self, state: &G) -> Result<G::Move> {
        state
            .legal_moves()
            .choose(&mut self.rng)
            .copied()
            .ok_or(SearchError::NoLegalMoves)
    }

    fn rollout<G: TwoPlayerGame>(&mut self, tree: &mut SearchTree<G>) {
        let leaf = self.select(tree);
        let outcome = self.simulate(tree.get(leaf).state());
        tree.backpropagate(leaf, outcome);
        trace!(leaf = ?leaf, outcome, "rollout complete");
    }

    /// 选择与展开
    ///
    /// 终局节点直接返回；存在未展开走法时随机展开一个并返回新节点；
    /// 否则按 UCB 权重成比例抽取一个子节点继续向下。
    fn select<G: TwoPlayerGame>(&mut self, tree: &mut SearchTree<G>) -> NodeId {
        let mut current = tree.root();
        let mut depth = 0;

        let leaf = loop {
            let node = tree.get(current);
            if node.state().is_terminal() {
                break current;
            }

            let unexpanded = node.unexpanded_moves();
            if let Some(&mv) = unexpanded.choose(&mut self.rng) {
                depth += 1;
                break tree.expand(current, mv);
            }

            current = self.sample_child(tree, current);
            depth += 1;
        };

        self.stats.max_depth = self.stats.max_depth.max(depth);
        leaf
    }

    /// 按 UCB 权重成比例抽取子节点，权重全为 0 时均匀抽取
    fn sample_child<G: TwoPlayerGame>(&mut self, tree: &SearchTree<G>, id: NodeId) -> NodeId {
        let node = tree.get(id);
        let children = node.children();
        assert!(!children.is_empty(), "non-terminal node has no legal moves");

        let weights: Vec<f64> = children
            .iter()
            .map(|&(_, child)| tree.get(child).ucb_weight(node.visits(), self.config.ucb_const))
            .collect();

        match WeightedIndex::new(&weights) {
            Ok(dist) => children[dist.sample(&mut self.rng)].1,
            Err(_) => children[self.rng.gen_range(0..children.len())].1,
        }
    }

    /// 从 `state` 开始随机走子直到终局，返回终局结果
    pub fn simulate<G: TwoPlayerGame>(&mut self, state: &G) -> i8 {
        let mut current = state.clone();
        while !current.is_terminal() {
            let moves = current.legal_moves();
            let Some(&mv) = moves.choose(&mut self.rng) else {
                panic!("non-terminal state has no legal moves");
            };
            current = current.successor(mv);
        }
        current.terminal_value()
    }
}
