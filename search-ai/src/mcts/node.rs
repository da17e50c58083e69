//! MCTS 树节点

use games::TwoPlayerGame;

/// 节点在树中的索引
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// 根节点始终位于 0 号槽位
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// 搜索树节点
///
/// `value` 是本节点走子方（即刚走到这里那一方的对手）的胜率估计：
/// 胜记 1，和记 0.5，负记 0。父节点偏好 `value` 低的子节点。
#[derive(Debug, Clone)]
pub struct SearchNode<G: TwoPlayerGame> {
    pub(crate) state: G,
    /// 父节点（不持有所有权，仅用于回传）
    pub(crate) parent: Option<NodeId>,
    /// 已展开的子节点，按展开顺序排列
    pub(crate) children: Vec<(G::Move, NodeId)>,
    visits: u32,
    /// 首次更新前未定义
    value: Option<f64>,
}

impl<G: TwoPlayerGame> SearchNode<G> {
    pub(crate) fn new(state: G, parent: Option<NodeId>) -> Self {
        Self {
            state,
            parent,
            children: Vec::new(),
            visits: 0,
            value: None,
        }
    }

    pub fn state(&self) -> &G {
        &self.state
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[(G::Move, NodeId)] {
        &self.children
    }

    /// 指定走法对应的子节点（未展开时为 None）
    pub fn child(&self, mv: G::Move) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(m, _)| *m == mv)
            .map(|(_, id)| *id)
    }

    pub fn visits(&self) -> u32 {
        self.visits
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// 尚未展开的合法走法
    pub fn unexpanded_moves(&self) -> Vec<G::Move> {
        self.state
            .legal_moves()
            .into_iter()
            .filter(|mv| self.child(*mv).is_none())
            .collect()
    }

    /// 用一次 rollout 的结果更新胜率估计
    ///
    /// `outcome`：+1 先手胜，-1 后手胜，0 和棋。
    pub fn update_value(&mut self, outcome: i8) {
        let contribution = if outcome == 0 {
            0.5
        } else if outcome == self.state.turn() {
            1.0
        } else {
            0.0
        };
        let visits = self.visits as f64;
        let old = self.value.unwrap_or(0.0);
        self.value = Some((old * visits + contribution) / (visits + 1.0));
        self.visits += 1;
    }

    /// 父节点按此权重成比例地选择子节点
    ///
    /// `(1 - value) + c * sqrt(ln(parent_visits) / visits)`
    ///
    /// # Panics
    ///
    /// 节点未被访问过时 panic：未访问的节点总会先被展开分支处理。
    pub fn ucb_weight(&self, parent_visits: u32, ucb_const: f64) -> f64 {
        let value = match self.value {
            Some(value) if self.visits > 0 => value,
            _ => panic!("UCB weight requested for a node with zero visits"),
        };
        let exploration = ((parent_visits as f64).ln() / self.visits as f64).sqrt();
        (1.0 - value) + ucb_const * exploration
    }
}
