//! MCTS 搜索树
//!
//! 节点集中存放在一个 Vec 中，通过 NodeId 互相引用：
//! 父节点持有子节点的索引，子节点只保留父节点的索引，没有循环所有权。

use games::TwoPlayerGame;

use super::node::{NodeId, SearchNode};

/// 搜索树
#[derive(Debug, Clone)]
pub struct SearchTree<G: TwoPlayerGame> {
    nodes: Vec<SearchNode<G>>,
}

impl<G: TwoPlayerGame> SearchTree<G> {
    /// 以给定局面为根创建搜索树
    pub fn new(root_state: G) -> Self {
        Self {
            nodes: vec![SearchNode::new(root_state, None)],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// 根局面
    pub fn root_state(&self) -> &G {
        self.get(NodeId::ROOT).state()
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode<G> {
        &self.nodes[id.index()]
    }

    #[inline]
    fn get_mut(&mut self, id: NodeId) -> &mut SearchNode<G> {
        &mut self.nodes[id.index()]
    }

    /// 节点总数
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// 构造后至少有根节点，恒为 false
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// 展开 `parent` 下走法 `mv` 对应的子节点，已存在时直接返回
    pub fn expand(&mut self, parent: NodeId, mv: G::Move) -> NodeId {
        if let Some(existing) = self.get(parent).child(mv) {
            return existing;
        }

        let state = self.get(parent).state().successor(mv);
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SearchNode::new(state, Some(parent)));
        self.get_mut(parent).children.push((mv, id));
        id
    }

    /// 从 `leaf` 一路更新到根节点（含根）
    pub fn backpropagate(&mut self, leaf: NodeId, outcome: i8) {
        let mut current = Some(leaf);
        while let Some(id) = current {
            let node = self.get_mut(id);
            node.update_value(outcome);
            current = node.parent;
        }
    }

    /// 根节点下胜率估计最低（对手最不利）的走法
    ///
    /// 估计值相同时取最先展开的子节点；未访问的子节点不参与比较。
    pub fn best_move(&self) -> Option<G::Move> {
        let mut best: Option<(G::Move, f64)> = None;
        for &(mv, id) in self.get(NodeId::ROOT).children() {
            let Some(value) = self.get(id).value() else {
                continue;
            };
            match best {
                Some((_, best_value)) if value >= best_value => {}
                _ => best = Some((mv, value)),
            }
        }
        best.map(|(mv, _)| mv)
    }

    /// 根节点各走法的名次（1 为最佳，估计值相同名次相同）
    pub fn move_ranks(&self) -> Vec<(G::Move, usize)> {
        let root = self.get(NodeId::ROOT);
        let mut values: Vec<f64> = root
            .children()
            .iter()
            .filter_map(|&(_, id)| self.get(id).value())
            .collect();
        values.sort_by(|a, b| a.total_cmp(b));
        values.dedup();

        root.children()
            .iter()
            .filter_map(|&(mv, id)| {
                let value = self.get(id).value()?;
                let rank = values.iter().position(|v| *v == value)? + 1;
                Some((mv, rank))
            })
            .collect()
    }

    /// 走出 `mv` 后，保留对应子树作为新的搜索树
    ///
    /// 子节点尚未展开时以后继局面新建一棵树。
    pub fn reroot(self, mv: G::Move) -> Self {
        let Some(new_root) = self.get(NodeId::ROOT).child(mv) else {
            return Self::new(self.root_state().successor(mv));
        };

        // 广度优先确定新编号
        let mut order = vec![new_root];
        let mut remap: Vec<Option<NodeId>> = vec![None; self.nodes.len()];
        remap[new_root.index()] = Some(NodeId::ROOT);
        let mut i = 0;
        while i < order.len() {
            for &(_, child) in self.nodes[order[i].index()].children() {
                remap[child.index()] = Some(NodeId(order.len() as u32));
                order.push(child);
            }
            i += 1;
        }

        let mut slots: Vec<Option<SearchNode<G>>> = self.nodes.into_iter().map(Some).collect();
        let nodes = order
            .iter()
            .filter_map(|id| slots[id.index()].take())
            .map(|mut node| {
                node.parent = node.parent.and_then(|p| remap[p.index()]);
                for (_, child) in node.children.iter_mut() {
                    if let Some(new_id) = remap[child.index()] {
                        *child = new_id;
                    }
                }
                node
            })
            .collect();

        Self { nodes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use games::ConnectFour;

    #[test]
    fn test_new_tree() {
        let tree = SearchTree::new(ConnectFour::new());
        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert!(tree.get(tree.root()).parent().is_none());
        assert!(tree.best_move().is_none());
    }

    #[test]
    fn test_expand_is_idempotent() {
        let mut tree = SearchTree::new(ConnectFour::new());
        let a = tree.expand(tree.root(), 3);
        let b = tree.expand(tree.root(), 3);
        assert_eq!(a, b);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get(a).parent(), Some(tree.root()));
        assert_eq!(tree.get(a).state(), &ConnectFour::new().successor(3));
        assert!(!tree.get(tree.root()).unexpanded_moves().contains(&3));
    }

    #[test]
    fn test_backpropagate_updates_path() {
        let mut tree = SearchTree::new(ConnectFour::new());
        let child = tree.expand(tree.root(), 0);
        let grandchild = tree.expand(child, 1);
        let sibling = tree.expand(tree.root(), 1);

        tree.backpropagate(grandchild, 1);

        assert_eq!(tree.get(grandchild).visits(), 1);
        assert_eq!(tree.get(child).visits(), 1);
        assert_eq!(tree.get(tree.root()).visits(), 1);
        assert_eq!(tree.get(sibling).visits(), 0);

        // 根节点先手走子，先手胜记 1；child 后手走子记 0
        assert_eq!(tree.get(tree.root()).value(), Some(1.0));
        assert_eq!(tree.get(child).value(), Some(0.0));
        assert_eq!(tree.get(grandchild).value(), Some(1.0));
    }

    #[test]
    fn test_best_move_prefers_lowest_value() {
        let mut tree = SearchTree::new(ConnectFour::new());
        let a = tree.expand(tree.root(), 0);
        let b = tree.expand(tree.root(), 1);
        let c = tree.expand(tree.root(), 2);
        // 子节点后手走子：先手胜对后手记 0
        tree.backpropagate(a, -1);
        tree.backpropagate(b, 1);
        tree.backpropagate(c, 0);

        assert_eq!(tree.best_move(), Some(1));

        let ranks = tree.move_ranks();
        assert_eq!(ranks, vec![(0, 3), (1, 1), (2, 2)]);
    }

    #[test]
    fn test_best_move_tie_takes_first() {
        let mut tree = SearchTree::new(ConnectFour::new());
        let a = tree.expand(tree.root(), 5);
        let b = tree.expand(tree.root(), 2);
        tree.backpropagate(a, 0);
        tree.backpropagate(b, 0);

        assert_eq!(tree.best_move(), Some(5));
        assert_eq!(tree.move_ranks(), vec![(5, 1), (2, 1)]);
    }

    #[test]
    fn test_reroot_keeps_subtree() {
        let mut tree = SearchTree::new(ConnectFour::new());
        let child = tree.expand(tree.root(), 4);
        let grandchild = tree.expand(child, 2);
        let other = tree.expand(tree.root(), 0);
        tree.backpropagate(grandchild, 1);
        tree.backpropagate(grandchild, -1);
        tree.backpropagate(other, 1);

        let rerooted = tree.reroot(4);
        assert_eq!(rerooted.len(), 2);

        let root = rerooted.get(rerooted.root());
        assert!(root.parent().is_none());
        assert_eq!(root.visits(), 2);
        assert_eq!(root.state(), &ConnectFour::new().successor(4));

        let new_child = root.child(2).unwrap();
        assert_eq!(rerooted.get(new_child).parent(), Some(rerooted.root()));
        assert_eq!(rerooted.get(new_child).visits(), 2);
    }

    #[test]
    fn test_reroot_unexpanded_move() {
        let tree = SearchTree::new(ConnectFour::new());
        let rerooted = tree.reroot(6);
        assert_eq!(rerooted.len(), 1);
        assert_eq!(rerooted.root_state(), &ConnectFour::new().successor(6));
        assert_eq!(rerooted.get(rerooted.root()).visits(), 0);
    }
}
