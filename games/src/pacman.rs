//! Pacman 网格游戏
//!
//! 规则：
//! - 智能体 0 为 Pacman，其余为幽灵
//! - Pacman 每走一步扣 1 分，吃豆 +10，吃光所有豆子 +500 并获胜
//! - 任一智能体行动后若 Pacman 与幽灵重合，扣 500 分并失败

use std::sync::Arc;

use tracing::trace;

use crate::constants::{FOOD_SCORE, LOSE_PENALTY, TIME_PENALTY, WIN_SCORE};
use crate::error::{GameError, Result};
use crate::grid::{Direction, Position};
use crate::layout::Layout;
use crate::traits::MultiAgentGame;

/// 对局状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Playing,
    Won,
    Lost,
}

/// Pacman 局面
///
/// 地图本身不可变，在所有后继局面间共享。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacmanState {
    layout: Arc<Layout>,
    /// 剩余豆子，索引为 y * width + x
    food: Vec<bool>,
    food_left: usize,
    pacman: Position,
    ghosts: Vec<Position>,
    score: i32,
    status: Status,
}

impl PacmanState {
    /// 从地图创建初始局面
    pub fn new(layout: Layout) -> Self {
        let mut food = vec![false; layout.width() * layout.height()];
        for pos in layout.food() {
            food[pos.y * layout.width() + pos.x] = true;
        }
        Self {
            food_left: layout.food().len(),
            pacman: layout.pacman_start(),
            ghosts: layout.ghost_starts().to_vec(),
            food,
            layout: Arc::new(layout),
            score: 0,
            status: Status::Playing,
        }
    }

    /// 当前得分
    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn pacman_position(&self) -> Position {
        self.pacman
    }

    pub fn ghost_positions(&self) -> &[Position] {
        &self.ghosts
    }

    /// 剩余豆子数
    pub fn food_count(&self) -> usize {
        self.food_left
    }

    /// 剩余豆子位置（按行优先顺序）
    pub fn food(&self) -> Vec<Position> {
        let width = self.layout.width();
        self.food
            .iter()
            .enumerate()
            .filter(|(_, &has_food)| has_food)
            .map(|(i, _)| Position::new(i % width, i / width))
            .collect()
    }

    /// 指定位置是否有豆子
    pub fn has_food(&self, pos: Position) -> bool {
        pos.x < self.layout.width()
            && pos.y < self.layout.height()
            && self.food[pos.y * self.layout.width() + pos.x]
    }

    /// 执行动作（检查规则）
    pub fn apply(&self, agent: usize, action: Direction) -> Result<Self> {
        if agent >= self.num_agents() {
            return Err(GameError::InvalidAgent {
                agent,
                num_agents: self.num_agents(),
            });
        }
        if self.status != Status::Playing {
            return Err(GameError::GameOver);
        }
        if !self.legal_actions(agent).contains(&action) {
            return Err(GameError::IllegalAction {
                agent,
                action: action.to_string(),
            });
        }
        Ok(self.advance(agent, action))
    }

    /// 执行动作（不检查规则）
    fn advance(&self, agent: usize, action: Direction) -> Self {
        let mut next = self.clone();
        if agent == 0 {
            next.move_pacman(action);
        } else {
            next.move_ghost(agent - 1, action);
        }
        next.check_death();
        next
    }

    fn move_pacman(&mut self, action: Direction) {
        if let Some(to) = self.pacman.step(action) {
            self.pacman = to;
        }
        self.score -= TIME_PENALTY;

        let index = self.pacman.y * self.layout.width() + self.pacman.x;
        if self.food[index] {
            self.food[index] = false;
            self.food_left -= 1;
            self.score += FOOD_SCORE;
            if self.food_left == 0 {
                self.score += WIN_SCORE;
                self.status = Status::Won;
                trace!(score = self.score, "Pacman cleared the board");
            }
        }
    }

    fn move_ghost(&mut self, ghost: usize, action: Direction) {
        if let Some(to) = self.ghosts[ghost].step(action) {
            self.ghosts[ghost] = to;
        }
    }

    /// 碰撞检测：已获胜的局面不再判负
    fn check_death(&mut self) {
        if self.status != Status::Playing {
            return;
        }
        if self.ghosts.iter().any(|&g| g == self.pacman) {
            self.score -= LOSE_PENALTY;
            self.status = Status::Lost;
            trace!(score = self.score, "Pacman was caught");
        }
    }

    /// 渲染地图
    pub fn render(&self) -> String {
        let mut out = String::new();
        for y in 0..self.layout.height() {
            for x in 0..self.layout.width() {
                let pos = Position::new(x, y);
                let c = if self.ghosts.contains(&pos) {
                    'G'
                } else if pos == self.pacman {
                    'P'
                } else if self.layout.is_wall(pos) {
                    '%'
                } else if self.has_food(pos) {
                    '.'
                } else {
                    ' '
                };
                out.push(c);
            }
            out.push('\n');
        }
        out
    }
}

impl std::fmt::Display for PacmanState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl MultiAgentGame for PacmanState {
    type Action = Direction;

    fn num_agents(&self) -> usize {
        1 + self.ghosts.len()
    }

    fn legal_actions(&self, agent: usize) -> Vec<Direction> {
        if self.status != Status::Playing || agent >= self.num_agents() {
            return Vec::new();
        }

        let from = if agent == 0 {
            self.pacman
        } else {
            self.ghosts[agent - 1]
        };
        let mut actions: Vec<Direction> = Direction::MOVES
            .into_iter()
            .filter(|&dir| {
                from.step(dir)
                    .map(|to| !self.layout.is_wall(to))
                    .unwrap_or(false)
            })
            .collect();

        // Pacman 总可以停下；幽灵只有被围死时才停下
        if agent == 0 || actions.is_empty() {
            actions.push(Direction::Stop);
        }
        actions
    }

    fn generate_successor(&self, agent: usize, action: Direction) -> Self {
        assert!(
            self.legal_actions(agent).contains(&action),
            "generate_successor called with illegal action {action} for agent {agent}"
        );
        self.advance(agent, action)
    }

    fn is_win(&self) -> bool {
        self.status == Status::Won
    }

    fn is_lose(&self) -> bool {
        self.status == Status::Lost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::TEST_LAYOUT;

    fn state(text: &str) -> PacmanState {
        PacmanState::new(Layout::parse(text).unwrap())
    }

    #[test]
    fn test_initial_state() {
        let s = state(TEST_LAYOUT);
        assert_eq!(s.num_agents(), 2);
        assert_eq!(s.score(), 0);
        assert_eq!(s.food_count(), 8);
        assert_eq!(s.food().len(), 8);
        assert_eq!(s.status(), Status::Playing);
    }

    #[test]
    fn test_pacman_legal_actions() {
        let s = state(TEST_LAYOUT);
        // (1, 8)：北和东是通路，南、西是墙
        let actions = s.legal_actions(0);
        assert_eq!(
            actions,
            vec![Direction::North, Direction::East, Direction::Stop]
        );
    }

    #[test]
    fn test_ghost_never_stops() {
        let s = state(TEST_LAYOUT);
        let actions = s.legal_actions(1);
        assert!(!actions.is_empty());
        assert!(!actions.contains(&Direction::Stop));
    }

    #[test]
    fn test_boxed_ghost_may_stop() {
        let s = state("%%%%%%\n%P. %%\n%%%%G%\n%%%%%%");
        assert_eq!(s.legal_actions(1), vec![Direction::Stop]);
    }

    #[test]
    fn test_move_costs_time() {
        let s = state(TEST_LAYOUT);
        let next = s.generate_successor(0, Direction::North);
        assert_eq!(next.score(), -TIME_PENALTY);
        assert_eq!(next.pacman_position(), Position::new(1, 7));
        // 原局面不变
        assert_eq!(s.score(), 0);
        assert_eq!(s.pacman_position(), Position::new(1, 8));
    }

    #[test]
    fn test_eat_food() {
        let s = state("%%%%%%\n%P.. %\n%%%%G%\n%%%%%%");
        let next = s.generate_successor(0, Direction::East);
        assert_eq!(next.score(), FOOD_SCORE - TIME_PENALTY);
        assert_eq!(next.food_count(), 1);
        assert!(!next.has_food(Position::new(2, 1)));
        assert!(!next.is_win());
    }

    #[test]
    fn test_eat_last_food_wins() {
        let s = state("%%%%%%\n%P.  %\n%%%%G%\n%%%%%%");
        let next = s.generate_successor(0, Direction::East);
        assert!(next.is_win());
        assert_eq!(next.score(), FOOD_SCORE - TIME_PENALTY + WIN_SCORE);
        assert!(next.legal_actions(0).is_empty());
        assert!(next.legal_actions(1).is_empty());
    }

    #[test]
    fn test_ghost_catches_pacman() {
        let s = state("%%%%%\n%PG.%\n%%%%%");
        let next = s.generate_successor(1, Direction::West);
        assert!(next.is_lose());
        assert_eq!(next.score(), -LOSE_PENALTY);
    }

    #[test]
    fn test_pacman_walks_into_ghost() {
        let s = state("%%%%%%\n%PG .%\n%%%%%%");
        let next = s.generate_successor(0, Direction::East);
        assert!(next.is_lose());
        assert_eq!(next.score(), -TIME_PENALTY - LOSE_PENALTY);
    }

    #[test]
    fn test_apply_rejects_illegal() {
        let s = state(TEST_LAYOUT);
        assert!(matches!(
            s.apply(0, Direction::West),
            Err(GameError::IllegalAction { agent: 0, .. })
        ));
        assert!(matches!(
            s.apply(5, Direction::North),
            Err(GameError::InvalidAgent { agent: 5, .. })
        ));
    }

    #[test]
    fn test_apply_after_game_over() {
        let s = state("%%%%%\n%PG.%\n%%%%%");
        let lost = s.apply(1, Direction::West).unwrap();
        assert_eq!(lost.apply(0, Direction::Stop), Err(GameError::GameOver));
    }

    #[test]
    fn test_render() {
        let s = state(TEST_LAYOUT);
        let rendered = s.render();
        assert_eq!(rendered.lines().count(), 10);
        assert_eq!(rendered.lines().nth(8), Some("%P .%"));
    }
}
