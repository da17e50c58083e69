//! Pacman 地图布局解析
//!
//! 布局文本格式：
//! - `%` 墙
//! - `.` 豆子
//! - `P` Pacman 起点
//! - `G` 幽灵起点（按出现顺序编号为智能体 1, 2, ...）
//! - 空格为通路
//!
//! 示例：
//! ```text
//! %%%%%%%
//! %P . G%
//! %%%%%%%
//! ```

use crate::error::{GameError, Result};
use crate::grid::Position;

/// 测试用小地图
pub const TEST_LAYOUT: &str = "\
%%%%%
% . %
%.G.%
% . %
%. .%
%   %
%  .%
%   %
%P .%
%%%%%";

/// 小型经典地图
pub const SMALL_LAYOUT: &str = "\
%%%%%%%%%%%%%%%%%%%%
%......%G  G%......%
%.%%...%%  %%...%%.%
%.%..%........%..%.%
%.%%.%.%%%%%%.%.%%.%
%........P.........%
%%%%%%%%%%%%%%%%%%%%";

/// 对抗搜索演示地图：两个幽灵守着死胡同
pub const MINIMAX_LAYOUT: &str = "\
%%%%%%%%%
%.P    G%
% %.%%%%%
%       %
%%%%%% .%
%G     .%
%%%%%%%%%";

/// 解析后的地图
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    width: usize,
    height: usize,
    /// 墙，索引为 y * width + x
    walls: Vec<bool>,
    food: Vec<Position>,
    pacman: Position,
    ghosts: Vec<Position>,
}

impl Layout {
    /// 解析布局文本
    pub fn parse(text: &str) -> Result<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .collect();

        if rows.is_empty() {
            return Err(GameError::InvalidLayout {
                reason: "Empty layout".to_string(),
            });
        }

        let width = rows[0].chars().count();
        let height = rows.len();
        let mut walls = vec![false; width * height];
        let mut food = Vec::new();
        let mut pacman = None;
        let mut ghosts = Vec::new();

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(GameError::InvalidLayout {
                    reason: format!(
                        "Row {} has width {}, expected {}",
                        y,
                        row.chars().count(),
                        width
                    ),
                });
            }

            for (x, c) in row.chars().enumerate() {
                let pos = Position::new(x, y);
                match c {
                    '%' => walls[y * width + x] = true,
                    '.' => food.push(pos),
                    'P' => {
                        if pacman.replace(pos).is_some() {
                            return Err(GameError::InvalidLayout {
                                reason: "More than one Pacman".to_string(),
                            });
                        }
                    }
                    'G' => ghosts.push(pos),
                    ' ' => {}
                    other => {
                        return Err(GameError::InvalidLayout {
                            reason: format!("Unexpected character '{}' at {}", other, pos),
                        });
                    }
                }
            }
        }

        let pacman = pacman.ok_or_else(|| GameError::InvalidLayout {
            reason: "Missing Pacman".to_string(),
        })?;

        if ghosts.is_empty() {
            return Err(GameError::InvalidLayout {
                reason: "At least one ghost is required".to_string(),
            });
        }

        // 没有豆子的地图永远无法获胜
        if food.is_empty() {
            return Err(GameError::InvalidLayout {
                reason: "At least one food pellet is required".to_string(),
            });
        }

        Ok(Self {
            width,
            height,
            walls,
            food,
            pacman,
            ghosts,
        })
    }

    /// 按名称获取内置地图
    pub fn builtin(name: &str) -> Result<Self> {
        match name {
            "test" => Self::parse(TEST_LAYOUT),
            "small" => Self::parse(SMALL_LAYOUT),
            "minimax" => Self::parse(MINIMAX_LAYOUT),
            _ => Err(GameError::UnknownLayout {
                name: name.to_string(),
            }),
        }
    }

    /// 内置地图名称
    pub fn builtin_names() -> &'static [&'static str] {
        &["test", "small", "minimax"]
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// 是否为墙（越界视为墙）
    pub fn is_wall(&self, pos: Position) -> bool {
        if pos.x >= self.width || pos.y >= self.height {
            return true;
        }
        self.walls[pos.y * self.width + pos.x]
    }

    /// 初始豆子位置
    pub fn food(&self) -> &[Position] {
        &self.food
    }

    /// Pacman 起点
    pub fn pacman_start(&self) -> Position {
        self.pacman
    }

    /// 幽灵起点
    pub fn ghost_starts(&self) -> &[Position] {
        &self.ghosts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_test_layout() {
        let layout = Layout::parse(TEST_LAYOUT).unwrap();
        assert_eq!(layout.width(), 5);
        assert_eq!(layout.height(), 10);
        assert_eq!(layout.pacman_start(), Position::new(1, 8));
        assert_eq!(layout.ghost_starts(), &[Position::new(2, 2)]);
        assert_eq!(layout.food().len(), 8);
        assert!(layout.is_wall(Position::new(0, 0)));
        assert!(!layout.is_wall(Position::new(1, 1)));
    }

    #[test]
    fn test_builtin_layouts() {
        for name in Layout::builtin_names() {
            let layout = Layout::builtin(name);
            assert!(layout.is_ok(), "内置地图 {} 应该可以解析", name);
        }
        assert_eq!(
            Layout::builtin("huge"),
            Err(GameError::UnknownLayout {
                name: "huge".to_string()
            })
        );
    }

    #[test]
    fn test_out_of_bounds_is_wall() {
        let layout = Layout::parse(TEST_LAYOUT).unwrap();
        assert!(layout.is_wall(Position::new(5, 0)));
        assert!(layout.is_wall(Position::new(0, 10)));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let result = Layout::parse("%%%%\n%P G%\n%%%%");
        assert!(matches!(result, Err(GameError::InvalidLayout { .. })));
    }

    #[test]
    fn test_missing_pacman_rejected() {
        let result = Layout::parse("%%%%\n%.G%\n%%%%");
        assert!(matches!(result, Err(GameError::InvalidLayout { .. })));
    }

    #[test]
    fn test_two_pacmen_rejected() {
        let result = Layout::parse("%%%%%\n%PPG%\n%%%%%");
        assert!(matches!(result, Err(GameError::InvalidLayout { .. })));
    }

    #[test]
    fn test_missing_ghost_rejected() {
        let result = Layout::parse("%%%%\n%P.%\n%%%%");
        assert!(matches!(result, Err(GameError::InvalidLayout { .. })));
    }

    #[test]
    fn test_missing_food_rejected() {
        let result = Layout::parse("%%%%%\n%P G%\n%%%%%");
        assert_eq!(
            result,
            Err(GameError::InvalidLayout {
                reason: "At least one food pellet is required".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_character_rejected() {
        let result = Layout::parse("%%%%%\n%PoG%\n%%%%%");
        assert!(matches!(result, Err(GameError::InvalidLayout { .. })));
    }
}
