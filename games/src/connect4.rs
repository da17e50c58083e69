//! Connect-Four 棋盘状态

use crate::constants::{CONNECT, FIRST_PLAYER, HEIGHT, WIDTH};
use crate::error::{GameError, Result};
use crate::traits::TwoPlayerGame;

/// 四个检查方向：右、下、右下、左下
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Connect-Four 局面
///
/// 第 0 行为最上方，棋子落到该列最低的空位。
/// 格子取值：+1 先手棋子，-1 后手棋子，0 空位。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectFour {
    cells: [[i8; WIDTH]; HEIGHT],
    heights: [usize; WIDTH],
    /// 当前走子方
    turn: i8,
}

impl ConnectFour {
    /// 创建空棋盘，先手走子
    pub fn new() -> Self {
        Self {
            cells: [[0; WIDTH]; HEIGHT],
            heights: [0; WIDTH],
            turn: FIRST_PLAYER,
        }
    }

    /// 获取指定格子的棋子
    pub fn cell(&self, row: usize, column: usize) -> i8 {
        self.cells[row][column]
    }

    /// 指定列已落子数
    pub fn height(&self, column: usize) -> usize {
        self.heights[column]
    }

    /// 已走步数
    pub fn moves_played(&self) -> usize {
        self.heights.iter().sum()
    }

    /// 落子（检查规则）
    pub fn play(&self, column: usize) -> Result<Self> {
        if column >= WIDTH {
            return Err(GameError::InvalidColumn {
                column,
                width: WIDTH,
            });
        }
        if self.is_terminal() {
            return Err(GameError::GameOver);
        }
        if self.heights[column] >= HEIGHT {
            return Err(GameError::ColumnFull { column });
        }
        Ok(self.drop_piece(column))
    }

    /// 落子（不检查规则）
    fn drop_piece(&self, column: usize) -> Self {
        let mut next = self.clone();
        let row = HEIGHT - next.heights[column] - 1;
        next.cells[row][column] = self.turn;
        next.heights[column] += 1;
        next.turn = -self.turn;
        next
    }

    /// 刚走完的一方是否已连成一线
    pub fn has_winner(&self) -> bool {
        self.wins(-self.turn)
    }

    fn wins(&self, player: i8) -> bool {
        for row in 0..HEIGHT {
            for column in 0..WIDTH {
                if self.cells[row][column] != player {
                    continue;
                }
                for (dr, dc) in DIRECTIONS {
                    let line = (1..CONNECT as isize).all(|k| {
                        self.at(row as isize + dr * k, column as isize + dc * k) == Some(player)
                    });
                    if line {
                        return true;
                    }
                }
            }
        }
        false
    }

    fn at(&self, row: isize, column: isize) -> Option<i8> {
        if row < 0 || column < 0 || row >= HEIGHT as isize || column >= WIDTH as isize {
            return None;
        }
        Some(self.cells[row as usize][column as usize])
    }

    /// 渲染棋盘
    pub fn render(&self) -> String {
        self.render_with_ranks(&[])
    }

    /// 渲染棋盘，并在每个已排名列的落点处标出名次（1 为最佳）
    pub fn render_with_ranks(&self, ranks: &[(usize, usize)]) -> String {
        let mut out = String::from("\n");
        out.push_str(&" ■".repeat(WIDTH));
        out.push_str(" ◩\n");
        for row in 0..HEIGHT {
            out.push_str("□ ");
            for column in 0..WIDTH {
                let landing = self.heights[column] < HEIGHT
                    && row == HEIGHT - self.heights[column] - 1;
                let rank = ranks
                    .iter()
                    .find(|(c, _)| *c == column)
                    .map(|(_, r)| *r);
                match rank {
                    Some(rank) if landing => out.push_str(&rank.to_string()),
                    _ => out.push(piece_char(self.cells[row][column])),
                }
                out.push(' ');
            }
            out.push_str("□\n");
        }
        out.push('◪');
        out.push_str(&" ■".repeat(WIDTH));
        out
    }
}

impl Default for ConnectFour {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectFour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl TwoPlayerGame for ConnectFour {
    type Move = usize;

    fn legal_moves(&self) -> Vec<usize> {
        (0..WIDTH).filter(|&c| self.heights[c] < HEIGHT).collect()
    }

    fn successor(&self, mv: usize) -> Self {
        assert!(
            mv < WIDTH && self.heights[mv] < HEIGHT,
            "successor called with illegal column {mv}"
        );
        self.drop_piece(mv)
    }

    fn is_terminal(&self) -> bool {
        self.heights.iter().all(|&h| h >= HEIGHT) || self.has_winner()
    }

    fn terminal_value(&self) -> i8 {
        if self.has_winner() {
            -self.turn
        } else {
            0
        }
    }

    fn turn(&self) -> i8 {
        self.turn
    }

    fn key(&self) -> String {
        let mut key: String = self
            .cells
            .iter()
            .flatten()
            .map(|c| c.to_string())
            .collect();
        key.push_str(&self.turn.to_string());
        key
    }
}

/// 棋子显示字符：先手 ○，后手 ●，空位 ·
fn piece_char(value: i8) -> char {
    match value {
        v if v > 0 => '○',
        v if v < 0 => '●',
        _ => '·',
    }
}
