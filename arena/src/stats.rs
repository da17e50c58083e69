//! 对局统计

use games::FIRST_PLAYER;

/// 多局对局的累计结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchStats {
    pub games: u32,
    /// Connect-Four 先手胜局数
    pub first_player_wins: u32,
    /// Connect-Four 后手胜局数
    pub second_player_wins: u32,
    pub draws: u32,
    /// Pacman 胜局数
    pub pacman_wins: u32,
    /// Pacman 得分总和
    pub total_score: i64,
}

impl MatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一局 Connect-Four 的终局结果（+1 先手胜，-1 后手胜，0 和棋）
    pub fn record_connect4(&mut self, outcome: i8) {
        self.games += 1;
        match outcome {
            0 => self.draws += 1,
            o if o == FIRST_PLAYER => self.first_player_wins += 1,
            _ => self.second_player_wins += 1,
        }
    }

    /// 记录一局 Pacman
    pub fn record_pacman(&mut self, won: bool, score: i32) {
        self.games += 1;
        if won {
            self.pacman_wins += 1;
        }
        self.total_score += i64::from(score);
    }

    /// Pacman 平均得分，没有对局时为 0
    pub fn average_score(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_score as f64 / self.games as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_connect4() {
        let mut stats = MatchStats::new();
        for outcome in [1, -1, 0, 1, 1] {
            stats.record_connect4(outcome);
        }
        assert_eq!(stats.games, 5);
        assert_eq!(stats.first_player_wins, 3);
        assert_eq!(stats.second_player_wins, 1);
        assert_eq!(stats.draws, 1);
    }

    #[test]
    fn test_record_pacman() {
        let mut stats = MatchStats::new();
        assert_eq!(stats.average_score(), 0.0);

        stats.record_pacman(true, 520);
        stats.record_pacman(false, -480);
        stats.record_pacman(true, 511);
        assert_eq!(stats.games, 3);
        assert_eq!(stats.pacman_wins, 2);
        assert_eq!(stats.total_score, 551);
        assert!((stats.average_score() - 551.0 / 3.0).abs() < 1e-12);
    }
}
