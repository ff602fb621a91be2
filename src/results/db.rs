use std::collections::BTreeMap;
use std::time::SystemTime;

use crate::results::{GameResult, LeaderboardEntry, NewGameResult};

pub const LEADERBOARD_SIZE: usize = 10;
pub const RECENT_RESULTS_LIMIT: usize = 100;

/// In-memory log of quiz attempts, in insertion order.
#[derive(Debug, Default)]
pub struct ResultDB {
    results: Vec<GameResult>,
    next_id: u64,
}

impl ResultDB {
    pub fn new() -> ResultDB {
        ResultDB {
            results: vec![],
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn record(&mut self, result: NewGameResult) -> &GameResult {
        let created_at = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        self.record_at(result, created_at)
    }

    pub fn record_at(&mut self, result: NewGameResult, created_at: u64) -> &GameResult {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        self.results.push(GameResult {
            id,
            player_id: result.player_id,
            player_name: result.player_name,
            network: result.network,
            player_answer: result.player_answer,
            correct_answer: result.correct_answer,
            is_correct: result.is_correct,
            ford_fulkerson_time_ms: result.ford_fulkerson_time_ms,
            edmonds_karp_time_ms: result.edmonds_karp_time_ms,
            time_taken: result.time_taken,
            created_at,
        });
        &self.results[self.results.len() - 1]
    }

    /// Results of one player, newest first.
    pub fn player_history(&self, player_id: u64) -> Vec<&GameResult> {
        self.newest_first()
            .filter(|r| r.player_id == player_id)
            .collect()
    }

    pub fn all_results(&self) -> Vec<&GameResult> {
        self.newest_first().take(RECENT_RESULTS_LIMIT).collect()
    }

    /// Players ranked by correct answers, then by games played.
    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        #[derive(Default)]
        struct Totals {
            games: u64,
            correct: u64,
            ford_fulkerson_time_ms: f64,
            edmonds_karp_time_ms: f64,
        }

        let mut totals: BTreeMap<(u64, &str), Totals> = BTreeMap::new();
        for r in &self.results {
            let t = totals
                .entry((r.player_id, r.player_name.as_str()))
                .or_default();
            t.games += 1;
            if r.is_correct {
                t.correct += 1;
            }
            t.ford_fulkerson_time_ms += r.ford_fulkerson_time_ms;
            t.edmonds_karp_time_ms += r.edmonds_karp_time_ms;
        }

        let mut entries = totals
            .into_iter()
            .map(|((player_id, player_name), t)| LeaderboardEntry {
                player_id,
                player_name: player_name.to_string(),
                total_games: t.games,
                correct_answers: t.correct,
                avg_ford_fulkerson_time_ms: t.ford_fulkerson_time_ms / t.games as f64,
                avg_edmonds_karp_time_ms: t.edmonds_karp_time_ms / t.games as f64,
            })
            .collect::<Vec<_>>();
        entries.sort_by(|a, b| {
            b.correct_answers
                .cmp(&a.correct_answers)
                .then(b.total_games.cmp(&a.total_games))
                .then(a.player_id.cmp(&b.player_id))
        });
        entries.truncate(LEADERBOARD_SIZE);
        entries
    }

    fn newest_first(&self) -> impl Iterator<Item = &GameResult> {
        self.results.iter().rev()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::Edge;

    fn attempt(player_id: u64, player_name: &str, is_correct: bool, time_ms: f64) -> NewGameResult {
        NewGameResult {
            player_id,
            player_name: player_name.to_string(),
            network: vec![Edge::new("A", "T", 10)],
            player_answer: if is_correct { 10 } else { 3 },
            correct_answer: 10,
            is_correct,
            ford_fulkerson_time_ms: time_ms,
            edmonds_karp_time_ms: time_ms * 2.0,
            time_taken: 30,
        }
    }

    #[test]
    fn record_assigns_ids() {
        let mut db = ResultDB::new();
        assert!(db.is_empty());
        assert_eq!(db.record(attempt(1, "alice", true, 1.0)).id, 1);
        let second = db.record_at(attempt(2, "bob", false, 1.0), 1234);
        assert_eq!((second.id, second.created_at), (2, 1234));
        assert_eq!(db.len(), 2);
        assert_eq!(ResultDB::default().record(attempt(1, "x", true, 0.0)).id, 1);
    }

    #[test]
    fn history_is_newest_first() {
        let mut db = ResultDB::new();
        db.record(attempt(1, "alice", true, 1.0));
        db.record(attempt(2, "bob", true, 1.0));
        db.record(attempt(1, "alice", false, 1.0));
        let ids: Vec<u64> = db.player_history(1).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert!(db.player_history(7).is_empty());
        let ids: Vec<u64> = db.all_results().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn all_results_is_limited() {
        let mut db = ResultDB::new();
        for i in 0..(RECENT_RESULTS_LIMIT as u64 + 5) {
            db.record(attempt(i, "p", true, 1.0));
        }
        let all = db.all_results();
        assert_eq!(all.len(), RECENT_RESULTS_LIMIT);
        assert_eq!(all[0].id, RECENT_RESULTS_LIMIT as u64 + 5);
    }

    #[test]
    fn leaderboard_ranking() {
        let mut db = ResultDB::new();
        db.record(attempt(1, "alice", true, 1.0));
        db.record(attempt(1, "alice", false, 3.0));
        db.record(attempt(2, "bob", true, 1.0));
        db.record(attempt(2, "bob", true, 1.0));
        db.record(attempt(3, "carol", true, 1.0));
        let board = db.leaderboard();
        let order: Vec<u64> = board.iter().map(|e| e.player_id).collect();
        assert_eq!(order, vec![2, 1, 3]);
        assert_eq!(board[1].total_games, 2);
        assert_eq!(board[1].correct_answers, 1);
        assert_eq!(board[1].avg_ford_fulkerson_time_ms, 2.0);
        assert_eq!(board[1].avg_edmonds_karp_time_ms, 4.0);
    }

    #[test]
    fn leaderboard_keeps_top_players() {
        let mut db = ResultDB::new();
        for player in 0..15 {
            for _ in 0..player {
                db.record(attempt(player, "p", true, 1.0));
            }
        }
        let board = db.leaderboard();
        assert_eq!(board.len(), LEADERBOARD_SIZE);
        assert_eq!(board[0].player_id, 14);
        assert_eq!(board[9].player_id, 5);
    }
}
