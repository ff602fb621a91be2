use crate::graph::{flow_to_json, Strategy};
use crate::types::Edge;
use json::JsonValue;

/// A submitted attempt of the traffic quiz.
#[derive(Clone, Debug, PartialEq)]
pub struct GameResult {
    pub id: u64,
    pub player_id: u64,
    pub player_name: String,
    pub network: Vec<Edge>,
    pub player_answer: u64,
    pub correct_answer: u128,
    pub is_correct: bool,
    pub ford_fulkerson_time_ms: f64,
    pub edmonds_karp_time_ms: f64,
    /// Seconds the player needed to answer.
    pub time_taken: u64,
    /// Unix timestamp in seconds.
    pub created_at: u64,
}

/// Everything about an attempt except what the store assigns.
#[derive(Clone, Debug, PartialEq)]
pub struct NewGameResult {
    pub player_id: u64,
    pub player_name: String,
    pub network: Vec<Edge>,
    pub player_answer: u64,
    pub correct_answer: u128,
    pub is_correct: bool,
    pub ford_fulkerson_time_ms: f64,
    pub edmonds_karp_time_ms: f64,
    pub time_taken: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LeaderboardEntry {
    pub player_id: u64,
    pub player_name: String,
    pub total_games: u64,
    pub correct_answers: u64,
    pub avg_ford_fulkerson_time_ms: f64,
    pub avg_edmonds_karp_time_ms: f64,
}

impl GameResult {
    pub fn to_json(&self) -> JsonValue {
        json::object! {
            id: self.id,
            playerId: self.player_id,
            playerName: self.player_name.as_str(),
            networkGraph: self.network.iter().map(Edge::to_json).collect::<Vec<_>>(),
            playerAnswer: self.player_answer,
            correctAnswer: flow_to_json(self.correct_answer),
            isCorrect: self.is_correct,
            algorithm1Name: Strategy::FordFulkerson.to_string(),
            algorithm1Time: self.ford_fulkerson_time_ms,
            algorithm2Name: Strategy::EdmondsKarp.to_string(),
            algorithm2Time: self.edmonds_karp_time_ms,
            timeTaken: self.time_taken,
            createdAt: self.created_at,
        }
    }
}

impl LeaderboardEntry {
    pub fn to_json(&self) -> JsonValue {
        json::object! {
            playerId: self.player_id,
            playerName: self.player_name.as_str(),
            totalGames: self.total_games,
            correctAnswers: self.correct_answers,
            avgFordFulkersonTime: self.avg_ford_fulkerson_time_ms,
            avgEdmondsKarpTime: self.avg_edmonds_karp_time_ms,
        }
    }
}
