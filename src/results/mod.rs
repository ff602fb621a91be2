pub mod db;
pub mod game_result;

pub use db::ResultDB;
pub use game_result::{GameResult, LeaderboardEntry, NewGameResult};
