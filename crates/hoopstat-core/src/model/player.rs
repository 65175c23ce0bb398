use serde::Serialize;

/// A player row in the points-per-game leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub position: Option<String>,
    pub team: Option<String>,
    pub image_url: Option<String>,
    /// Points per game.
    pub ppg: Option<f64>,
    /// Rebounds per game.
    pub rpg: Option<f64>,
    /// Assists per game.
    pub apg: Option<f64>,
}
