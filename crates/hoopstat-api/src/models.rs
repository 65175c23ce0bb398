// Wire models for the hoopstat REST backend.
//
// Field names follow the backend's snake_case JSON. Aliases cover the
// handful of alternate spellings older endpoints still emit.

use std::fmt;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Which collection a favorite belongs to. Used verbatim as a path segment.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FavoriteKind {
    Player,
    Team,
}

impl FavoriteKind {
    pub const ALL: [Self; 2] = [Self::Player, Self::Team];
}

/// One row of `GET /players/sortedbyppg/{page}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: i64,
    #[serde(alias = "player_name", alias = "full_name")]
    pub name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default, alias = "team_name")]
    pub team: Option<String>,
    #[serde(default, alias = "imageUrl", alias = "image", alias = "headshot_url")]
    pub image_url: Option<String>,
    #[serde(default, alias = "points_per_game")]
    pub ppg: Option<f64>,
    #[serde(default, alias = "rebounds_per_game")]
    pub rpg: Option<f64>,
    #[serde(default, alias = "assists_per_game")]
    pub apg: Option<f64>,
}

/// One element of `GET /favorites/{kind}`.
///
/// The backend returns either bare IDs or small records carrying the ID
/// under `id`, `player_id`, or `team_id`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub(crate) enum FavoriteRecord {
    Id(i64),
    Record {
        #[serde(alias = "player_id", alias = "team_id")]
        id: i64,
    },
}

impl FavoriteRecord {
    pub(crate) fn id(self) -> i64 {
        match self {
            Self::Id(id) | Self::Record { id } => id,
        }
    }
}

/// Body of `POST /auth/login`.
#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Body of `POST /auth/signup`.
#[derive(Serialize)]
pub(crate) struct SignupRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `POST /auth/upgrade`.
#[derive(Serialize)]
pub(crate) struct UpgradeRequest<'a> {
    pub email: &'a str,
    pub role: &'a str,
}

/// Response of the login, signup, and upgrade endpoints.
#[derive(Clone, Deserialize)]
pub struct AuthResponse {
    access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

fn default_token_type() -> String {
    "bearer".into()
}

impl AuthResponse {
    pub fn access_token(&self) -> SecretString {
        SecretString::from(self.access_token.clone())
    }
}

impl fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthResponse")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("username", &self.username)
            .field("role", &self.role)
            .finish()
    }
}
