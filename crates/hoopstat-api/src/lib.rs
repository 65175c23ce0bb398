// hoopstat-api: Async Rust client for the hoopstat statistics backend

pub mod account;
pub mod auth;
pub mod client;
pub mod error;
pub mod favorites;
pub mod models;
pub mod players;
pub mod transport;

pub use auth::{SameSite, SessionCookie, TokenJar};
pub use client::ApiClient;
pub use error::Error;
pub use models::{AuthResponse, FavoriteKind, PlayerSummary};
pub use transport::{TlsMode, TransportConfig};
