// ── Domain model ──
//
// Canonical types handed to consumers. Wire shapes live in hoopstat-api;
// `convert` maps them onto these.

mod favorite;
mod identity;
mod player;

pub use favorite::FavoriteKey;
pub use hoopstat_api::FavoriteKind;
pub use identity::{Identity, Role};
pub use player::Player;
