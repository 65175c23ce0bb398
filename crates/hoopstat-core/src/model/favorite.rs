use std::fmt;

use serde::Serialize;

use hoopstat_api::FavoriteKind;

/// Identifies one favoritable entity: `(kind, id)`.
///
/// Also the unit of mutation serialization in the favorites store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FavoriteKey {
    pub kind: FavoriteKind,
    pub id: i64,
}

impl FavoriteKey {
    pub fn new(kind: FavoriteKind, id: i64) -> Self {
        Self { kind, id }
    }

    pub fn player(id: i64) -> Self {
        Self::new(FavoriteKind::Player, id)
    }

    pub fn team(id: i64) -> Self {
        Self::new(FavoriteKind::Team, id)
    }
}

impl fmt::Display for FavoriteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}
