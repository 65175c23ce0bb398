// ── Favorite membership ──
//
// Lock-free per-kind ID sets. Membership is a set, so duplicates are
// impossible by construction.

use std::collections::HashSet;

use dashmap::DashSet;

use crate::model::{FavoriteKey, FavoriteKind};

pub(crate) struct FavoriteSet {
    players: DashSet<i64>,
    teams: DashSet<i64>,
}

impl FavoriteSet {
    pub(crate) fn new() -> Self {
        Self {
            players: DashSet::new(),
            teams: DashSet::new(),
        }
    }

    fn bucket(&self, kind: FavoriteKind) -> &DashSet<i64> {
        match kind {
            FavoriteKind::Player => &self.players,
            FavoriteKind::Team => &self.teams,
        }
    }

    pub(crate) fn contains(&self, key: FavoriteKey) -> bool {
        self.bucket(key.kind).contains(&key.id)
    }

    /// Force membership of `key`. Returns `true` if anything changed.
    pub(crate) fn set(&self, key: FavoriteKey, present: bool) -> bool {
        let bucket = self.bucket(key.kind);
        if present {
            bucket.insert(key.id)
        } else {
            bucket.remove(&key.id).is_some()
        }
    }

    /// Replace one kind's membership with `ids`.
    ///
    /// Inserts first, then prunes IDs not in the incoming set, so readers
    /// never observe a transient empty set.
    pub(crate) fn replace(&self, kind: FavoriteKind, ids: impl IntoIterator<Item = i64>) {
        let bucket = self.bucket(kind);
        let incoming: HashSet<i64> = ids.into_iter().collect();
        for id in &incoming {
            bucket.insert(*id);
        }
        bucket.retain(|id| incoming.contains(id));
    }

    /// Sorted snapshot of one kind.
    pub(crate) fn sorted(&self, kind: FavoriteKind) -> Vec<i64> {
        let mut ids: Vec<i64> = self.bucket(kind).iter().map(|r| *r).collect();
        ids.sort_unstable();
        ids
    }

    pub(crate) fn len(&self, kind: FavoriteKind) -> usize {
        self.bucket(kind).len()
    }

    pub(crate) fn clear(&self) {
        self.players.clear();
        self.teams.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_reports_changes() {
        let set = FavoriteSet::new();
        assert!(set.set(FavoriteKey::player(7), true));
        assert!(!set.set(FavoriteKey::player(7), true));
        assert!(set.contains(FavoriteKey::player(7)));
        assert!(!set.contains(FavoriteKey::team(7)));
        assert!(set.set(FavoriteKey::player(7), false));
        assert!(!set.set(FavoriteKey::player(7), false));
    }

    #[test]
    fn replace_dedupes_and_prunes() {
        let set = FavoriteSet::new();
        set.set(FavoriteKey::team(1), true);
        set.set(FavoriteKey::team(2), true);
        set.replace(FavoriteKind::Team, [2, 3, 3, 4]);
        assert_eq!(set.sorted(FavoriteKind::Team), vec![2, 3, 4]);
        assert_eq!(set.len(FavoriteKind::Team), 3);
        assert_eq!(set.len(FavoriteKind::Player), 0);
    }

    #[test]
    fn clear_empties_both_kinds() {
        let set = FavoriteSet::new();
        set.set(FavoriteKey::team(1), true);
        set.set(FavoriteKey::player(1), true);
        set.clear();
        assert!(set.sorted(FavoriteKind::Team).is_empty());
        assert!(set.sorted(FavoriteKind::Player).is_empty());
    }
}
