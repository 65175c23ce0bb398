// ── Favorites store ──
//
// Holds the favorited player/team IDs for one identity. Toggles apply
// locally before the backend confirms and roll back if it refuses. At most
// one mutation per (kind, id) is in flight; later requests for the same key
// wait their turn and then re-check whether there is anything left to do.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use arc_swap::ArcSwap;
use dashmap::DashMap;
use futures_util::future::try_join;
use tokio::sync::{Mutex, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use hoopstat_api::ApiClient;

use super::set::FavoriteSet;
use crate::error::CoreError;
use crate::model::{FavoriteKey, FavoriteKind, Identity};

/// Per-key mutation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationState {
    /// No mutation has been issued for this key.
    Idle,
    /// A request is in flight; `previous` is the membership to restore on
    /// failure.
    Pending { previous: bool },
    /// The last request finished (confirmed or rolled back).
    Settled,
}

/// Last local write for one key. `seq` is taken from the store's counter
/// when the mutation starts and again when it settles.
#[derive(Debug, Clone, Copy)]
struct Mutation {
    state: MutationState,
    seq: u64,
    /// Membership this key should have locally.
    value: bool,
}

/// Session-scoped cache of the current identity's favorites.
///
/// Cheaply cloneable; clones share state. Created when an identity is
/// established and disposed on logout. Results that arrive after
/// [`dispose()`](Self::dispose) are dropped without touching state.
#[derive(Clone)]
pub struct FavoritesStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    api: Arc<ApiClient>,
    identity: ArcSwap<Identity>,
    set: FavoriteSet,
    mutations: DashMap<FavoriteKey, Mutation>,
    /// Present only while a mutation holds or waits on the key.
    key_locks: DashMap<FavoriteKey, Arc<Mutex<()>>>,
    seq: AtomicU64,
    initial_load_complete: AtomicBool,
    update_trigger: watch::Sender<u64>,
    cancel: CancellationToken,
}

impl FavoritesStore {
    pub fn new(api: Arc<ApiClient>, identity: Identity) -> Self {
        let (update_trigger, _) = watch::channel(0u64);
        Self {
            inner: Arc::new(StoreInner {
                api,
                identity: ArcSwap::from_pointee(identity),
                set: FavoriteSet::new(),
                mutations: DashMap::new(),
                key_locks: DashMap::new(),
                seq: AtomicU64::new(0),
                initial_load_complete: AtomicBool::new(false),
                update_trigger,
                cancel: CancellationToken::new(),
            }),
        }
    }

    /// The identity whose favorites this store holds.
    pub fn identity(&self) -> Arc<Identity> {
        self.inner.identity.load_full()
    }

    /// Adopt a refreshed token's claims for the same subject, e.g. after a
    /// role upgrade.
    pub(crate) fn refresh_identity(&self, identity: Identity) {
        self.inner.identity.store(Arc::new(identity));
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Whether `(kind, id)` is currently favorited, optimistic changes
    /// included. Always `false` before [`load()`](Self::load) completes
    /// unless a toggle has been applied; check
    /// [`initial_load_complete()`](Self::initial_load_complete) to tell
    /// "not favorited" from "not known yet".
    pub fn is_favorite(&self, kind: FavoriteKind, id: i64) -> bool {
        self.inner.set.contains(FavoriteKey::new(kind, id))
    }

    pub fn initial_load_complete(&self) -> bool {
        self.inner.initial_load_complete.load(Ordering::Acquire)
    }

    /// Sorted IDs of one kind.
    pub fn favorites(&self, kind: FavoriteKind) -> Vec<i64> {
        self.inner.set.sorted(kind)
    }

    pub fn mutation_state(&self, kind: FavoriteKind, id: i64) -> MutationState {
        self.inner
            .mutations
            .get(&FavoriteKey::new(kind, id))
            .map_or(MutationState::Idle, |m| m.state)
    }

    /// Counter bumped on every change to membership or load status.
    pub fn update_trigger(&self) -> u64 {
        *self.inner.update_trigger.borrow()
    }

    /// Watch the update counter.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.update_trigger.subscribe()
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.cancel.is_cancelled()
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Fetch the full favorite set for this identity.
    ///
    /// Keys with a mutation still in flight keep their optimistic value, and
    /// keys whose mutation started or settled while the fetch was out keep
    /// their local value over the older server snapshot.
    pub async fn load(&self) -> Result<(), CoreError> {
        if self.is_disposed() {
            return Err(CoreError::Disposed);
        }
        let started = self.inner.seq.load(Ordering::Acquire);

        let api = &self.inner.api;
        let (players, teams) = try_join(
            api.list_favorites(FavoriteKind::Player),
            api.list_favorites(FavoriteKind::Team),
        )
        .await?;

        if self.is_disposed() {
            debug!("store disposed during load; discarding favorites");
            return Ok(());
        }

        self.inner.set.replace(FavoriteKind::Player, players);
        self.inner.set.replace(FavoriteKind::Team, teams);

        for entry in &self.inner.mutations {
            let m = entry.value();
            if matches!(m.state, MutationState::Pending { .. }) || m.seq > started {
                self.inner.set.set(*entry.key(), m.value);
            }
        }

        self.inner
            .initial_load_complete
            .store(true, Ordering::Release);
        self.bump();

        info!(
            subject = %self.identity().subject,
            players = self.inner.set.len(FavoriteKind::Player),
            teams = self.inner.set.len(FavoriteKind::Team),
            "favorites loaded"
        );
        Ok(())
    }

    /// Tear the store down: drop membership and ignore in-flight results.
    pub fn dispose(&self) {
        if self.inner.cancel.is_cancelled() {
            return;
        }
        self.inner.cancel.cancel();
        self.inner.set.clear();
        self.inner.mutations.clear();
        self.inner
            .initial_load_complete
            .store(false, Ordering::Release);
        self.bump();
        debug!(subject = %self.identity().subject, "favorites store disposed");
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Favorite `(kind, id)`.
    ///
    /// Membership flips immediately; a backend failure flips it back and
    /// is returned. No retry is attempted.
    pub async fn add_to_favorites(&self, kind: FavoriteKind, id: i64) -> Result<(), CoreError> {
        self.apply(FavoriteKey::new(kind, id), true).await
    }

    /// Unfavorite `(kind, id)`. Mirror image of
    /// [`add_to_favorites()`](Self::add_to_favorites).
    pub async fn remove_from_favorites(
        &self,
        kind: FavoriteKind,
        id: i64,
    ) -> Result<(), CoreError> {
        self.apply(FavoriteKey::new(kind, id), false).await
    }

    async fn apply(&self, key: FavoriteKey, present: bool) -> Result<(), CoreError> {
        if key.id <= 0 {
            return Err(CoreError::ValidationFailed {
                message: format!("invalid {} id {}", key.kind, key.id),
            });
        }
        if self.is_disposed() {
            return Err(CoreError::Disposed);
        }

        let lock = self.key_lock(key);
        let result = {
            let _guard = lock.lock().await;
            self.apply_locked(key, present).await
        };
        drop(lock);
        self.inner
            .key_locks
            .remove_if(&key, |_, l| Arc::strong_count(l) == 1);
        result
    }

    /// Body of a mutation. Caller holds the key's lock.
    async fn apply_locked(&self, key: FavoriteKey, present: bool) -> Result<(), CoreError> {
        if self.is_disposed() {
            return Err(CoreError::Disposed);
        }

        let previous = self.inner.set.contains(key);
        if previous == present {
            debug!(%key, present, "favorite already in requested state");
            return Ok(());
        }

        self.record(key, MutationState::Pending { previous }, present);
        self.inner.set.set(key, present);
        self.bump();

        let result = if present {
            self.inner.api.add_favorite(key.kind, key.id).await
        } else {
            self.inner.api.remove_favorite(key.kind, key.id).await
        };

        if self.is_disposed() {
            debug!(%key, "store disposed mid-request; discarding result");
            return result.map_err(CoreError::from);
        }

        match result {
            Ok(()) => {
                self.record(key, MutationState::Settled, present);
                debug!(%key, present, "favorite confirmed");
                Ok(())
            }
            Err(err) => {
                self.record(key, MutationState::Settled, previous);
                self.inner.set.set(key, previous);
                self.bump();
                warn!(%key, error = %err, "favorite update failed; reverted");
                Err(err.into())
            }
        }
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn key_lock(&self, key: FavoriteKey) -> Arc<Mutex<()>> {
        Arc::clone(self.inner.key_locks.entry(key).or_default().value())
    }

    fn record(&self, key: FavoriteKey, state: MutationState, value: bool) {
        let seq = self.inner.seq.fetch_add(1, Ordering::AcqRel) + 1;
        self.inner.mutations.insert(key, Mutation { state, seq, value });
    }

    fn bump(&self) {
        self.inner.update_trigger.send_modify(|v| *v += 1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use hoopstat_api::{TokenJar, TransportConfig};
    use url::Url;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::model::Role;

    async fn store(server: &MockServer) -> FavoritesStore {
        let url = Url::parse(&server.uri()).unwrap();
        let api = ApiClient::new(url, Arc::new(TokenJar::new()), &TransportConfig::default()).unwrap();
        let identity = Identity {
            subject: "ja12".into(),
            role: Role::Free,
        };
        FavoritesStore::new(Arc::new(api), identity)
    }

    #[tokio::test]
    async fn key_lock_released_after_settle() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let store = store(&server).await;

        store.add_to_favorites(FavoriteKind::Player, 12).await.unwrap();
        assert!(store.inner.key_locks.is_empty());

        store
            .remove_from_favorites(FavoriteKind::Player, 12)
            .await
            .unwrap_err();
        assert!(store.inner.key_locks.is_empty());
        assert!(store.is_favorite(FavoriteKind::Player, 12));
    }

    #[tokio::test]
    async fn key_lock_kept_while_another_call_waits() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_delay(Duration::from_millis(200)))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;
        let store = store(&server).await;

        let (added, removed) = tokio::join!(
            store.add_to_favorites(FavoriteKind::Team, 3),
            store.remove_from_favorites(FavoriteKind::Team, 3),
        );
        added.unwrap();
        removed.unwrap();

        assert!(!store.is_favorite(FavoriteKind::Team, 3));
        assert!(store.inner.key_locks.is_empty());
    }
}
