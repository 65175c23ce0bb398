//! Client-side state for the hoopstat basketball statistics site.
//!
//! Sits between `hoopstat-api` and consumers (the CLI, or any UI):
//!
//! - **[`FavoritesStore`]**: Session-scoped set of favorited players and
//!   teams. Toggles apply optimistically, reconcile against the backend, and
//!   roll back on failure. One mutation per `(kind, id)` is in flight at a
//!   time; every change bumps a `watch`-backed update counter.
//!
//! - **[`PageLoader`]**: Infinite-scroll loader over any [`PageSource`].
//!   Single-flight `load_next()`, deduplication by [`Keyed::key`],
//!   exhaustion on the first empty page, optional hydration from a
//!   prefetched first page.
//!
//! - **[`Session`]** / **[`RouteGate`]**: Bearer-token handling. Decodes
//!   the token's payload into an [`Identity`] (no signature check) and
//!   decides whether a path may be shown, redirecting to login or home
//!   otherwise.

pub mod config;
pub mod convert;
pub mod error;
pub mod favorites;
pub mod model;
pub mod pager;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ClientConfig, TlsVerification};
pub use error::CoreError;
pub use favorites::{FavoritesStore, MutationState};
pub use pager::{Keyed, PageLoader, PageSource, PageState, PageWindow, SortedByPpg};
pub use session::{GateDecision, RETURN_TARGET_PARAM, RouteGate, RouteTable, Session, decode_identity};

pub use model::{FavoriteKey, FavoriteKind, Identity, Player, Role};

// Session cookie types, so consumers need not depend on hoopstat-api.
pub use hoopstat_api::{SameSite, SessionCookie, TokenJar};
