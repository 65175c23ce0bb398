// ── Favorites synchronization ──
//
// Optimistic favorite toggles reconciled against the backend, with a
// change counter consumers watch to re-render.

mod set;
mod store;

pub use store::{FavoritesStore, MutationState};
