// ── Infinite-scroll pagination ──

mod loader;
mod source;

pub use loader::{PageLoader, PageState, PageWindow};
pub use source::{Keyed, PageSource, SortedByPpg};
