// ── Paginated list loader ──
//
// Drives a `PageSource` one page at a time and publishes the flattened,
// deduplicated result through a `watch` channel. A dedicated flight lock is
// the single-flight gate: a `load_next` that cannot take it immediately
// returns without doing anything. The page book has its own lock, held only
// across synchronous bookkeeping, so reading windows never blocks a fetch.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::source::{Keyed, PageSource};
use crate::error::CoreError;

/// Observable loader state.
pub struct PageState<T> {
    /// Every item fetched so far, in page order, duplicates removed.
    pub items: Arc<Vec<Arc<T>>>,
    /// Number of non-empty pages fetched (the hydration seed counts as one).
    pub pages_loaded: u32,
    pub is_loading_initial: bool,
    pub is_loading_more: bool,
    pub is_exhausted: bool,
    /// Most recent fetch failure. Cleared when the next fetch starts.
    pub error: Option<Arc<CoreError>>,
}

impl<T> PageState<T> {
    pub fn is_loading(&self) -> bool {
        self.is_loading_initial || self.is_loading_more
    }
}

impl<T> Clone for PageState<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            pages_loaded: self.pages_loaded,
            is_loading_initial: self.is_loading_initial,
            is_loading_more: self.is_loading_more,
            is_exhausted: self.is_exhausted,
            error: self.error.clone(),
        }
    }
}

impl<T> Default for PageState<T> {
    fn default() -> Self {
        Self {
            items: Arc::new(Vec::new()),
            pages_loaded: 0,
            is_loading_initial: false,
            is_loading_more: false,
            is_exhausted: false,
            error: None,
        }
    }
}

impl<T> fmt::Debug for PageState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageState")
            .field("items", &self.items.len())
            .field("pages_loaded", &self.pages_loaded)
            .field("is_loading_initial", &self.is_loading_initial)
            .field("is_loading_more", &self.is_loading_more)
            .field("is_exhausted", &self.is_exhausted)
            .field("error", &self.error)
            .finish()
    }
}

/// The items one page contributed, after deduplication. Never changes once
/// recorded.
pub struct PageWindow<T> {
    pub index: u32,
    pub items: Vec<Arc<T>>,
}

impl<T> Clone for PageWindow<T> {
    fn clone(&self) -> Self {
        Self {
            index: self.index,
            items: self.items.clone(),
        }
    }
}

struct PageBook<T: Keyed> {
    /// Loader generation this book was built under.
    generation: u64,
    windows: Vec<PageWindow<T>>,
    seen: HashSet<T::Key>,
}

impl<T: Keyed> PageBook<T> {
    fn new(generation: u64) -> Self {
        Self {
            generation,
            windows: Vec::new(),
            seen: HashSet::new(),
        }
    }

    fn next_page(&self) -> u32 {
        u32::try_from(self.windows.len()).map_or(u32::MAX, |n| n.saturating_add(1))
    }

    /// Record a fetched page, dropping items already seen.
    fn record(&mut self, index: u32, items: Vec<T>) -> Vec<Arc<T>> {
        let fresh: Vec<Arc<T>> = items
            .into_iter()
            .filter(|item| self.seen.insert(item.key()))
            .map(Arc::new)
            .collect();
        self.windows.push(PageWindow {
            index,
            items: fresh.clone(),
        });
        fresh
    }
}

/// Incremental loader for one paged collection.
///
/// Cheaply cloneable; clones share state.
pub struct PageLoader<S: PageSource> {
    inner: Arc<LoaderInner<S>>,
}

impl<S: PageSource> Clone for PageLoader<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct LoaderInner<S: PageSource> {
    source: S,
    state: watch::Sender<PageState<S::Item>>,
    flight: Mutex<()>,
    book: Mutex<PageBook<S::Item>>,
    generation: AtomicU64,
    cancel: CancellationToken,
}

impl<S: PageSource> PageLoader<S> {
    /// A loader with nothing fetched yet.
    pub fn new(source: S) -> Self {
        let (state, _) = watch::channel(PageState::default());
        Self {
            inner: Arc::new(LoaderInner {
                source,
                state,
                flight: Mutex::new(()),
                book: Mutex::new(PageBook::new(0)),
                generation: AtomicU64::new(0),
                cancel: CancellationToken::new(),
            }),
        }
    }

    /// A loader whose first page was obtained elsewhere (e.g. prefetched).
    ///
    /// `seed` stands in for page 1, so the first [`load_next()`](Self::load_next)
    /// fetches page 2. An empty seed means the collection is empty.
    pub fn hydrated(source: S, seed: Vec<S::Item>) -> Self {
        let mut book = PageBook::new(0);
        let state = if seed.is_empty() {
            PageState {
                is_exhausted: true,
                ..PageState::default()
            }
        } else {
            let items = book.record(1, seed);
            PageState {
                items: Arc::new(items),
                pages_loaded: 1,
                ..PageState::default()
            }
        };

        let (state, _) = watch::channel(state);
        Self {
            inner: Arc::new(LoaderInner {
                source,
                state,
                flight: Mutex::new(()),
                book: Mutex::new(book),
                generation: AtomicU64::new(0),
                cancel: CancellationToken::new(),
            }),
        }
    }

    pub fn source(&self) -> &S {
        &self.inner.source
    }

    /// Current state.
    pub fn snapshot(&self) -> PageState<S::Item> {
        self.inner.state.borrow().clone()
    }

    /// Watch state changes.
    pub fn subscribe(&self) -> watch::Receiver<PageState<S::Item>> {
        self.inner.state.subscribe()
    }

    /// Recorded page windows, in fetch order. A page still in flight is not
    /// included.
    pub async fn windows(&self) -> Vec<PageWindow<S::Item>> {
        let book = self.inner.book.lock().await;
        if book.generation == self.inner.generation.load(Ordering::Acquire) {
            book.windows.clone()
        } else {
            Vec::new()
        }
    }

    /// Fetch and append the next page.
    ///
    /// Does nothing while another fetch is in flight, once the collection is
    /// exhausted, or after [`dispose()`](Self::dispose). Failures land in
    /// [`PageState::error`]; the page index does not advance, so the next
    /// call retries the same page.
    pub async fn load_next(&self) {
        if self.inner.cancel.is_cancelled() {
            return;
        }

        let Ok(_flight) = self.inner.flight.try_lock() else {
            debug!(
                collection = self.inner.source.collection(),
                "page fetch already in flight"
            );
            return;
        };

        let exhausted = self.inner.state.borrow().is_exhausted;
        if exhausted {
            return;
        }

        let generation = self.inner.generation.load(Ordering::Acquire);
        let (page, initial) = {
            let mut book = self.inner.book.lock().await;
            if book.generation != generation {
                *book = PageBook::new(generation);
            }
            (book.next_page(), book.windows.is_empty())
        };
        self.inner.state.send_modify(|s| {
            s.is_loading_initial = initial;
            s.is_loading_more = !initial;
            s.error = None;
        });

        let collection = self.inner.source.collection();
        debug!(collection, page, "fetching page");
        let result = self.inner.source.fetch_page(page).await;

        if self.inner.cancel.is_cancelled()
            || self.inner.generation.load(Ordering::Acquire) != generation
        {
            debug!(collection, page, "loader reset or disposed; discarding page");
            return;
        }

        match result {
            Ok(items) if items.is_empty() => {
                debug!(collection, page, "collection exhausted");
                self.inner.state.send_modify(|s| {
                    s.is_loading_initial = false;
                    s.is_loading_more = false;
                    s.is_exhausted = true;
                });
            }
            Ok(items) => {
                let fetched = items.len();
                let fresh = self.inner.book.lock().await.record(page, items);
                debug!(collection, page, fetched, added = fresh.len(), "page appended");
                self.inner.state.send_modify(|s| {
                    let mut all = Vec::with_capacity(s.items.len() + fresh.len());
                    all.extend(s.items.iter().cloned());
                    all.extend(fresh);
                    s.items = Arc::new(all);
                    s.pages_loaded = page;
                    s.is_loading_initial = false;
                    s.is_loading_more = false;
                });
            }
            Err(err) => {
                warn!(collection, page, error = %err, "page fetch failed");
                self.inner.state.send_modify(|s| {
                    s.is_loading_initial = false;
                    s.is_loading_more = false;
                    s.error = Some(Arc::new(err));
                });
            }
        }
    }

    /// Discard every page, e.g. after the collection's parameters change.
    ///
    /// A fetch in flight at this point has its result dropped; `load_next`
    /// stays a no-op until that fetch returns.
    pub fn reset(&self) {
        self.inner.generation.fetch_add(1, Ordering::AcqRel);
        self.inner.state.send_replace(PageState::default());
        debug!(collection = self.inner.source.collection(), "loader reset");
    }

    /// Stop loading. Results still in flight are dropped.
    pub fn dispose(&self) {
        self.inner.cancel.cancel();
        self.inner.state.send_modify(|s| {
            s.is_loading_initial = false;
            s.is_loading_more = false;
        });
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.cancel.is_cancelled()
    }
}
