// ── Page sources ──

use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use hoopstat_api::ApiClient;

use crate::error::CoreError;
use crate::model::Player;

/// Items that carry a stable identity, used to deduplicate across pages.
pub trait Keyed {
    type Key: Eq + Hash + Clone + Send + Sync + 'static;

    fn key(&self) -> Self::Key;
}

impl Keyed for Player {
    type Key = i64;

    fn key(&self) -> i64 {
        self.id
    }
}

/// A remotely paged, server-sorted collection.
///
/// Pages are 1-based. An empty page means there is nothing past it.
pub trait PageSource: Send + Sync + 'static {
    type Item: Keyed + Send + Sync + 'static;

    /// Name used in log lines.
    fn collection(&self) -> &str;

    fn fetch_page(
        &self,
        page: u32,
    ) -> impl Future<Output = Result<Vec<Self::Item>, CoreError>> + Send;
}

/// Players ordered by points per game, highest first.
pub struct SortedByPpg {
    api: Arc<ApiClient>,
}

impl SortedByPpg {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

impl PageSource for SortedByPpg {
    type Item = Player;

    fn collection(&self) -> &str {
        "players/sortedbyppg"
    }

    async fn fetch_page(&self, page: u32) -> Result<Vec<Player>, CoreError> {
        let rows = self.api.players_sorted_by_ppg(page).await?;
        Ok(rows.into_iter().map(Player::from).collect())
    }
}
