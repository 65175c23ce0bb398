// Player endpoints
//
// The player list is paged server-side by points per game. Page numbers
// are 1-based; an empty page marks the end of the collection.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::PlayerSummary;

impl ApiClient {
    /// Fetch one page of players sorted by points per game.
    ///
    /// `GET /players/sortedbyppg/{page}`
    pub async fn players_sorted_by_ppg(&self, page: u32) -> Result<Vec<PlayerSummary>, Error> {
        let url = self.endpoint(&format!("players/sortedbyppg/{page}"))?;
        debug!(page, "fetching players page");
        self.get(url).await
    }
}
