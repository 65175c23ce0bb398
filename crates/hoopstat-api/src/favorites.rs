// Favorites endpoints
//
// Membership is scoped to the identity behind the bearer token. Add and
// remove are expected to be idempotent on the backend.

use reqwest::Method;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{FavoriteKind, FavoriteRecord};

impl ApiClient {
    /// List favorited entity IDs of one kind for the current identity.
    ///
    /// `GET /favorites/{kind}`
    pub async fn list_favorites(&self, kind: FavoriteKind) -> Result<Vec<i64>, Error> {
        let url = self.endpoint(&format!("favorites/{kind}"))?;
        debug!(%kind, "listing favorites");
        let records: Vec<FavoriteRecord> = self.get(url).await?;
        Ok(records.into_iter().map(FavoriteRecord::id).collect())
    }

    /// `POST /favorites/{kind}/{id}`
    pub async fn add_favorite(&self, kind: FavoriteKind, id: i64) -> Result<(), Error> {
        let url = self.endpoint(&format!("favorites/{kind}/{id}"))?;
        self.send_empty(Method::POST, url).await
    }

    /// `DELETE /favorites/{kind}/{id}`
    pub async fn remove_favorite(&self, kind: FavoriteKind, id: i64) -> Result<(), Error> {
        let url = self.endpoint(&format!("favorites/{kind}/{id}"))?;
        self.send_empty(Method::DELETE, url).await
    }
}
