// ── Session ──
//
// Owns the token jar's write side and the favorites store lifecycle. A
// store exists exactly while an identity is established; it is replaced
// when the token's subject changes, refreshed in place when only the other
// claims change, and disposed on logout.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use hoopstat_api::{ApiClient, AuthResponse, SessionCookie, TokenJar};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

use super::gate::{GateDecision, RouteGate};
use super::token::decode_identity;
use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::favorites::FavoritesStore;
use crate::model::{Identity, Role};

pub struct Session {
    api: Arc<ApiClient>,
    favorites: ArcSwapOption<FavoritesStore>,
}

impl Session {
    /// Wrap an existing client. The client's jar becomes this session's.
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            favorites: ArcSwapOption::empty(),
        }
    }

    /// Build a client with an empty jar from `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, CoreError> {
        let jar = Arc::new(TokenJar::new());
        let api = ApiClient::new(config.api_url.clone(), jar, &config.transport())?;
        Ok(Self::new(Arc::new(api)))
    }

    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    pub fn jar(&self) -> &Arc<TokenJar> {
        self.api.session()
    }

    /// The identity carried by the current unexpired token, if any.
    pub fn identity(&self) -> Option<Identity> {
        self.jar()
            .token()
            .and_then(|t| Identity::from_token(t.expose_secret()))
    }

    /// The favorites store for the established identity.
    pub fn favorites(&self) -> Option<FavoritesStore> {
        self.favorites.load_full().map(|s| FavoritesStore::clone(&s))
    }

    // ── Sign-in flows ────────────────────────────────────────────────

    pub async fn login(&self, username: &str, password: &SecretString) -> Result<Identity, CoreError> {
        let response = self.api.login(username, password).await?;
        self.accept(&response)
    }

    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<Identity, CoreError> {
        let response = self.api.signup(username, email, password).await?;
        self.accept(&response)
    }

    /// Switch the account to `role` and adopt the refreshed token.
    pub async fn upgrade(&self, email: &str, role: Role) -> Result<Identity, CoreError> {
        let response = self.api.upgrade(email, role.as_ref()).await?;
        self.accept(&response)
    }

    /// Re-adopt a cookie persisted by an earlier run.
    pub fn restore(&self, cookie: SessionCookie) -> Result<Identity, CoreError> {
        if cookie.is_expired() {
            return Err(CoreError::Unauthorized {
                message: "stored session has expired".into(),
            });
        }
        self.establish(cookie)
    }

    /// Forget the token and tear down the favorites store.
    pub fn logout(&self) {
        self.jar().clear();
        if let Some(store) = self.favorites.swap(None) {
            store.dispose();
        }
        info!("logged out");
    }

    /// Gate a navigation with the current token.
    pub fn check_route(&self, gate: &RouteGate, target: &str) -> GateDecision {
        let token = self.jar().token();
        gate.evaluate(target, token.as_ref().map(|t| t.expose_secret()))
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn accept(&self, response: &AuthResponse) -> Result<Identity, CoreError> {
        self.establish(SessionCookie::issue(response.access_token()))
    }

    /// Adopt `cookie` if its token decodes. An undecodable token is never
    /// stored.
    fn establish(&self, cookie: SessionCookie) -> Result<Identity, CoreError> {
        let identity = decode_identity(cookie.token().expose_secret())?;
        self.jar().store(cookie);

        let current = self.favorites.load_full();
        let kept = current
            .as_deref()
            .filter(|s| !s.is_disposed() && s.identity().subject == identity.subject);

        if let Some(store) = kept {
            store.refresh_identity(identity.clone());
            debug!(subject = %identity.subject, "subject unchanged; keeping favorites store");
        } else {
            let store = FavoritesStore::new(Arc::clone(&self.api), identity.clone());
            if let Some(old) = self.favorites.swap(Some(Arc::new(store))) {
                old.dispose();
            }
        }

        info!(subject = %identity.subject, role = %identity.role, "session established");
        Ok(identity)
    }
}
