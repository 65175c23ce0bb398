use std::sync::Arc;

use arc_swap::ArcSwapOption;
use chrono::{DateTime, TimeDelta, Utc};
use secrecy::SecretString;
use strum::Display;

/// Name of the cookie carrying the bearer token.
pub const SESSION_COOKIE_NAME: &str = "access_token";

/// Lifetime of a freshly issued session cookie.
pub const SESSION_MAX_AGE: TimeDelta = TimeDelta::days(1);

/// `SameSite` attribute of the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

/// The bearer-token cookie written by login/signup/upgrade flows.
///
/// Always `secure` with `SameSite=Lax`. Once past `expires_at` the cookie
/// is treated as absent by [`TokenJar`].
#[derive(Debug, Clone)]
pub struct SessionCookie {
    token: SecretString,
    expires_at: DateTime<Utc>,
    secure: bool,
    same_site: SameSite,
}

impl SessionCookie {
    /// Issue a cookie for `token`, valid for [`SESSION_MAX_AGE`] from now.
    pub fn issue(token: SecretString) -> Self {
        Self::restore(token, Utc::now() + SESSION_MAX_AGE)
    }

    /// Rebuild a cookie that was persisted earlier with a known expiry.
    pub fn restore(token: SecretString, expires_at: DateTime<Utc>) -> Self {
        Self {
            token,
            expires_at,
            secure: true,
            same_site: SameSite::Lax,
        }
    }

    pub fn token(&self) -> &SecretString {
        &self.token
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn secure(&self) -> bool {
        self.secure
    }

    pub fn same_site(&self) -> SameSite {
        self.same_site
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Process-wide holder of the session cookie.
///
/// Shared via `Arc` between the API client (which reads it on every request)
/// and the session layer (the only writer). Reads are lock-free.
#[derive(Debug)]
pub struct TokenJar {
    cookie: ArcSwapOption<SessionCookie>,
}

impl TokenJar {
    pub fn new() -> Self {
        Self {
            cookie: ArcSwapOption::empty(),
        }
    }

    /// Replace the current cookie wholesale.
    pub fn store(&self, cookie: SessionCookie) {
        self.cookie.store(Some(Arc::new(cookie)));
    }

    pub fn clear(&self) {
        self.cookie.store(None);
    }

    /// The current cookie, or `None` if absent or expired.
    pub fn cookie(&self) -> Option<Arc<SessionCookie>> {
        self.cookie.load_full().filter(|c| !c.is_expired())
    }

    /// The bearer token of the current unexpired cookie.
    pub fn token(&self) -> Option<SecretString> {
        self.cookie().map(|c| c.token().clone())
    }
}

impl Default for TokenJar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn issued_cookie_is_secure_lax_and_lives_one_day() {
        let before = Utc::now();
        let cookie = SessionCookie::issue(SecretString::from("tok".to_string()));
        assert!(cookie.secure());
        assert_eq!(cookie.same_site(), SameSite::Lax);
        assert!(cookie.expires_at() >= before + SESSION_MAX_AGE);
        assert!(!cookie.is_expired());
    }

    #[test]
    fn jar_hides_expired_cookie() {
        let jar = TokenJar::new();
        jar.store(SessionCookie::restore(
            SecretString::from("old".to_string()),
            Utc::now() - TimeDelta::minutes(1),
        ));
        assert!(jar.cookie().is_none());
        assert!(jar.token().is_none());
    }

    #[test]
    fn jar_store_and_clear() {
        let jar = TokenJar::new();
        jar.store(SessionCookie::issue(SecretString::from("abc".to_string())));
        let token = jar.token().map(|t| t.expose_secret().to_owned());
        assert_eq!(token.as_deref(), Some("abc"));
        jar.clear();
        assert!(jar.token().is_none());
    }
}
