// ── Persisted session cookie ──
//
// The CLI keeps the bearer cookie between runs in the system keyring,
// one entry per profile, as a small JSON document.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use hoopstat_core::SessionCookie;

use crate::ConfigError;

const KEYRING_SERVICE: &str = "hoopstat";

fn keyring_entry(profile: &str) -> Result<keyring::Entry, ConfigError> {
    Ok(keyring::Entry::new(KEYRING_SERVICE, &format!("{profile}/session"))?)
}

/// On-keyring form of a [`SessionCookie`].
#[derive(Clone, Serialize, Deserialize)]
pub struct StoredSession {
    token: String,
    pub expires_at: DateTime<Utc>,
}

impl StoredSession {
    pub fn from_cookie(cookie: &SessionCookie) -> Self {
        Self {
            token: cookie.token().expose_secret().to_owned(),
            expires_at: cookie.expires_at(),
        }
    }

    pub fn into_cookie(self) -> SessionCookie {
        SessionCookie::restore(SecretString::from(self.token), self.expires_at)
    }

    fn encode(&self) -> Result<String, ConfigError> {
        serde_json::to_string(self).map_err(|e| ConfigError::Validation {
            field: "session".into(),
            reason: e.to_string(),
        })
    }

    fn decode(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|e| ConfigError::Validation {
            field: "session".into(),
            reason: format!("stored session is corrupt: {e}"),
        })
    }
}

impl std::fmt::Debug for StoredSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredSession")
            .field("token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Persist `cookie` for `profile`, replacing any earlier one.
pub fn save_session(profile: &str, cookie: &SessionCookie) -> Result<(), ConfigError> {
    let raw = StoredSession::from_cookie(cookie).encode()?;
    keyring_entry(profile)?.set_password(&raw)?;
    Ok(())
}

/// The cookie stored for `profile`, if any. Expiry is not checked here.
pub fn load_session(profile: &str) -> Result<Option<SessionCookie>, ConfigError> {
    match keyring_entry(profile)?.get_password() {
        Ok(raw) => Ok(Some(StoredSession::decode(&raw)?.into_cookie())),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Remove the stored cookie for `profile`. Missing entries are fine.
pub fn clear_session(profile: &str) -> Result<(), ConfigError> {
    match keyring_entry(profile)?.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(e.into()),
    }
}
