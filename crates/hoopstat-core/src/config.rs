// ── Runtime client configuration ──
//
// These types describe *how* to reach the stats backend and which routes
// are gated. They never touch disk: the CLI builds a `ClientConfig` from
// its profile and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use hoopstat_api::{TlsMode, TransportConfig};
use url::Url;

use crate::session::RouteTable;

const DEFAULT_API_URL: &str = "http://localhost:8000";

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (local development backends).
    DangerAcceptInvalid,
}

/// Configuration for one backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend root URL (e.g., `http://localhost:8000`).
    pub api_url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout, applied by the HTTP client.
    pub timeout: Duration,
    /// Route gating rules.
    pub routes: RouteTable,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            routes: RouteTable::default(),
        }
    }
}

impl ClientConfig {
    /// Translate into the api crate's transport settings.
    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}
