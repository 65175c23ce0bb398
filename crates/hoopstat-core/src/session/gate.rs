// ── Route gating ──
//
// Decides, before a page renders, whether the requested path may be shown
// for the current token. Every failure becomes a redirect; nothing here
// returns an error.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::model::Identity;

/// Query parameter carrying the originally requested path on login redirects.
pub const RETURN_TARGET_PARAM: &str = "redirect";

/// Which paths are public, protected, or admin-only.
///
/// Prefixes match on whole path segments: `/admin` covers `/admin` and
/// `/admin/users` but not `/administrator`. The root path `/` only ever
/// matches itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteTable {
    pub public: Vec<String>,
    pub protected: Vec<String>,
    pub admin_prefix: String,
    pub login_path: String,
    pub home_path: String,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            public: ["/", "/login", "/signup", "/pricing"]
                .map(String::from)
                .to_vec(),
            protected: [
                "/dashboard",
                "/players",
                "/teams",
                "/favorites",
                "/checkout",
                "/return",
                "/admin",
            ]
            .map(String::from)
            .to_vec(),
            admin_prefix: "/admin".into(),
            login_path: "/login".into(),
            home_path: "/".into(),
        }
    }
}

/// Outcome of gating one navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GateDecision {
    /// Render the page. Carries the decoded identity when one exists.
    Allow { identity: Option<Identity> },
    /// Send to the login page, then back to `return_to`.
    RedirectToLogin { location: String, return_to: String },
    /// Authenticated but not entitled; send home.
    RedirectHome { location: String },
}

impl GateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow { .. })
    }

    /// Where the client should be sent, if anywhere.
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Allow { .. } => None,
            Self::RedirectToLogin { location, .. } | Self::RedirectHome { location } => {
                Some(location)
            }
        }
    }
}

/// Evaluates navigations against a [`RouteTable`].
#[derive(Debug, Clone, Default)]
pub struct RouteGate {
    table: RouteTable,
}

impl RouteGate {
    pub fn new(table: RouteTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Gate a navigation to `target` (a path, optionally with a query).
    ///
    /// Public paths always pass. Protected and admin paths need a token that
    /// decodes to an identity; otherwise the client goes to login with the
    /// target preserved. Admin paths additionally need the admin role, and a
    /// decoded non-admin identity is sent home.
    pub fn evaluate(&self, target: &str, token: Option<&str>) -> GateDecision {
        let path = target.split(['?', '#']).next().unwrap_or(target);

        if self.table.public.iter().any(|p| matches_prefix(p, path)) {
            return GateDecision::Allow {
                identity: token.and_then(Identity::from_token),
            };
        }

        let admin = matches_prefix(&self.table.admin_prefix, path);
        let protected = admin || self.table.protected.iter().any(|p| matches_prefix(p, path));
        if !protected {
            return GateDecision::Allow {
                identity: token.and_then(Identity::from_token),
            };
        }

        let Some(identity) = token.and_then(Identity::from_token) else {
            return self.to_login(target);
        };

        if admin && !identity.role.is_admin() {
            return GateDecision::RedirectHome {
                location: self.table.home_path.clone(),
            };
        }

        GateDecision::Allow {
            identity: Some(identity),
        }
    }

    fn to_login(&self, target: &str) -> GateDecision {
        let encoded: String = form_urlencoded::byte_serialize(target.as_bytes()).collect();
        GateDecision::RedirectToLogin {
            location: format!(
                "{}?{RETURN_TARGET_PARAM}={encoded}",
                self.table.login_path
            ),
            return_to: target.to_owned(),
        }
    }
}

/// Segment-aware prefix match. `/` matches only the root.
fn matches_prefix(prefix: &str, path: &str) -> bool {
    let prefix = if prefix.len() > 1 {
        prefix.trim_end_matches('/')
    } else {
        prefix
    };
    if prefix == "/" || prefix.is_empty() {
        return path == "/" || path.is_empty();
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
