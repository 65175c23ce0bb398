// Account endpoints
//
// Login and signup exchange credentials for a bearer token. Neither call
// touches the token jar: storing the returned token is the session
// layer's job.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{AuthResponse, LoginRequest, SignupRequest, UpgradeRequest};

impl ApiClient {
    /// Exchange username/password for a token.
    ///
    /// `POST /auth/login`. A 400/401 response is reported as
    /// [`Error::Authentication`] rather than a token problem.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<AuthResponse, Error> {
        let url = self.endpoint("auth/login")?;
        debug!(username, "logging in");
        let body = LoginRequest {
            username,
            password: password.expose_secret(),
        };
        self.post(url, &body).await.map_err(into_auth_error)
    }

    /// Create an account and receive its first token.
    ///
    /// `POST /auth/signup`
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthResponse, Error> {
        let url = self.endpoint("auth/signup")?;
        debug!(username, "signing up");
        let body = SignupRequest {
            username,
            email,
            password: password.expose_secret(),
        };
        self.post(url, &body).await.map_err(into_auth_error)
    }

    /// Move an account to a new role and receive a refreshed token.
    ///
    /// `POST /auth/upgrade`. Normally driven by the payment webhook.
    pub async fn upgrade(&self, email: &str, role: &str) -> Result<AuthResponse, Error> {
        let url = self.endpoint("auth/upgrade")?;
        debug!(role, "upgrading account");
        self.post(url, &UpgradeRequest { email, role }).await
    }
}

fn into_auth_error(err: Error) -> Error {
    match err {
        Error::Unauthorized { message }
        | Error::Forbidden { message }
        | Error::Validation { message, .. } => Error::Authentication { message },
        other => other,
    }
}
