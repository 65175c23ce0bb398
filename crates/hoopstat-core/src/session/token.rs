// ── Bearer token payload decoding ──
//
// Reads the claims segment of a JWT without verifying its signature.
// The result drives routing and display only; the backend verifies the
// signature on every privileged call.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::Deserialize;

use crate::error::CoreError;
use crate::model::{Identity, Role};

/// URL-safe alphabet, accepting payloads with or without `=` padding.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Deserialize)]
struct Claims {
    sub: String,
    role: Role,
}

/// Decode the identity carried in a bearer token's payload segment.
pub fn decode_identity(token: &str) -> Result<Identity, CoreError> {
    let payload = token
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| CoreError::DecodeFailure {
            reason: "token has no payload segment".into(),
        })?;

    let bytes = PAYLOAD_ENGINE
        .decode(payload)
        .map_err(|e| CoreError::DecodeFailure {
            reason: format!("payload is not base64url: {e}"),
        })?;

    let claims: Claims = serde_json::from_slice(&bytes).map_err(|e| CoreError::DecodeFailure {
        reason: format!("payload is not a claims object: {e}"),
    })?;

    if claims.sub.trim().is_empty() {
        return Err(CoreError::DecodeFailure {
            reason: "empty subject claim".into(),
        });
    }

    Ok(Identity {
        subject: claims.sub,
        role: claims.role,
    })
}

impl Identity {
    /// Decode an identity, collapsing every failure into `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        decode_identity(token).ok()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use pretty_assertions::assert_eq;

    use super::*;

    /// Build an unsigned token around an arbitrary payload.
    pub(crate) fn token_with_payload(payload: &str) -> String {
        format!(
            "{}.{}.sig",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    pub(crate) fn token_for(sub: &str, role: &str) -> String {
        token_with_payload(&format!(r#"{{"sub":"{sub}","role":"{role}","exp":4102444800}}"#))
    }

    #[test]
    fn decodes_subject_and_role() {
        let identity = decode_identity(&token_for("curry30", "premium")).unwrap();
        assert_eq!(
            identity,
            Identity {
                subject: "curry30".into(),
                role: Role::Premium,
            }
        );
    }

    #[test]
    fn accepts_padded_payload() {
        let padded = base64::engine::general_purpose::URL_SAFE
            .encode(r#"{"sub":"abc","role":"admin"}"#);
        let token = format!("h.{padded}.s");
        assert_eq!(Identity::from_token(&token).unwrap().role, Role::Admin);
    }

    #[test]
    fn non_json_payload_yields_no_identity() {
        let token = token_with_payload("definitely not json");
        assert!(Identity::from_token(&token).is_none());
        assert!(matches!(
            decode_identity(&token),
            Err(CoreError::DecodeFailure { .. })
        ));
    }

    #[test]
    fn missing_role_yields_no_identity() {
        assert!(Identity::from_token(&token_with_payload(r#"{"sub":"x"}"#)).is_none());
    }

    #[test]
    fn unknown_role_yields_no_identity() {
        assert!(Identity::from_token(&token_for("x", "superuser")).is_none());
    }

    #[test]
    fn malformed_tokens_yield_no_identity() {
        for token in ["", "nodots", "a..c", "a.!!!.c"] {
            assert!(Identity::from_token(token).is_none(), "token {token:?}");
        }
    }
}
