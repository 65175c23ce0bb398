use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Entitlement tier carried in the token's `role` claim.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Free,
    Premium,
    Ultimate,
    Admin,
}

impl Role {
    pub fn is_admin(self) -> bool {
        self == Self::Admin
    }
}

/// Who the current token says the user is.
///
/// Only ever constructed fully populated; a token that cannot yield both
/// fields yields no identity at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub subject: String,
    pub role: Role,
}
