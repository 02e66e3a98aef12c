use derive_more::{Display, From, Into};
use serde::Deserialize;

/// CAS service ticket (the `ticket` query parameter).
///
/// Opaque and untrusted: it is only ever stored, compared by the CAS server,
/// and percent-encoded into the validate URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Display, From, Into)]
#[serde(transparent)]
pub struct ServiceTicket(pub String);

impl ServiceTicket {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ServiceTicket {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Identity returned by CAS on successful validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From, Into)]
pub struct Username(pub String);

impl Username {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Username {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Outcome of a single ticket validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid { username: Username },
    Invalid,
}

impl ValidationResult {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    #[must_use]
    pub fn username(&self) -> Option<&Username> {
        match self {
            Self::Valid { username } => Some(username),
            Self::Invalid => None,
        }
    }
}
