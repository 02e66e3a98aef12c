use std::collections::HashMap;

/// Session attributes owned by the CAS handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    /// Last service ticket received from CAS.
    CasTicket,
    /// Identity recorded after a successful validation.
    Username,
}

impl SessionKey {
    /// Stable name used by storage backends (cookie name, map key, ...).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CasTicket => "__cas_ticket",
            Self::Username => "__cas_username",
        }
    }
}

/// Per-browser session capability.
///
/// Implemented by the cookie-backed session in the middleware and by
/// [`MemorySession`] for embedding or tests.
pub trait Session {
    fn get(&self, key: SessionKey) -> Option<String>;

    fn set(&mut self, key: SessionKey, value: String);

    fn remove(&mut self, key: SessionKey);

    fn contains(&self, key: SessionKey) -> bool {
        self.get(key).is_some()
    }
}

/// In-process session backed by a map.
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    values: HashMap<SessionKey, String>,
}

impl MemorySession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Session for MemorySession {
    fn get(&self, key: SessionKey) -> Option<String> {
        self.values.get(&key).cloned()
    }

    fn set(&mut self, key: SessionKey, value: String) {
        self.values.insert(key, value);
    }

    fn remove(&mut self, key: SessionKey) {
        self.values.remove(&key);
    }
}
