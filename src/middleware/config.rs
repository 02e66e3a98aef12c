use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};

use crate::cas::CasConfig;

/// Shared auth settings used by both config and runtime state.
#[derive(Clone)]
pub(crate) struct AuthSettings {
    pub(crate) cookie_key: Key,
    pub(crate) secure_cookies: bool,
    pub(crate) home_path: String,
}

impl AuthSettings {
    fn defaults() -> Self {
        Self {
            cookie_key: Key::generate(),
            secure_cookies: true,
            home_path: "/".into(),
        }
    }
}

/// CAS middleware configuration.
///
/// Required field (`cas`) is a constructor parameter. Everything else has a
/// default and a `with_*` override.
///
/// Without [`with_secret_key`](CasAuthConfig::with_secret_key) or
/// [`with_cookie_key`](CasAuthConfig::with_cookie_key) an ephemeral key is
/// generated, so sessions do not survive a restart.
pub struct CasAuthConfig {
    pub(super) cas: CasConfig,
    pub(super) settings: AuthSettings,
}

impl CasAuthConfig {
    #[must_use]
    pub fn new(cas: CasConfig) -> Self {
        Self {
            cas,
            settings: AuthSettings::defaults(),
        }
    }

    #[must_use]
    pub fn cas(&self) -> &CasConfig {
        &self.cas
    }

    /// Derive the cookie encryption key from an operator-supplied secret.
    ///
    /// Any length is accepted; the secret is stretched to 64 bytes with SHA-512.
    #[must_use]
    pub fn with_secret_key(self, secret: &str) -> Self {
        let digest = Sha512::digest(secret.as_bytes());
        self.with_cookie_key(Key::from(digest.as_slice()))
    }

    #[must_use]
    pub fn with_cookie_key(mut self, key: Key) -> Self {
        self.settings.cookie_key = key;
        self
    }

    #[must_use]
    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.settings.secure_cookies = secure;
        self
    }

    /// Where a successful login lands (default `/`).
    #[must_use]
    pub fn with_home_path(mut self, path: impl Into<String>) -> Self {
        self.settings.home_path = path.into();
        self
    }
}
