use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use super::config::AuthSettings;
use crate::authenticator::CasAuthenticator;
use crate::validate::TicketValidator;

/// Shared state for the CAS route handlers.
pub struct CasState<V> {
    pub(super) authenticator: Arc<CasAuthenticator<V>>,
    pub(super) settings: AuthSettings,
}

// Manual Clone: avoid derive adding a `V: Clone` bound.
impl<V> Clone for CasState<V> {
    fn clone(&self) -> Self {
        Self {
            authenticator: self.authenticator.clone(),
            settings: self.settings.clone(),
        }
    }
}

// PrivateCookieJar requires Key to be extractable from state
impl<V: TicketValidator> FromRef<CasState<V>> for Key {
    fn from_ref(state: &CasState<V>) -> Self {
        state.settings.cookie_key.clone()
    }
}
