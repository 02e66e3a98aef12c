use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::PrivateCookieJar;
use axum_extra::extract::cookie::Key;

use super::cookies::CookieSession;
use super::state::CasState;
use crate::types::Username;
use crate::validate::TicketValidator;

/// Identity recorded by a previous CAS login, if any.
///
/// Never rejects: a missing or undecryptable session cookie is anonymous.
///
/// # Example
///
/// ```rust,ignore
/// async fn root(CurrentUser(user): CurrentUser) -> String {
///     match user {
///         Some(name) => format!("Hello, {name}"),
///         None => "Hello, anonymous".to_string(),
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub Option<Username>);

impl<V: TicketValidator> FromRequestParts<CasState<V>> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &CasState<V>,
    ) -> Result<Self, Self::Rejection> {
        let jar: PrivateCookieJar<Key> = PrivateCookieJar::from_request_parts(parts, state).await?;
        let session = CookieSession::new(jar, state.settings.secure_cookies);

        Ok(Self(state.authenticator.current_user(&session)))
    }
}
