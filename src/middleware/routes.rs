use std::sync::Arc;

use axum::Router;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Redirect;
use axum::routing::get;
use axum_extra::extract::PrivateCookieJar;
use serde::Deserialize;

use super::config::CasAuthConfig;
use super::cookies::CookieSession;
use super::extractor::CurrentUser;
use super::state::CasState;
use crate::authenticator::CasAuthenticator;
use crate::types::ServiceTicket;
use crate::validate::TicketValidator;

/// Create the CAS router: `GET /`, `GET /login/` and `GET /logout/`.
///
/// The `/login/` route must be reachable at the configured service URL,
/// since that is where CAS sends the browser back with a ticket.
pub fn cas_routes<V: TicketValidator>(config: CasAuthConfig, validator: V) -> Router {
    let state = CasState {
        authenticator: Arc::new(CasAuthenticator::new(config.cas, validator)),
        settings: config.settings,
    };

    Router::new()
        .route("/", get(root))
        .route("/login/", get(login::<V>))
        .route("/logout/", get(logout::<V>))
        .with_state(state)
}

// ── Root ───────────────────────────────────────────────────────────

async fn root(CurrentUser(user): CurrentUser) -> String {
    match user {
        Some(username) => format!("Logged in as {username}"),
        None => "Not logged in (anonymous)".to_string(),
    }
}

// ── Login ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct LoginParams {
    ticket: Option<ServiceTicket>,
}

async fn login<V: TicketValidator>(
    State(state): State<CasState<V>>,
    jar: PrivateCookieJar,
    params: Result<Query<LoginParams>, QueryRejection>,
) -> (PrivateCookieJar, Redirect) {
    let ticket = login_ticket(params);
    let mut session = CookieSession::new(jar, state.settings.secure_cookies);

    let redirect = state.authenticator.login(&mut session, ticket).await;
    let location = redirect.location(&state.settings.home_path);

    (session.into_jar(), Redirect::to(location))
}

// ── Logout ─────────────────────────────────────────────────────────

async fn logout<V: TicketValidator>(
    State(state): State<CasState<V>>,
    jar: PrivateCookieJar,
) -> (PrivateCookieJar, Redirect) {
    let mut session = CookieSession::new(jar, state.settings.secure_cookies);
    let url = state.authenticator.logout(&mut session);

    (session.into_jar(), Redirect::to(url.as_str()))
}

// ── Helpers ────────────────────────────────────────────────────────

/// Non-empty `ticket` value; an unparsable query string counts as no ticket.
fn login_ticket(params: Result<Query<LoginParams>, QueryRejection>) -> Option<ServiceTicket> {
    match params {
        Ok(Query(params)) => params.ticket.filter(|t| !t.as_str().is_empty()),
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring malformed login query");
            None
        }
    }
}
