use url::Url;

use crate::cas::CasConfig;
use crate::session::{Session, SessionKey};
use crate::types::{ServiceTicket, Username, ValidationResult};
use crate::validate::TicketValidator;

/// Where the login endpoint sends the browser next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginRedirect {
    /// Ticket validated; back to the application root.
    Home,
    /// No usable ticket; (re)start the CAS login.
    Cas(Url),
}

impl LoginRedirect {
    /// Resolve to a `Location` value, using `home` for [`LoginRedirect::Home`].
    #[must_use]
    pub fn location<'a>(&'a self, home: &'a str) -> &'a str {
        match self {
            Self::Home => home,
            Self::Cas(url) => url.as_str(),
        }
    }
}

/// CAS login/logout state machine.
///
/// Sole owner of the [`SessionKey::CasTicket`] and [`SessionKey::Username`]
/// session attributes.
pub struct CasAuthenticator<V> {
    config: CasConfig,
    validator: V,
}

impl<V: TicketValidator> CasAuthenticator<V> {
    #[must_use]
    pub fn new(config: CasConfig, validator: V) -> Self {
        Self { config, validator }
    }

    #[must_use]
    pub fn config(&self) -> &CasConfig {
        &self.config
    }

    /// Drive one request to the login endpoint.
    ///
    /// A `ticket` from the query string replaces whatever ticket the session
    /// held. A stored ticket that fails validation is dropped together with
    /// any recorded username, so the next CAS round trip starts clean.
    pub async fn login<S: Session>(
        &self,
        session: &mut S,
        ticket: Option<ServiceTicket>,
    ) -> LoginRedirect {
        if let Some(ticket) = ticket {
            session.set(SessionKey::CasTicket, ticket.into());
        }

        let Some(stored) = session.get(SessionKey::CasTicket) else {
            return self.to_cas_login();
        };

        match self.validator.validate(&ServiceTicket(stored)).await {
            ValidationResult::Valid { username } => {
                tracing::info!(username = %username, "CAS login successful");
                session.set(SessionKey::Username, username.into());
                tracing::debug!(location = "home", "Redirecting");
                LoginRedirect::Home
            }
            ValidationResult::Invalid => {
                session.remove(SessionKey::CasTicket);
                session.remove(SessionKey::Username);
                self.to_cas_login()
            }
        }
    }

    /// Forget the identity and point the browser at the CAS logout page.
    ///
    /// The stored ticket is left alone; CAS tickets are single-use, so it
    /// fails validation on the next login attempt.
    pub fn logout<S: Session>(&self, session: &mut S) -> Url {
        if let Some(username) = session.get(SessionKey::Username) {
            tracing::info!(username = %username, "Logging out");
            session.remove(SessionKey::Username);
        }
        let url = self.config.logout_url();
        tracing::debug!(location = %url, "Redirecting");
        url
    }

    /// Identity recorded in the session; `None` means anonymous.
    #[must_use]
    pub fn current_user<S: Session>(&self, session: &S) -> Option<Username> {
        session.get(SessionKey::Username).map(Username)
    }

    fn to_cas_login(&self) -> LoginRedirect {
        let url = self.config.login_url();
        tracing::debug!(location = %url, "Redirecting");
        LoginRedirect::Cas(url)
    }
}
