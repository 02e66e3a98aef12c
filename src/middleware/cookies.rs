use axum_extra::extract::PrivateCookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use crate::session::{Session, SessionKey};

/// Browser-session cookie holding one session attribute.
fn session_cookie(key: SessionKey, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((key.as_str(), value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

/// Create removal cookie for a session attribute.
fn clear_session_cookie(key: SessionKey) -> Cookie<'static> {
    Cookie::build((key.as_str(), ""))
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}

/// [`Session`] stored as one encrypted cookie per key.
///
/// Writes accumulate in the jar; hand it back to axum with
/// [`into_jar`](CookieSession::into_jar) so the changes reach the browser.
pub(super) struct CookieSession {
    jar: PrivateCookieJar,
    secure: bool,
}

impl CookieSession {
    pub(super) fn new(jar: PrivateCookieJar, secure: bool) -> Self {
        Self { jar, secure }
    }

    pub(super) fn into_jar(self) -> PrivateCookieJar {
        self.jar
    }
}

impl Session for CookieSession {
    fn get(&self, key: SessionKey) -> Option<String> {
        self.jar.get(key.as_str()).map(|c| c.value().to_string())
    }

    fn set(&mut self, key: SessionKey, value: String) {
        self.jar = self.jar.clone().add(session_cookie(key, value, self.secure));
    }

    fn remove(&mut self, key: SessionKey) {
        self.jar = self.jar.clone().remove(clear_session_cookie(key));
    }
}
