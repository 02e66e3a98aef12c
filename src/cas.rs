use url::Url;

use crate::error::Error;
use crate::types::ServiceTicket;

const LOGIN_PATH: &str = "/cas/";
const LOGOUT_PATH: &str = "/cas/logout";
const VALIDATE_PATH: &str = "/cas/validate";

/// CAS server endpoints plus this application's own callback URL.
///
/// Both URLs are parsed at construction, so a malformed CAS address is a
/// startup failure rather than a request-time one.
///
/// ```rust,ignore
/// use cas_login::CasConfig;
///
/// let config = CasConfig::new(
///     "https://cas.example.edu".parse()?,
///     "https://app.example.edu/login/".parse()?,
/// );
/// let login = config.login_url();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct CasConfig {
    pub(crate) server_url: Url,
    pub(crate) service_url: Url,
}

impl CasConfig {
    /// Create a configuration from already-parsed URLs.
    #[must_use]
    pub fn new(server_url: Url, service_url: Url) -> Self {
        Self {
            server_url,
            service_url,
        }
    }

    /// Parse both URLs from strings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if either value is not an absolute URL.
    pub fn parse(server_url: &str, service_url: &str) -> Result<Self, Error> {
        let server_url = parse_absolute("CAS server URL", server_url)?;
        let service_url = parse_absolute("service URL", service_url)?;
        Ok(Self::new(server_url, service_url))
    }

    /// Base address of the CAS server.
    #[must_use]
    pub fn server_url(&self) -> &Url {
        &self.server_url
    }

    /// This application's `/login/` URL, as registered with CAS.
    #[must_use]
    pub fn service_url(&self) -> &Url {
        &self.service_url
    }

    /// `{server}/cas/?service={service}`
    #[must_use]
    pub fn login_url(&self) -> Url {
        self.endpoint(LOGIN_PATH, &[("service", self.service_url.as_str())])
    }

    /// `{server}/cas/logout?url={service}`
    #[must_use]
    pub fn logout_url(&self) -> Url {
        self.endpoint(LOGOUT_PATH, &[("url", self.service_url.as_str())])
    }

    /// `{server}/cas/validate?service={service}&ticket={ticket}`
    #[must_use]
    pub fn validate_url(&self, ticket: &ServiceTicket) -> Url {
        self.endpoint(
            VALIDATE_PATH,
            &[
                ("service", self.service_url.as_str()),
                ("ticket", ticket.as_str()),
            ],
        )
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.server_url.clone();
        url.set_path(path);
        let query = params
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        url.set_query(Some(&query));
        url.set_fragment(None);
        url
    }
}

fn parse_absolute(what: &str, value: &str) -> Result<Url, Error> {
    let url = Url::parse(value).map_err(|e| Error::Config(format!("{what} {value:?}: {e}")))?;
    if url.cannot_be_a_base() || url.host().is_none() {
        return Err(Error::Config(format!(
            "{what} {value:?} must be an absolute http(s) URL"
        )));
    }
    Ok(url)
}
