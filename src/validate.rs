use std::future::Future;
use std::time::Duration;

use crate::cas::CasConfig;
use crate::error::Error;
use crate::types::{ServiceTicket, Username, ValidationResult};

/// Default upper bound on a single validate round trip.
pub const DEFAULT_VALIDATE_TIMEOUT: Duration = Duration::from_secs(5);

/// Checks a service ticket with the CAS server.
///
/// Implementations never fail: transport and protocol problems are logged
/// and reported as [`ValidationResult::Invalid`].
pub trait TicketValidator: Send + Sync + 'static {
    fn validate(&self, ticket: &ServiceTicket) -> impl Future<Output = ValidationResult> + Send;
}

/// CAS 1.0 `/cas/validate` client.
pub struct CasClient {
    config: CasConfig,
    http: reqwest::Client,
    timeout: Duration,
}

impl CasClient {
    #[must_use]
    pub fn new(config: CasConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            timeout: DEFAULT_VALIDATE_TIMEOUT,
        }
    }

    /// Use a custom HTTP client (for connection pool reuse or testing).
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    /// Override the per-request timeout (default 5 seconds).
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn config(&self) -> &CasConfig {
        &self.config
    }

    /// Fetch and parse the validate response, surfacing every failure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure or timeout, and
    /// [`Error::Protocol`] on a non-2xx status or a malformed body.
    pub async fn try_validate(&self, ticket: &ServiceTicket) -> Result<ValidationResult, Error> {
        let url = self.config.validate_url(ticket);
        tracing::debug!(url = %url, "Making CAS validate request");

        let response = self
            .http
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Protocol(format!("validate returned HTTP {status}")));
        }

        let body = response.bytes().await?;
        let body = std::str::from_utf8(&body)
            .map_err(|e| Error::Protocol(format!("response is not UTF-8: {e}")))?;

        parse_validation_response(body)
    }
}

impl TicketValidator for CasClient {
    async fn validate(&self, ticket: &ServiceTicket) -> ValidationResult {
        tracing::debug!(ticket = %ticket, "Validating CAS ticket");

        match self.try_validate(ticket).await {
            Ok(result) => {
                tracing::debug!(valid = result.is_valid(), "CAS validation finished");
                result
            }
            Err(e) => {
                let url = self.config.validate_url(ticket);
                match e {
                    Error::Protocol(_) => {
                        tracing::error!(error = %e, ticket = %ticket, url = %url, "CAS returned unexpected result");
                    }
                    _ => {
                        tracing::warn!(error = %e, ticket = %ticket, url = %url, "CAS validate request failed");
                    }
                }
                ValidationResult::Invalid
            }
        }
    }
}

/// Parses a CAS 1.0 validate body: `yes\n<username>\n` or `no\n\n`.
///
/// The body must consist of exactly two lines. A trailing newline on the
/// second line is optional.
///
/// A `yes` with a blank second line is rejected on purpose, stricter than
/// plain CAS 1.0 clients that would record an empty identity.
///
/// # Errors
///
/// Returns [`Error::Protocol`] when the line count is not two, or when the
/// ticket is accepted without a username.
pub fn parse_validation_response(body: &str) -> Result<ValidationResult, Error> {
    let lines: Vec<&str> = body.split_inclusive('\n').collect();
    let [verdict, username] = lines.as_slice() else {
        return Err(Error::Protocol(format!(
            "expected 2 lines, got {}",
            lines.len()
        )));
    };

    if verdict.trim() != "yes" {
        return Ok(ValidationResult::Invalid);
    }

    let username = username.trim();
    if username.is_empty() {
        return Err(Error::Protocol("ticket accepted without a username".into()));
    }

    Ok(ValidationResult::Valid {
        username: Username::from(username),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::get;

    #[test]
    fn test_parse_yes() {
        let result = parse_validation_response("yes\nalice\n").unwrap();
        assert_eq!(
            result,
            ValidationResult::Valid {
                username: "alice".into()
            }
        );
    }

    #[test]
    fn test_parse_yes_without_trailing_newline() {
        let result = parse_validation_response("yes\nalice").unwrap();
        assert_eq!(result.username().map(Username::as_str), Some("alice"));
    }

    #[test]
    fn test_parse_crlf() {
        let result = parse_validation_response("yes\r\nbob\r\n").unwrap();
        assert_eq!(result.username().map(Username::as_str), Some("bob"));
    }

    #[test]
    fn test_parse_no() {
        assert_eq!(
            parse_validation_response("no\n\n").unwrap(),
            ValidationResult::Invalid
        );
    }

    #[test]
    fn test_parse_verdict_is_case_sensitive() {
        assert_eq!(
            parse_validation_response("YES\nalice\n").unwrap(),
            ValidationResult::Invalid
        );
    }

    #[test]
    fn test_parse_malformed() {
        for body in ["", "yes\n", "yes", "yes\nalice\nextra\n", "<html>\n<body>\n</body>\n"] {
            assert!(
                matches!(parse_validation_response(body), Err(Error::Protocol(_))),
                "body {body:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_yes_with_blank_username() {
        for body in ["yes\n\n", "yes\n  \n"] {
            assert!(
                matches!(parse_validation_response(body), Err(Error::Protocol(_))),
                "body {body:?} should be rejected"
            );
        }
    }

    /// Serves `app` on an ephemeral port and returns a config pointing at it.
    async fn serve(app: Router) -> CasConfig {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        CasConfig::parse(&format!("http://{addr}"), "http://app.test/login/").unwrap()
    }

    #[tokio::test]
    async fn test_validate_against_server() {
        let app = Router::new().route(
            "/cas/validate",
            get(|axum::extract::RawQuery(query): axum::extract::RawQuery| async move {
                if query.as_deref() == Some("service=http%3A%2F%2Fapp.test%2Flogin%2F&ticket=T1") {
                    "yes\nalice\n"
                } else {
                    "no\n\n"
                }
            }),
        );
        let client = CasClient::new(serve(app).await);

        assert_eq!(
            client.validate(&"T1".into()).await,
            ValidationResult::Valid {
                username: "alice".into()
            }
        );
        assert_eq!(client.validate(&"T2".into()).await, ValidationResult::Invalid);
    }

    #[tokio::test]
    async fn test_validate_malformed_body_is_invalid() {
        let app = Router::new().route("/cas/validate", get(|| async { "yes\n" }));
        let client = CasClient::new(serve(app).await);

        assert_eq!(client.validate(&"T1".into()).await, ValidationResult::Invalid);
    }

    #[tokio::test]
    async fn test_validate_non_utf8_body_is_invalid() {
        let app = Router::new().route(
            "/cas/validate",
            get(|| async { vec![0xffu8, 0xfe, b'\n', 0x80, b'\n'] }),
        );
        let client = CasClient::new(serve(app).await);

        let err = client.try_validate(&"T1".into()).await.unwrap_err();
        assert!(matches!(err, Error::Protocol(_)));
        assert_eq!(client.validate(&"T1".into()).await, ValidationResult::Invalid);
    }

    #[tokio::test]
    async fn test_validate_error_status_is_invalid() {
        let app = Router::new().route(
            "/cas/validate",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "yes\nalice\n") }),
        );
        let client = CasClient::new(serve(app).await);

        assert_eq!(client.validate(&"T1".into()).await, ValidationResult::Invalid);
    }

    #[tokio::test]
    async fn test_validate_timeout_is_invalid() {
        let app = Router::new().route(
            "/cas/validate",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "yes\nalice\n"
            }),
        );
        let client = CasClient::new(serve(app).await).with_timeout(Duration::from_millis(100));

        let err = client.try_validate(&"T1".into()).await.unwrap_err();
        assert!(matches!(err, Error::Http(ref e) if e.is_timeout()));
        assert_eq!(client.validate(&"T1".into()).await, ValidationResult::Invalid);
    }

    #[tokio::test]
    async fn test_validate_connection_refused_is_invalid() {
        // Bind then drop to get a port nobody is listening on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config =
            CasConfig::parse(&format!("http://{addr}"), "http://app.test/login/").unwrap();
        let client = CasClient::new(config);

        assert_eq!(client.validate(&"T1".into()).await, ValidationResult::Invalid);
    }
}
