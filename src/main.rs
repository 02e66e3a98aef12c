//! CAS login front-end
//!
//! Serves `/`, `/login/` and `/logout/`, delegating authentication to a
//! Central Authentication Service.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cas_login::middleware::{CasAuthConfig, cas_routes};
use cas_login::{CasClient, CasConfig};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "cas-login")]
#[command(about = "Minimal web front-end authenticating through CAS")]
struct Args {
    /// Address to listen on
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "CAS_LOGIN_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short = 'P', long, default_value_t = 5000, env = "CAS_LOGIN_PORT")]
    port: u16,

    /// Verbose logging and non-secure cookies (for plain-http development)
    #[arg(
        short = 'D',
        long,
        env = "DEBUG",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    debug: bool,

    /// Base URL of the CAS server, e.g. https://cas.example.edu
    #[arg(short = 'c', long, env = "CAS_SERVER")]
    cas_server: String,

    /// Secret used to derive the session cookie key
    #[arg(short = 'S', long, env = "SECRET_KEY", hide_env_values = true)]
    secret_key: Option<String>,

    /// Public URL of this app's /login/ route [default: http://HOST:PORT/login/]
    #[arg(long, env = "CAS_SERVICE_URL")]
    service_url: Option<String>,

    /// Seconds to wait for the CAS validate endpoint
    #[arg(long, default_value_t = 5, env = "CAS_VALIDATE_TIMEOUT")]
    validate_timeout: u64,
}

impl Args {
    /// `--service-url`, or this server's own `/login/` route.
    fn service_url(&self) -> String {
        self.service_url
            .clone()
            .unwrap_or_else(|| format!("http://{}:{}/login/", self.host, self.port))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("cas_login={log_level},info"))),
        )
        .init();

    let cas = CasConfig::parse(&args.cas_server, &args.service_url())
        .context("invalid CAS configuration")?;

    let secure_cookies = cas.service_url().scheme() == "https" && !args.debug;

    let mut config = CasAuthConfig::new(cas.clone()).with_secure_cookies(secure_cookies);
    match args.secret_key.as_deref() {
        Some(secret) => config = config.with_secret_key(secret),
        None => warn!("SECRET_KEY not set; sessions will not survive a restart"),
    }

    let client =
        CasClient::new(cas.clone()).with_timeout(Duration::from_secs(args.validate_timeout));
    let app = cas_routes(config, client);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        addr = %addr,
        cas_server = %cas.server_url(),
        service_url = %cas.service_url(),
        secure_cookies,
        "Starting CAS login front-end"
    );

    axum::serve(listener, app)
        .await
        .context("server error")?;

    Ok(())
}
