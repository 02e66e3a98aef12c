//! Plug-and-play CAS login routes for Axum.
//!
//! Mounts `GET /`, `GET /login/` and `GET /logout/`, keeping the session in
//! encrypted private cookies.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use cas_login::middleware::{CasAuthConfig, cas_routes};
//! use cas_login::{CasClient, CasConfig};
//!
//! let cas = CasConfig::parse("https://cas.example.edu", "https://app.example.edu/login/")?;
//! let config = CasAuthConfig::new(cas.clone()).with_secret_key(&secret);
//!
//! let app = axum::Router::new().merge(cas_routes(config, CasClient::new(cas)));
//! ```

mod config;
mod cookies;
mod extractor;
mod routes;
mod state;

pub use config::CasAuthConfig;
pub use extractor::CurrentUser;
pub use routes::cas_routes;
pub use state::CasState;

/// Re-export cookie key type for builder API.
pub use axum_extra::extract::cookie::Key as CookieKey;
