#![doc = include_str!("../README.md")]

pub mod authenticator;
pub mod cas;
pub mod error;
#[cfg(feature = "middleware")]
pub mod middleware;
pub mod session;
pub mod types;
pub mod validate;

// Re-exports for convenient access
pub use authenticator::{CasAuthenticator, LoginRedirect};
pub use cas::CasConfig;
pub use error::Error;
pub use session::{MemorySession, Session, SessionKey};
pub use types::{ServiceTicket, Username, ValidationResult};
pub use validate::{
    CasClient, DEFAULT_VALIDATE_TIMEOUT, TicketValidator, parse_validation_response,
};
