//! Authentication module
//!
//! Holds the application credentials and exchanges them for a
//! short-lived session token at the authorization endpoint.
//!
//! The `SessionProvider` trait is the seam the report fetcher uses, so a
//! caller that already holds a session token can skip the exchange.

mod authenticator;
mod types;

pub use authenticator::{Authenticator, SessionProvider, StaticSession};
pub use types::{Credentials, SessionToken};

#[cfg(test)]
mod tests;
