//! Authentication primitives for Kraken's REST API
//!
//! This crate holds everything a private (account-scoped) request needs before
//! it goes on the wire: the API credentials, a per-process nonce source and the
//! HMAC-SHA512 request signature.
//!
//! # Example
//!
//! ```no_run
//! use kraken_auth::{Credentials, RequestSigner};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load credentials from environment
//!     let creds = Credentials::from_env()?;
//!
//!     // One signer per request: it owns a fresh nonce
//!     let signer = RequestSigner::new(&creds, "/0/private/Balance");
//!     let body = format!("nonce={}", signer.nonce());
//!     let signature = signer.sign(&body);
//!     println!("API-Sign: {}", signature);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Nonces
//!
//! Kraken rejects any private request whose nonce is not strictly greater than
//! the last one it accepted for the same key. [`NonceSource`] only guarantees
//! that values handed out inside one process increase; requests issued
//! concurrently can still reach the server out of order, and a wall clock that
//! moves backwards across restarts is not detected. Both are the caller's
//! concern.

mod credentials;
mod error;
mod nonce;
mod signature;

pub use credentials::{Credentials, RequestSigner};
pub use error::{AuthError, AuthResult};
pub use nonce::NonceSource;
pub use signature::sign;
