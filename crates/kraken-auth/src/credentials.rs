//! Authentication credentials for Kraken API
//!
//! # Security
//!
//! Private keys are stored using the `secrecy` crate which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use secrecy::{ExposeSecret, SecretBox};
use tracing::warn;

use crate::error::{AuthError, AuthResult};
use crate::nonce::NonceSource;
use crate::signature;

/// API credentials for authenticated requests
///
/// Private keys are automatically zeroized when the Credentials are dropped,
/// preventing sensitive data from remaining in memory.
pub struct Credentials {
    /// API key (public)
    api_key: String,
    /// Private key (decoded from base64, zeroized on drop)
    private_key: SecretBox<Vec<u8>>,
}

impl Credentials {
    /// Create new credentials from API key and private key
    ///
    /// # Arguments
    /// * `api_key` - Your Kraken API key
    /// * `private_key` - Your private key (base64 encoded string)
    ///
    /// A private key that is not valid base64 is not rejected here: requests
    /// are signed with an empty key and Kraken answers `EAPI:Invalid key`.
    /// Use [`Credentials::try_new`] to catch the mistake locally.
    pub fn new(api_key: impl Into<String>, private_key: impl AsRef<str>) -> Self {
        let decoded = BASE64.decode(private_key.as_ref()).unwrap_or_else(|e| {
            warn!("Private key is not valid base64 ({}), signatures will be rejected", e);
            Vec::new()
        });

        Self {
            api_key: api_key.into(),
            private_key: SecretBox::new(Box::new(decoded)),
        }
    }

    /// Create credentials, rejecting a private key that is not valid base64
    pub fn try_new(api_key: impl Into<String>, private_key: impl AsRef<str>) -> AuthResult<Self> {
        let decoded = BASE64.decode(private_key.as_ref()).map_err(|e| {
            AuthError::InvalidCredentials(format!("Invalid base64 private key: {}", e))
        })?;

        Ok(Self {
            api_key: api_key.into(),
            private_key: SecretBox::new(Box::new(decoded)),
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `KRAKEN_API_KEY` and `KRAKEN_PRIVATE_KEY` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var("KRAKEN_API_KEY")
            .map_err(|_| AuthError::EnvVarNotSet("KRAKEN_API_KEY".to_string()))?;
        let private_key = std::env::var("KRAKEN_PRIVATE_KEY")
            .map_err(|_| AuthError::EnvVarNotSet("KRAKEN_PRIVATE_KEY".to_string()))?;

        Self::try_new(api_key, private_key)
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign a request for Kraken's API
    ///
    /// # Arguments
    /// * `path` - API endpoint path (e.g., "/0/private/Balance")
    /// * `nonce` - Nonce carried in `post_data`
    /// * `post_data` - URL-encoded POST body
    pub fn sign(&self, path: &str, nonce: &str, post_data: &str) -> String {
        signature::sign(path, post_data, nonce, self.private_key.expose_secret())
    }
}

impl Clone for Credentials {
    /// Clone credentials (creates new SecretBox with same content)
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            private_key: SecretBox::new(Box::new(self.private_key.expose_secret().clone())),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let visible: String = self.api_key.chars().take(8).collect();
        f.debug_struct("Credentials")
            .field("api_key", &format!("{}...", visible))
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// Signs one request
///
/// Holds the nonce drawn for that request so the same value ends up in the
/// POST body and in the signature.
#[derive(Debug)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
    path: String,
    nonce: String,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer with a nonce from the global source
    pub fn new(credentials: &'a Credentials, path: impl Into<String>) -> Self {
        Self::with_nonce_source(credentials, path, NonceSource::global())
    }

    /// Create a new request signer drawing its nonce from `source`
    pub fn with_nonce_source(
        credentials: &'a Credentials,
        path: impl Into<String>,
        source: &NonceSource,
    ) -> Self {
        Self {
            credentials,
            path: path.into(),
            nonce: source.next_string(),
        }
    }

    /// Get the nonce for this request
    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    /// Get the request path being signed
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Sign the request with the given POST data
    pub fn sign(&self, post_data: &str) -> String {
        self.credentials.sign(&self.path, &self.nonce, post_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIVATE_KEY: &str =
        "kQH5HW/8p1uGOVjbgWA7FunAmGO8lsSUXNsu3eow76sz84Q18fWxnyRzBHCd3pd5nE9qa99HAZtuZuj6F1huXg==";

    #[test]
    fn test_credentials_debug_redacts_key() {
        let creds = Credentials::new("test_api_key", "dGVzdF9wcml2YXRlX2tleQ==");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("test_private_key"));
        assert!(!debug.contains("dGVzdF9wcml2YXRlX2tleQ"));
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("test_api..."));
    }

    #[test]
    fn test_try_new_rejects_malformed_key() {
        let result = Credentials::try_new("key", "not base64!!");
        assert!(matches!(result, Err(AuthError::InvalidCredentials(_))));
    }

    #[test]
    fn test_new_accepts_malformed_key() {
        let creds = Credentials::new("key", "not base64!!");
        let signature = creds.sign("/0/private/Balance", "1", "nonce=1");
        let good = Credentials::new("key", PRIVATE_KEY).sign("/0/private/Balance", "1", "nonce=1");

        assert!(!signature.is_empty());
        assert_ne!(signature, good);
    }

    #[test]
    fn test_signing_consistency() {
        let creds = Credentials::new("API_KEY", PRIVATE_KEY);

        let signature = creds.sign("/0/private/Balance", "1616492376594", "nonce=1616492376594");
        assert!(BASE64.decode(&signature).is_ok());

        let signature2 = creds.sign("/0/private/Balance", "1616492376594", "nonce=1616492376594");
        assert_eq!(signature, signature2);
    }

    #[test]
    fn test_clone_signs_identically() {
        let creds = Credentials::new("API_KEY", PRIVATE_KEY);
        let cloned = creds.clone();
        assert_eq!(cloned.api_key(), "API_KEY");
        assert_eq!(
            creds.sign("/0/private/Balance", "1", "nonce=1"),
            cloned.sign("/0/private/Balance", "1", "nonce=1")
        );
    }

    #[test]
    fn test_request_signer_uses_own_nonce() {
        let creds = Credentials::new("API_KEY", PRIVATE_KEY);
        let source = NonceSource::new();
        let signer = RequestSigner::with_nonce_source(&creds, "/0/private/Balance", &source);
        let body = format!("nonce={}", signer.nonce());

        assert_eq!(signer.path(), "/0/private/Balance");
        assert_eq!(signer.api_key(), "API_KEY");
        assert_eq!(signer.sign(&body), creds.sign("/0/private/Balance", signer.nonce(), &body));
    }

    #[test]
    fn test_consecutive_signers_get_increasing_nonces() {
        let creds = Credentials::new("API_KEY", PRIVATE_KEY);
        let first: u64 = RequestSigner::new(&creds, "/0/private/Balance")
            .nonce()
            .parse()
            .unwrap();
        let second: u64 = RequestSigner::new(&creds, "/0/private/Balance")
            .nonce()
            .parse()
            .unwrap();
        assert!(second > first);
    }
}
