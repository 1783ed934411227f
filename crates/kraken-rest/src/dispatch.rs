//! Request dispatch: build, sign, send, unwrap

use kraken_auth::{Credentials, RequestSigner};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::envelope;
use crate::error::{RestError, RestResult};
use crate::method::Method;
use crate::params::Params;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_MEDIA_TYPE: &str = "application/json";

/// Turns a [`Method`] and its [`Params`] into one HTTP round trip
///
/// Private methods get a fresh nonce as their first parameter plus `API-Key`
/// and `API-Sign` headers. Every request carries the configured User-Agent.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn HttpTransport>,
    credentials: Option<Arc<Credentials>>,
    base_url: String,
    user_agent: String,
}

impl Dispatcher {
    /// Create a dispatcher
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        credentials: Option<Credentials>,
        base_url: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            credentials: credentials.map(Arc::new),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_agent: user_agent.into(),
        }
    }

    /// Whether private methods can be called
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the HTTP request for a call without sending it
    ///
    /// # Errors
    /// [`RestError::AuthRequired`] for a private method when no credentials
    /// are configured.
    pub fn build_request(&self, method: Method, mut params: Params) -> RestResult<HttpRequest> {
        let path = method.path();
        let url = format!("{}{}", self.base_url, path);

        let mut headers = vec![
            ("User-Agent".to_string(), self.user_agent.clone()),
            ("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string()),
        ];

        if !method.is_private() {
            return Ok(HttpRequest {
                url,
                headers,
                body: params.encode()?,
            });
        }

        let credentials = self.credentials.as_deref().ok_or(RestError::AuthRequired)?;
        let signer = RequestSigner::new(credentials, path);

        params.prepend("nonce", signer.nonce());
        let body = params.encode()?;

        headers.push(("API-Key".to_string(), signer.api_key().to_string()));
        headers.push(("API-Sign".to_string(), signer.sign(&body)));

        Ok(HttpRequest { url, headers, body })
    }

    /// Call `method` and decode its result into `T`
    #[instrument(skip(self, params), fields(private = method.is_private()))]
    pub async fn execute<T: DeserializeOwned>(&self, method: Method, params: Params) -> RestResult<T> {
        let request = self.build_request(method, params)?;
        debug!(url = %request.url, "Dispatching request");

        let response = self.transport.post(request).await?;
        debug!(status = response.status, len = response.body.len(), "Response received");

        check_content_type(&response)?;
        envelope::decode(&response.body)
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

/// Reject anything that is not `application/json`, ignoring parameters
fn check_content_type(response: &HttpResponse) -> RestResult<()> {
    let content_type = response.header("Content-Type").unwrap_or_default();
    let media_type = content_type.split(';').next().unwrap_or_default().trim();

    if media_type.eq_ignore_ascii_case(JSON_MEDIA_TYPE) {
        Ok(())
    } else {
        warn!(content_type, status = response.status, "Rejecting non-JSON response");
        Err(RestError::UnexpectedContentType {
            content_type: content_type.to_string(),
        })
    }
}
