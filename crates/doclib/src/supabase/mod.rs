//! Shared HTTP client for the Supabase backend.
//!
//! Storage objects go through `/storage/v1`, table rows through the
//! PostgREST endpoint at `/rest/v1`. Both authenticate with the project's
//! anon key sent as `apikey` and as a bearer token.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, Url};
use secrecy::{ExposeSecret, SecretString};

mod error;

pub use error::RemoteError;

/// Bucket holding every uploaded PDF.
pub const BUCKET: &str = "pdfs";

/// Table holding document metadata.
pub const TABLE: &str = "pdf_documents";

/// Default connect timeout for HTTP requests (10 seconds).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default request timeout for HTTP requests (60 seconds; uploads can be large).
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Maximum length of an error body kept in error messages.
const MAX_ERROR_BODY_LENGTH: usize = 200;

/// Connection to one Supabase project.
///
/// Construction never fails on missing values: an unconfigured client is
/// built with empty strings and every request reports
/// [`RemoteError::NotConfigured`].
#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    anon_key: SecretString,
}

impl std::fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("base_url", &crate::sanitize::redact_url(&self.base_url))
            .field("anon_key", &"****")
            .finish()
    }
}

impl SupabaseClient {
    pub fn new(base_url: impl Into<String>, anon_key: SecretString) -> Result<Self, RemoteError> {
        let http = Client::builder()
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()
            .map_err(RemoteError::Client)?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key,
        })
    }

    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty() && !self.anon_key.expose_secret().is_empty()
    }

    /// Builds `<base>/<segments...>`, percent-encoding each segment.
    ///
    /// A segment containing `/` is split so storage paths keep their
    /// directory structure.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, RemoteError> {
        if !self.is_configured() {
            return Err(RemoteError::NotConfigured);
        }

        let mut url = Url::parse(&self.base_url)
            .map_err(|e| RemoteError::InvalidEndpoint(format!("{}: {}", self.base_url, e)))?;
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                RemoteError::InvalidEndpoint(format!("{} cannot be a base URL", self.base_url))
            })?;
            path.pop_if_empty();
            for segment in segments {
                path.extend(segment.split('/'));
            }
        }
        Ok(url)
    }

    /// Same as [`endpoint`](Self::endpoint) but infallible, for URLs that
    /// are only displayed. Returns an empty string when unconfigured.
    pub fn display_endpoint(&self, segments: &[&str]) -> String {
        self.endpoint(segments)
            .map(|u| u.to_string())
            .unwrap_or_default()
    }

    pub(crate) fn request(&self, method: reqwest::Method, url: Url) -> RequestBuilder {
        let key = self.anon_key.expose_secret();
        self.http
            .request(method, url)
            .header("apikey", key)
            .bearer_auth(key)
    }

    /// Sends the request and turns non-2xx responses into [`RemoteError::Status`].
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, RemoteError> {
        let response = request.send().await.map_err(RemoteError::Request)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(RemoteError::Status {
            status: status.as_u16(),
            body: truncate_body(&body),
        })
    }
}

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LENGTH {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY_LENGTH;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... (truncated)", &body[..end])
}
