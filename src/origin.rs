use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

/// Caller-supplied rewrite applied to produce the fetch target.
///
/// The transform runs on every origin fetch (both the blocking miss fetch
/// and background revalidation) and its output is never cached. Cache keys
/// are always derived from the untransformed request, so entries stay
/// stable even when the transform target changes.
pub type RequestTransform = Arc<dyn Fn(OriginRequest) -> OriginRequest + Send + Sync>;

/// A request to the origin content source.
#[derive(Debug, Clone)]
pub struct OriginRequest {
    /// Canonical request URL. Parsing through [`Url`] normalizes the textual
    /// form, so equal resources produce equal cache keys.
    pub url: Url,

    /// Headers forwarded to the origin.
    pub headers: HashMap<String, String>,
}

impl OriginRequest {
    /// Create a request for the given URL with no extra headers.
    pub fn new(url: Url) -> Self {
        OriginRequest {
            url,
            headers: HashMap::new(),
        }
    }

    /// Parse a URL string into a request.
    pub fn parse(url: &str) -> Result<Self, url::ParseError> {
        Ok(Self::new(Url::parse(url)?))
    }

    /// Add a header to the request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// The storage key for this request.
    ///
    /// Derived from the canonical URL of the request as constructed, before
    /// any [`RequestTransform`] has been applied.
    pub fn cache_key(&self) -> String {
        self.url.as_str().to_string()
    }
}

/// A response from the origin, with the body fully materialized as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl OriginResponse {
    /// Create a response with the given status and body and no headers.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        OriginResponse {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Add a header to the response.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Status is in the 2xx class.
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// Status is in the 4xx class.
    pub fn is_client_error(&self) -> bool {
        (400..=499).contains(&self.status)
    }
}
