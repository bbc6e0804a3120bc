use std::time::Duration;

pub const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

/// The media types requested when fetching a document, in order of preference.
pub const RDF_ACCEPT: &str = "text/turtle, application/trig;q=0.9, application/n-quads;q=0.9, \
    application/n-triples;q=0.8, application/ld+json;q=0.7, application/rdf+xml;q=0.6, \
    text/n3;q=0.5";

/// Holds the configuration of a [NetworkLoader](crate::NetworkLoader).
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Upper bound for fetching a single document. A load that exceeds it fails and releases its
    /// in-flight marker, so the document can be requested again.
    pub fetch_timeout: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: HTTP_TIMEOUT,
        }
    }
}

/// Holds the configuration of an [HttpDocumentFetcher](crate::HttpDocumentFetcher).
#[derive(Debug, Clone)]
pub struct HttpFetcherConfig {
    /// Timeout of the underlying HTTP client.
    pub timeout: Duration,
    /// The `User-Agent` header.
    pub user_agent: String,
    /// The `Accept` header.
    pub accept: String,
}

impl Default for HttpFetcherConfig {
    fn default() -> Self {
        Self {
            timeout: HTTP_TIMEOUT,
            user_agent: concat!("quintstore/", env!("CARGO_PKG_VERSION")).to_owned(),
            accept: RDF_ACCEPT.to_owned(),
        }
    }
}
