use crate::config::HttpFetcherConfig;
use crate::error::FetchError;
use crate::session::SessionContext;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Request};
use tracing::debug;

/// The raw response of a document fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedDocument {
    pub data: Vec<u8>,
    /// The `Content-Type` of the response, if the server sent one.
    pub content_type: Option<String>,
}

impl FetchedDocument {
    pub fn new(data: impl Into<Vec<u8>>, content_type: Option<&str>) -> Self {
        Self {
            data: data.into(),
            content_type: content_type.map(ToOwned::to_owned),
        }
    }
}

/// Fetches documents from the network on behalf of a session.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetches `document`. Fails on network, authorization and HTTP errors.
    async fn fetch(
        &self,
        document: &str,
        session: &SessionContext,
    ) -> Result<FetchedDocument, FetchError>;
}

/// A [DocumentFetcher] that performs (authenticated) HTTP GET requests.
#[derive(Debug, Clone)]
pub struct HttpDocumentFetcher {
    client: Client,
    config: HttpFetcherConfig,
}

impl HttpDocumentFetcher {
    /// Creates a fetcher with the default configuration.
    pub fn new() -> Result<Self, FetchError> {
        Self::new_with_config(HttpFetcherConfig::default())
    }

    pub fn new_with_config(config: HttpFetcherConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpFetcherConfig {
        &self.config
    }

    /// Builds the request for `document`, including the authorization headers of `session`.
    pub fn request(
        &self,
        document: &str,
        session: &SessionContext,
    ) -> Result<Request, FetchError> {
        let mut builder = self
            .client
            .get(document)
            .header(ACCEPT, self.config.accept.as_str());

        let headers = session
            .authorization_headers("GET", document)
            .map_err(|source| FetchError::Authorization {
                document: document.to_owned(),
                source,
            })?;
        if let Some(headers) = headers {
            builder = builder.header(AUTHORIZATION, headers.authorization);
            if let Some(proof) = headers.dpop {
                builder = builder.header("DPoP", proof);
            }
        }

        builder.build().map_err(|source| FetchError::Transport {
            document: document.to_owned(),
            source,
        })
    }
}

#[async_trait]
impl DocumentFetcher for HttpDocumentFetcher {
    async fn fetch(
        &self,
        document: &str,
        session: &SessionContext,
    ) -> Result<FetchedDocument, FetchError> {
        let transport = |source| FetchError::Transport {
            document: document.to_owned(),
            source,
        };

        let request = self.request(document, session)?;
        let response = self.client.execute(request).await.map_err(transport)?;
        if !response.status().is_success() {
            return Err(FetchError::Status {
                document: document.to_owned(),
                status: response.status(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned);
        let data = response.bytes().await.map_err(transport)?.to_vec();
        debug!(document, bytes = data.len(), "Fetched document");

        Ok(FetchedDocument { data, content_type })
    }
}
