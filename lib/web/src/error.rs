use oxrdfio::RdfParseError;
use quintstore_model::IriParseError;
use reqwest::StatusCode;
use std::error::Error;
use std::io;
use std::time::Duration;

/// An error raised while fetching a document.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FetchError {
    /// The HTTP client could not be created.
    #[error("Could not create the HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// The request could not be built or sent, or the body could not be read.
    #[error("Request to '{document}' failed: {source}")]
    Transport {
        document: String,
        #[source]
        source: reqwest::Error,
    },
    /// The server did not answer with a success status.
    #[error("Response code for '{document}' was not OK. Actual: {status}")]
    Status { document: String, status: StatusCode },
    /// The request did not complete in time.
    #[error("Fetching '{document}' timed out after {timeout:?}")]
    Timeout { document: String, timeout: Duration },
    /// The session could not authorize the request.
    #[error("Could not authorize the request to '{document}': {source}")]
    Authorization {
        document: String,
        #[source]
        source: Box<dyn Error + Send + Sync + 'static>,
    },
    #[error("{0}")]
    Other(#[source] Box<dyn Error + Send + Sync + 'static>),
}

/// An error raised while parsing a fetched document.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The content is not valid RDF.
    #[error(transparent)]
    Syntax(#[from] RdfParseError),
    /// The document identifier cannot be used as base IRI.
    #[error("Invalid base IRI '{iri}': {error}")]
    InvalidBaseIri {
        /// The IRI itself.
        iri: String,
        /// The parsing error.
        #[source]
        error: IriParseError,
    },
}

impl From<ParseError> for io::Error {
    #[inline]
    fn from(error: ParseError) -> Self {
        match error {
            ParseError::Syntax(error) => error.into(),
            ParseError::InvalidBaseIri { .. } => {
                Self::new(io::ErrorKind::InvalidInput, error.to_string())
            }
        }
    }
}

/// An error raised while loading a document from the network.
///
/// Load errors never reach the caller of the [NetworkLoader](crate::NetworkLoader). They are
/// logged and the document stays absent.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}
