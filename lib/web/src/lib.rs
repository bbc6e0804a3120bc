//! Loads linked-data documents from the network into the
//! [ReactiveQueryCache](quintstore_storage::ReactiveQueryCache).
//!
//! The [NetworkLoader] fetches documents with a [DocumentFetcher] on behalf of a
//! [SessionContext] and turns them into quads with a [DocumentParser]. The default
//! implementations are [HttpDocumentFetcher] and [RdfDocumentParser].

mod config;
pub mod error;
mod fetch;
mod loader;
mod parse;
mod session;

pub use config::{HttpFetcherConfig, LoaderConfig, HTTP_TIMEOUT, RDF_ACCEPT};
pub use fetch::{DocumentFetcher, FetchedDocument, HttpDocumentFetcher};
pub use loader::{LoadOutcome, NetworkLoader};
pub use parse::{DocumentParser, RdfDocumentParser};
pub use session::{AuthorizationHeaders, Credentials, DpopProofProvider, SessionContext};

// Re-export the format type of the parser.
pub use oxrdfio::RdfFormat;
