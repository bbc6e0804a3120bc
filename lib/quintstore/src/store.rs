//! API to access a reactive cache of linked-data documents.
//!
//! The entry point of the module is the [`QuintStore`] struct.

use crate::error::{FetchError, ParseError};
use quintstore_model::{Quint, QuintPattern};
use quintstore_storage::{CacheConfig, QuadCollection, QueryHandle, ReactiveQueryCache};
use quintstore_web::{
    DocumentFetcher, HttpDocumentFetcher, HttpFetcherConfig, LoadOutcome, LoaderConfig,
    NetworkLoader, RdfDocumentParser, RdfFormat, SessionContext,
};
use std::io::Read;
use std::sync::Arc;

/// Holds the configuration of a [QuintStore].
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    pub cache: CacheConfig,
    pub loader: LoaderConfig,
    pub http: HttpFetcherConfig,
}

/// A reactive cache of linked-data documents.
///
/// Cloning a [QuintStore] is cheap and yields a reference to the same cache. A store is created
/// once (e.g., at application start) and handed to every consumer that issues queries.
///
/// Usage example:
/// ```
/// use quintstore::model::{GraphName, NamedNode, Quad};
/// use quintstore::storage::QuadCollection;
/// use quintstore::QuintStore;
///
/// # tokio_test::block_on(async {
/// let store = QuintStore::new()?;
/// let a = NamedNode::new("http://example.com/a")?;
/// let p = NamedNode::new("http://example.com/p")?;
/// let quads = [Quad::new(a.clone(), p.clone(), a.clone(), GraphName::DefaultGraph)];
/// store.replace("http://example.com/d1", quads.into_iter().collect::<QuadCollection>());
///
/// let result = store
///     .query_from_network(Some(a.as_str()), Some(p.as_str()), None, None, Some("http://example.com/d1"))
///     .await;
/// assert_eq!(result.len(), 1);
///
/// // The handle is updated in place.
/// store.replace("http://example.com/d1", QuadCollection::new());
/// assert!(result.is_empty());
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// # }).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct QuintStore {
    loader: Arc<NetworkLoader>,
    parser: RdfDocumentParser,
}

impl QuintStore {
    /// Creates a [QuintStore] that fetches documents via HTTP.
    ///
    /// Equivalent to calling [Self::new_with_config] with the default settings.
    pub fn new() -> Result<QuintStore, FetchError> {
        Self::new_with_config(StoreConfig::default())
    }

    /// Creates a [QuintStore] that fetches documents via HTTP using the given `config`.
    pub fn new_with_config(config: StoreConfig) -> Result<QuintStore, FetchError> {
        let fetcher = HttpDocumentFetcher::new_with_config(config.http.clone())?;
        Ok(Self::new_with_fetcher(config, Arc::new(fetcher)))
    }

    /// Creates a [QuintStore] that fetches documents with the given `fetcher`.
    ///
    /// The HTTP settings of `config` are ignored.
    pub fn new_with_fetcher(config: StoreConfig, fetcher: Arc<dyn DocumentFetcher>) -> QuintStore {
        let parser = RdfDocumentParser::default();
        let cache = Arc::new(ReactiveQueryCache::new_with_config(config.cache));
        let loader = NetworkLoader::new(cache, fetcher, Arc::new(parser), config.loader);
        Self {
            loader: Arc::new(loader),
            parser,
        }
    }

    /// Returns a reference to the underlying [NetworkLoader].
    pub fn loader(&self) -> &NetworkLoader {
        &self.loader
    }

    /// Returns a reference to the underlying [ReactiveQueryCache].
    pub fn cache(&self) -> &ReactiveQueryCache {
        self.loader.cache()
    }

    /// Returns the live result of a pattern query, fetching `document` if it is not yet present.
    ///
    /// `None` is a wildcard. If `document` is `None`, the query is evaluated against all loaded
    /// documents and nothing is fetched.
    pub async fn query_from_network(
        &self,
        subject: Option<&str>,
        predicate: Option<&str>,
        object: Option<&str>,
        graph: Option<&str>,
        document: Option<&str>,
    ) -> QueryHandle {
        let pattern = QuintPattern::new(subject, predicate, object, graph, document);
        self.query_pattern_from_network(&pattern).await
    }

    /// Same as [Self::query_from_network], taking a [QuintPattern].
    pub async fn query_pattern_from_network(&self, pattern: &QuintPattern) -> QueryHandle {
        self.loader.query_reactive_from_network(pattern).await
    }

    /// Returns the live result of a pattern query without fetching anything.
    pub fn query_reactive(&self, pattern: &QuintPattern) -> QueryHandle {
        self.cache().query_reactive(pattern)
    }

    /// Evaluates a pattern query against the current content and returns a snapshot of the
    /// result. The query is not memoized.
    pub fn query(&self, pattern: &QuintPattern) -> Vec<Quint> {
        self.cache().query(pattern)
    }

    /// Fetches `document` and replaces its content. Failures are logged, not returned.
    pub async fn load_from_network(&self, document: &str) -> LoadOutcome {
        self.loader.load_from_network(document).await
    }

    /// Returns whether `document` is present. Fragments are ignored.
    pub fn has(&self, document: &str) -> bool {
        self.cache().has(document)
    }

    /// Replaces the content of `document` and updates all handles scoped to it.
    pub fn replace(&self, document: &str, quads: impl Into<QuadCollection>) {
        self.cache().replace(document, quads.into());
    }

    /// Parses the content of `reader` and replaces the content of `document` with it.
    ///
    /// Relative IRIs are resolved against `document`. The content is left unchanged if parsing
    /// fails.
    pub fn load_from_reader(
        &self,
        document: &str,
        format: RdfFormat,
        reader: impl Read,
    ) -> Result<(), ParseError> {
        let quads = self.parser.parse_reader(format, reader, document)?;
        self.replace(document, quads);
        Ok(())
    }

    /// Removes all documents and empties every handle. Handles stay valid.
    pub fn clear(&self) {
        self.cache().clear();
    }

    /// Returns the session used for fetching documents.
    pub fn session(&self) -> SessionContext {
        self.loader.session()
    }

    /// Replaces the session used for fetching documents, e.g., after a login.
    pub fn set_session(&self, session: SessionContext) {
        self.loader.set_session(session);
    }

    /// Returns the normalized identifiers of all present documents.
    pub fn document_ids(&self) -> Vec<String> {
        self.cache().document_ids()
    }
}
