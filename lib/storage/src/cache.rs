use crate::collection::QuadCollection;
use crate::document_store::DocumentStore;
use crate::handle::QueryHandle;
use quintstore_model::{normalize_document_id, QueryScope, Quint, QuintPattern};
use rustc_hash::FxHashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

type QueryBucket = FxHashMap<QuintPattern, QueryHandle>;

/// Configures a [ReactiveQueryCache].
#[derive(Debug, Clone, Default)]
pub struct CacheConfig {
    /// Whether replacing a document also re-evaluates the queries over all documents.
    ///
    /// By default, only the queries scoped to the replaced document are re-evaluated.
    pub refresh_union_queries: bool,
}

/// A [DocumentStore] that memoizes query results as [QueryHandle]s.
///
/// Querying the same pattern twice yields the same handle. Whenever a document is replaced, all
/// memoized queries scoped to that document are re-evaluated and their handles are updated in
/// place. Thus, the cost of a query is paid once per distinct pattern, and the cost of an update
/// is proportional to the number of patterns registered for the replaced document.
#[derive(Debug, Default)]
pub struct ReactiveQueryCache {
    config: CacheConfig,
    state: RwLock<CacheState>,
}

#[derive(Debug, Default)]
struct CacheState {
    documents: DocumentStore,
    queries: FxHashMap<QueryScope, QueryBucket>,
}

impl ReactiveQueryCache {
    /// Creates an empty [ReactiveQueryCache] with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty [ReactiveQueryCache] with the given `config`.
    pub fn new_with_config(config: CacheConfig) -> Self {
        Self {
            config,
            state: RwLock::default(),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Returns whether the document identified by `document` is present.
    pub fn has(&self, document: &str) -> bool {
        self.read().documents.has(document)
    }

    /// Evaluates `pattern` without memoizing the result.
    pub fn query(&self, pattern: &QuintPattern) -> Vec<Quint> {
        self.read().documents.query(pattern)
    }

    /// Returns the memoized handle for `pattern`, evaluating the pattern if it has not been
    /// queried before.
    ///
    /// An already memoized handle is returned as is. Its result only changes when the underlying
    /// document is replaced.
    pub fn query_reactive(&self, pattern: &QuintPattern) -> QueryHandle {
        let scope = pattern.scope();
        if let Some(handle) = self
            .read()
            .queries
            .get(&scope)
            .and_then(|bucket| bucket.get(pattern))
        {
            return handle.clone();
        }

        let mut state = self.write();
        let CacheState { documents, queries } = &mut *state;
        queries
            .entry(scope)
            .or_default()
            .entry(pattern.clone())
            .or_insert_with(|| {
                debug!(?pattern, "Memoizing query");
                QueryHandle::new(pattern.clone(), documents.query(pattern))
            })
            .clone()
    }

    /// Replaces the content of `document` and re-evaluates every query scoped to it.
    ///
    /// The replacement and the re-evaluation happen atomically with respect to other operations
    /// on this cache.
    pub fn replace(&self, document: &str, quads: QuadCollection) {
        let document = normalize_document_id(document);
        let mut state = self.write();
        let CacheState { documents, queries } = &mut *state;
        documents.replace(document, quads);

        let scope = QueryScope::Document(document.to_owned());
        let mut refreshed = refresh(documents, queries.get(&scope));
        if self.config.refresh_union_queries {
            refreshed += refresh(documents, queries.get(&QueryScope::AllDocuments));
        }
        debug!(document, refreshed, "Replaced document");
    }

    /// Removes all documents and empties the result of every handle.
    ///
    /// The handles themselves are kept, as consumers may still hold them. Querying a known pattern
    /// afterwards returns the same (now empty) handle.
    pub fn clear(&self) {
        let mut state = self.write();
        state.documents.clear();
        for handle in state.queries.values().flat_map(QueryBucket::values) {
            handle.clear_result();
        }
    }

    /// Returns the number of memoized queries across all scopes.
    pub fn handle_count(&self) -> usize {
        self.read().queries.values().map(QueryBucket::len).sum()
    }

    /// Returns the normalized identifiers of all present documents.
    pub fn document_ids(&self) -> Vec<String> {
        self.read()
            .documents
            .document_ids()
            .map(ToOwned::to_owned)
            .collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, CacheState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CacheState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Re-evaluates every query of `bucket` and returns the number of updated handles.
fn refresh(documents: &DocumentStore, bucket: Option<&QueryBucket>) -> usize {
    let Some(bucket) = bucket else {
        return 0;
    };
    for handle in bucket.values() {
        handle.replace_result(documents.query(handle.pattern()));
    }
    bucket.len()
}
