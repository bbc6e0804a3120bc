use crate::config::LoaderConfig;
use crate::error::{FetchError, LoadError};
use crate::fetch::DocumentFetcher;
use crate::parse::DocumentParser;
use crate::session::SessionContext;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use quintstore_model::{normalize_document_id, QuintPattern};
use quintstore_storage::{QuadCollection, QueryHandle, ReactiveQueryCache};
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::watch;
use tracing::{debug, error};

/// The result of [NetworkLoader::load_from_network].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The document has been fetched and replaced in the cache.
    Loaded,
    /// Another load of the same document was in flight. The call waited for it to finish.
    Joined,
    /// The document could not be fetched or parsed. The cache is unchanged.
    Failed,
}

/// Loads documents from the network into a [ReactiveQueryCache].
///
/// Documents are loaded lazily: a scoped query against a document that is not yet present fetches
/// the document first. Concurrent loads of the same document are deduplicated. Only the first
/// call fetches, while the others wait for it to finish.
///
/// Loading never fails from the perspective of the caller. Errors are logged and the document
/// stays absent, so queries against it yield empty results.
pub struct NetworkLoader {
    cache: Arc<ReactiveQueryCache>,
    fetcher: Arc<dyn DocumentFetcher>,
    parser: Arc<dyn DocumentParser>,
    session: RwLock<SessionContext>,
    /// The documents that are currently loading. The receivers turn `true` once the load is
    /// finished.
    loading: DashMap<String, watch::Receiver<bool>>,
    config: LoaderConfig,
}

impl NetworkLoader {
    pub fn new(
        cache: Arc<ReactiveQueryCache>,
        fetcher: Arc<dyn DocumentFetcher>,
        parser: Arc<dyn DocumentParser>,
        config: LoaderConfig,
    ) -> Self {
        Self {
            cache,
            fetcher,
            parser,
            session: RwLock::default(),
            loading: DashMap::new(),
            config,
        }
    }

    /// Returns the cache this loader writes to.
    pub fn cache(&self) -> &Arc<ReactiveQueryCache> {
        &self.cache
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Returns the session used for subsequent fetches.
    pub fn session(&self) -> SessionContext {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the session used for subsequent fetches. Loads that are already in flight keep
    /// their session.
    pub fn set_session(&self, session: SessionContext) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = session;
    }

    /// Returns whether a load of `document` is in flight.
    pub fn is_loading(&self, document: &str) -> bool {
        self.loading.contains_key(normalize_document_id(document))
    }

    /// Returns the memoized handle for `pattern`, loading its document first if the pattern is
    /// scoped to a document that is not yet present.
    ///
    /// Unscoped patterns never trigger a load.
    pub async fn query_reactive_from_network(&self, pattern: &QuintPattern) -> QueryHandle {
        if let Some(document) = pattern.document() {
            if !self.cache.has(document) {
                self.load_from_network(document).await;
            }
        }
        self.cache.query_reactive(pattern)
    }

    /// Fetches and parses `document` and replaces it in the cache.
    ///
    /// If a load of the same document is already in flight, this call does not fetch again but
    /// waits for the other load to finish. Calling this method for a present document reloads it,
    /// which refreshes every handle scoped to it.
    pub async fn load_from_network(&self, document: &str) -> LoadOutcome {
        let document = normalize_document_id(document);

        let claim = match self.loading.entry(document.to_owned()) {
            Entry::Occupied(entry) => Claim::Join(entry.get().clone()),
            Entry::Vacant(entry) => {
                let (done, receiver) = watch::channel(false);
                entry.insert(receiver);
                Claim::Load(done)
            }
        };

        let done = match claim {
            Claim::Join(mut receiver) => {
                debug!(document, "Joining in-flight load");
                if receiver.wait_for(|done| *done).await.is_err() {
                    debug!(document, "In-flight load was cancelled");
                }
                return LoadOutcome::Joined;
            }
            Claim::Load(done) => done,
        };
        let _guard = LoadingGuard {
            loading: &self.loading,
            document,
            done,
        };

        let session = self.session();
        match self.fetch_and_parse(document, &session).await {
            Ok(quads) => {
                debug!(document, quads = quads.len(), "Loaded document");
                self.cache.replace(document, quads);
                LoadOutcome::Loaded
            }
            Err(err) => {
                error!(document, error = %err, "Failed to load document");
                LoadOutcome::Failed
            }
        }
    }

    async fn fetch_and_parse(
        &self,
        document: &str,
        session: &SessionContext,
    ) -> Result<QuadCollection, LoadError> {
        let timeout = self.config.fetch_timeout;
        let fetched = tokio::time::timeout(timeout, self.fetcher.fetch(document, session))
            .await
            .map_err(|_| FetchError::Timeout {
                document: document.to_owned(),
                timeout,
            })??;
        let quads =
            self.parser
                .parse(&fetched.data, fetched.content_type.as_deref(), document)?;
        Ok(quads)
    }
}

impl Debug for NetworkLoader {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkLoader")
            .field("cache", &self.cache)
            .field("session", &self.session())
            .field("loading", &self.loading.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

enum Claim {
    /// Another call is loading the document.
    Join(watch::Receiver<bool>),
    /// This call loads the document and signals `done` when finished.
    Load(watch::Sender<bool>),
}

/// Releases the in-flight marker of a document and wakes up joined callers, also if the loading
/// future is dropped before completion.
struct LoadingGuard<'a> {
    loading: &'a DashMap<String, watch::Receiver<bool>>,
    document: &'a str,
    done: watch::Sender<bool>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.loading.remove(self.document);
        self.done.send_replace(true);
    }
}
