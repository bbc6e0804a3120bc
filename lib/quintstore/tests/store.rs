#![cfg(test)]
#![allow(clippy::panic_in_result_fn)]

use async_trait::async_trait;
use quintstore::error::{FetchError, ParseError};
use quintstore::model::{GraphName, NamedNode, Quad, Quint, QuintPattern};
use quintstore::storage::QuadCollection;
use quintstore::web::{DocumentFetcher, FetchedDocument, LoadOutcome, RdfFormat, SessionContext};
use quintstore::{QuintStore, StoreConfig};
use std::collections::HashMap;
use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

const ALICE: &str = "http://alice.example/profile/card";
const BOB: &str = "http://bob.example/profile/card";
const KNOWS: &str = "http://xmlns.com/foaf/0.1/knows";
const NAME: &str = "http://xmlns.com/foaf/0.1/name";

const ALICE_CARD: &str = r#"
@prefix foaf: <http://xmlns.com/foaf/0.1/> .

<#me> foaf:name "Alice" ;
    foaf:knows <http://bob.example/profile/card#me> .
"#;

const BOB_CARD: &str = r#"
@prefix foaf: <http://xmlns.com/foaf/0.1/> .

<#me> foaf:name "Bob" ;
    foaf:knows <http://alice.example/profile/card#me> .
"#;

/// Serves Turtle documents from memory and records the requests.
#[derive(Default)]
struct InMemoryFetcher {
    documents: Mutex<HashMap<String, String>>,
    calls: AtomicUsize,
    authenticated_calls: AtomicUsize,
}

impl InMemoryFetcher {
    fn with_cards() -> Self {
        let fetcher = Self::default();
        fetcher.publish(ALICE, ALICE_CARD);
        fetcher.publish(BOB, BOB_CARD);
        fetcher
    }

    fn publish(&self, document: &str, turtle: &str) {
        self.documents
            .lock()
            .unwrap()
            .insert(document.to_owned(), turtle.to_owned());
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentFetcher for InMemoryFetcher {
    async fn fetch(
        &self,
        document: &str,
        session: &SessionContext,
    ) -> Result<FetchedDocument, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if session.is_authenticated() {
            self.authenticated_calls.fetch_add(1, Ordering::SeqCst);
        }
        let documents = self.documents.lock().unwrap();
        let turtle = documents
            .get(document)
            .ok_or_else(|| FetchError::Other(format!("{document} not found").into()))?;
        Ok(FetchedDocument::new(turtle.as_bytes(), Some("text/turtle")))
    }
}

fn store_with(fetcher: &Arc<InMemoryFetcher>) -> QuintStore {
    let fetcher: Arc<dyn DocumentFetcher> = Arc::<InMemoryFetcher>::clone(fetcher);
    QuintStore::new_with_fetcher(StoreConfig::default(), fetcher)
}

fn quad(subject: &str, predicate: &str, object: &str, graph: &str) -> Quad {
    Quad::new(
        NamedNode::new_unchecked(subject),
        NamedNode::new_unchecked(predicate),
        NamedNode::new_unchecked(object),
        GraphName::from(NamedNode::new_unchecked(graph)),
    )
}

fn render(quints: &[Quint]) -> String {
    let mut lines = quints
        .iter()
        .map(|quint| {
            format!(
                "{} {} {} @ {}",
                quint.subject(),
                quint.predicate(),
                quint.object(),
                quint.document()
            )
        })
        .collect::<Vec<_>>();
    lines.sort();
    lines.join("\n")
}

#[tokio::test]
async fn test_replace_then_query_then_empty() -> Result<(), Box<dyn Error>> {
    let fetcher = Arc::new(InMemoryFetcher::default());
    let store = store_with(&fetcher);
    let quads = [quad("a", "p", "b", "g")].into_iter().collect::<QuadCollection>();
    store.replace("d1", quads);

    let result = store
        .query_from_network(Some("a"), Some("p"), None, None, Some("d1"))
        .await;
    assert_eq!(result.snapshot(), vec![Quint::new("a", "p", "b", "g", "d1")]);

    store.replace("d1", QuadCollection::new());
    assert!(result.is_empty());
    assert_eq!(fetcher.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_fragment_normalization() -> Result<(), Box<dyn Error>> {
    let store = QuintStore::new()?;
    store.replace("http://ex.org/doc", QuadCollection::new());
    assert!(store.has("http://ex.org/doc#frag"));
    assert_eq!(store.document_ids(), vec!["http://ex.org/doc".to_owned()]);
    Ok(())
}

#[tokio::test]
async fn test_lazy_load_and_memoization() {
    let fetcher = Arc::new(InMemoryFetcher::with_cards());
    let store = store_with(&fetcher);

    let me = Some("http://alice.example/profile/card#me");
    let name = store
        .query_from_network(me, Some(NAME), None, None, me)
        .await;
    let same = store
        .query_from_network(me, Some(NAME), None, None, me)
        .await;

    assert!(name.ptr_eq(&same));
    assert_eq!(fetcher.calls(), 1);
    assert_eq!(name.snapshot()[0].object(), "Alice");
    assert_eq!(name.snapshot()[0].document(), ALICE);
}

#[tokio::test]
async fn test_scope_isolation_and_union() {
    let fetcher = Arc::new(InMemoryFetcher::with_cards());
    let store = store_with(&fetcher);
    let knows = QuintPattern::any().with_predicate(KNOWS);

    let from_alice = store
        .query_pattern_from_network(&knows.clone().in_document(ALICE))
        .await;
    assert_eq!(store.load_from_network(BOB).await, LoadOutcome::Loaded);
    let union = store.query_pattern_from_network(&knows).await;

    assert!(from_alice
        .snapshot()
        .iter()
        .all(|quint| quint.document() == ALICE));
    insta::assert_snapshot!(render(&union.snapshot()), @r"
    http://alice.example/profile/card#me http://xmlns.com/foaf/0.1/knows http://bob.example/profile/card#me @ http://alice.example/profile/card
    http://bob.example/profile/card#me http://xmlns.com/foaf/0.1/knows http://alice.example/profile/card#me @ http://bob.example/profile/card
    ");
    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test]
async fn test_concurrent_queries_fetch_once() {
    let fetcher = Arc::new(InMemoryFetcher::with_cards());
    let store = store_with(&fetcher);
    let name = QuintPattern::any().with_predicate(NAME).in_document(BOB);

    let (first, second) = tokio::join!(
        store.query_pattern_from_network(&name),
        store.query_pattern_from_network(&name)
    );

    assert_eq!(fetcher.calls(), 1);
    assert!(first.ptr_eq(&second));
    assert_eq!(first.len(), 1);
}

#[tokio::test]
async fn test_reload_updates_handles() {
    let fetcher = Arc::new(InMemoryFetcher::with_cards());
    let store = store_with(&fetcher);
    let name = store
        .query_pattern_from_network(&QuintPattern::any().with_predicate(NAME).in_document(ALICE))
        .await;
    let changes = name.subscribe();

    fetcher.publish(ALICE, "<#me> <http://xmlns.com/foaf/0.1/name> \"Alice Smith\" .");
    assert_eq!(store.load_from_network(ALICE).await, LoadOutcome::Loaded);

    assert!(changes.has_changed().unwrap());
    assert_eq!(name.snapshot()[0].object(), "Alice Smith");
}

#[tokio::test]
async fn test_failed_load_yields_empty_result() {
    let fetcher = Arc::new(InMemoryFetcher::default());
    let store = store_with(&fetcher);

    let result = store
        .query_pattern_from_network(&QuintPattern::any().in_document(ALICE))
        .await;

    assert!(result.is_empty());
    assert!(!store.has(ALICE));
    assert!(!store.loader().is_loading(ALICE));
}

#[tokio::test]
async fn test_clear_keeps_handles() {
    let fetcher = Arc::new(InMemoryFetcher::with_cards());
    let store = store_with(&fetcher);
    let pattern = QuintPattern::any().in_document(ALICE);
    let result = store.query_pattern_from_network(&pattern).await;
    assert!(!result.is_empty());

    store.clear();

    assert!(!store.has(ALICE));
    assert!(result.is_empty());
    assert!(store.query_reactive(&pattern).ptr_eq(&result));

    // The next network query reloads the document into the kept handle.
    let reloaded = store.query_pattern_from_network(&pattern).await;
    assert!(reloaded.ptr_eq(&result));
    assert!(!result.is_empty());
    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test]
async fn test_session_is_used_for_fetches() {
    let fetcher = Arc::new(InMemoryFetcher::with_cards());
    let store = store_with(&fetcher);

    assert_eq!(store.load_from_network(ALICE).await, LoadOutcome::Loaded);
    store.set_session(SessionContext::with_bearer_token("token"));
    assert_eq!(store.load_from_network(BOB).await, LoadOutcome::Loaded);

    assert_eq!(fetcher.authenticated_calls.load(Ordering::SeqCst), 1);
    assert!(store.session().is_authenticated());
}

#[test]
fn test_load_from_reader_keeps_content_on_error() -> Result<(), Box<dyn Error>> {
    let store = QuintStore::new()?;
    store.load_from_reader(ALICE, RdfFormat::Turtle, ALICE_CARD.as_bytes())?;

    let result = store.load_from_reader(ALICE, RdfFormat::Turtle, "<#me> <broken".as_bytes());

    assert!(matches!(result, Err(ParseError::Syntax(_))));
    assert_eq!(store.query(&QuintPattern::any().in_document(ALICE)).len(), 2);
    Ok(())
}
