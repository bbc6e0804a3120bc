use crate::collection::QuadCollection;
use quintstore_model::{normalize_document_id, Quint, QuintPattern};
use rustc_hash::FxHashMap;
use tracing::warn;

/// Maps normalized document identifiers to the quads of that document.
///
/// There is at most one entry per normalized identifier. Replacing a document discards its
/// previous quads.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: FxHashMap<String, QuadCollection>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the document identified by `document` is present.
    pub fn has(&self, document: &str) -> bool {
        self.documents.contains_key(normalize_document_id(document))
    }

    /// Stores `quads` as the content of `document`, overwriting any previous content.
    pub fn replace(&mut self, document: &str, quads: QuadCollection) {
        self.documents
            .insert(normalize_document_id(document).to_owned(), quads);
    }

    /// Evaluates `pattern` and returns the matching quints.
    ///
    /// If the pattern is scoped to a document that is not present, an empty result is returned.
    /// This is an expected state (e.g., the document is still loading) and therefore not an error.
    ///
    /// Unscoped patterns are evaluated against every document. The order across documents is
    /// unspecified, while the results of a single document keep the order of the quad match.
    pub fn query(&self, pattern: &QuintPattern) -> Vec<Quint> {
        match pattern.document().map(normalize_document_id) {
            Some(document) => {
                let Some(quads) = self.documents.get(document) else {
                    warn!(document, "Document not found");
                    return Vec::new();
                };
                evaluate(document, quads, pattern).collect()
            }
            None => self
                .documents
                .iter()
                .flat_map(|(document, quads)| evaluate(document, quads, pattern))
                .collect(),
        }
    }

    /// Removes all documents.
    pub fn clear(&mut self) {
        self.documents.clear();
    }

    /// Returns the number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Returns the normalized identifiers of all documents, in no particular order.
    pub fn document_ids(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }
}

fn evaluate<'a>(
    document: &'a str,
    quads: &'a QuadCollection,
    pattern: &'a QuintPattern,
) -> impl Iterator<Item = Quint> + 'a {
    quads
        .quads_for_pattern(pattern)
        .map(move |quad| Quint::from_quad(quad, document))
}
