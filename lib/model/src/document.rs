use std::fmt::{Display, Formatter};

/// Returns the part of `document` before its first fragment delimiter (`#`).
///
/// Two identifiers that only differ after the `#` denote the same document. Every key that refers
/// to a document (storage, query scope, in-flight loads) goes through this function.
///
/// ```
/// use quintstore_model::normalize_document_id;
///
/// assert_eq!(normalize_document_id("http://ex.org/doc#me"), "http://ex.org/doc");
/// assert_eq!(normalize_document_id("http://ex.org/doc"), "http://ex.org/doc");
/// ```
pub fn normalize_document_id(document: &str) -> &str {
    document
        .split_once('#')
        .map_or(document, |(document, _)| document)
}

/// The set of documents a query is evaluated against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryScope {
    /// The union of all loaded documents.
    AllDocuments,
    /// A single document, identified by its normalized identifier.
    Document(String),
}

impl QueryScope {
    /// Creates the scope for an optional document identifier. The identifier is normalized.
    pub fn for_document(document: Option<&str>) -> Self {
        match document {
            None => QueryScope::AllDocuments,
            Some(document) => QueryScope::Document(normalize_document_id(document).to_owned()),
        }
    }

    /// Returns the normalized document identifier, if the scope is a single document.
    pub fn document(&self) -> Option<&str> {
        match self {
            QueryScope::AllDocuments => None,
            QueryScope::Document(document) => Some(document),
        }
    }
}

impl Display for QueryScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryScope::AllDocuments => f.write_str("*"),
            QueryScope::Document(document) => f.write_str(document),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn normalize_strips_everything_after_first_fragment() {
        assert_eq!(normalize_document_id("http://ex.org/doc#a#b"), "http://ex.org/doc");
        assert_eq!(normalize_document_id("#frag"), "");
    }

    #[test]
    fn scope_normalizes_document() {
        assert_eq!(
            QueryScope::for_document(Some("http://ex.org/doc#me")),
            QueryScope::Document("http://ex.org/doc".to_owned())
        );
        assert_eq!(QueryScope::for_document(None), QueryScope::AllDocuments);
        assert_eq!(QueryScope::AllDocuments.document(), None);
    }
}
