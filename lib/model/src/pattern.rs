use crate::document::QueryScope;
use crate::term::{graph_name_value, subject_value, term_value};
use oxrdf::QuadRef;

/// A query over quints where every field may be a wildcard (`None`).
///
/// A `None` document selects the union of all loaded documents. Two patterns are equal iff all of
/// their fields are equal. The document field is compared as given, while [Self::scope]
/// normalizes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QuintPattern {
    pub subject: Option<String>,
    pub predicate: Option<String>,
    pub object: Option<String>,
    pub graph: Option<String>,
    pub document: Option<String>,
}

impl QuintPattern {
    /// Creates a new [QuintPattern] from optional term values.
    pub fn new(
        subject: Option<&str>,
        predicate: Option<&str>,
        object: Option<&str>,
        graph: Option<&str>,
        document: Option<&str>,
    ) -> Self {
        Self {
            subject: subject.map(ToOwned::to_owned),
            predicate: predicate.map(ToOwned::to_owned),
            object: object.map(ToOwned::to_owned),
            graph: graph.map(ToOwned::to_owned),
            document: document.map(ToOwned::to_owned),
        }
    }

    /// A pattern matching every quint of every document.
    pub fn any() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    #[must_use]
    pub fn with_predicate(mut self, predicate: impl Into<String>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    #[must_use]
    pub fn with_object(mut self, object: impl Into<String>) -> Self {
        self.object = Some(object.into());
        self
    }

    #[must_use]
    pub fn with_graph(mut self, graph: impl Into<String>) -> Self {
        self.graph = Some(graph.into());
        self
    }

    #[must_use]
    pub fn in_document(mut self, document: impl Into<String>) -> Self {
        self.document = Some(document.into());
        self
    }

    /// Returns the document field as given.
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    /// Returns the scope this pattern is evaluated in.
    pub fn scope(&self) -> QueryScope {
        QueryScope::for_document(self.document())
    }

    /// Returns whether `quad` matches the subject, predicate, object and graph of this pattern.
    ///
    /// The document field is not considered, as a quad does not carry its provenance.
    pub fn matches(&self, quad: QuadRef<'_>) -> bool {
        is_bound_to(self.predicate.as_deref(), quad.predicate.as_str())
            && is_bound_to(self.subject.as_deref(), &subject_value(quad.subject))
            && is_bound_to(self.object.as_deref(), &term_value(quad.object))
            && is_bound_to(self.graph.as_deref(), graph_name_value(quad.graph_name))
    }
}

fn is_bound_to(bound: Option<&str>, value: &str) -> bool {
    bound.map_or(true, |bound| bound == value)
}
