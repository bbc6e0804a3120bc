use crate::term::{graph_name_value, subject_value, term_value};
use oxrdf::QuadRef;
use std::fmt::{Display, Formatter};

/// A Quint `(s, p, o, g, d)` is an RDF quad extended by the document it was retrieved from.
///
/// All fields hold term values (see [term_value]), so a [Quint] can be handed to consumers
/// without exposing the underlying RDF data model. Quints are immutable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Quint {
    subject: String,
    predicate: String,
    object: String,
    graph: String,
    document: String,
}

impl Quint {
    /// Creates a new [Quint].
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
        graph: impl Into<String>,
        document: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            graph: graph.into(),
            document: document.into(),
        }
    }

    /// Creates a [Quint] from a `quad` that has been read from `document`.
    pub fn from_quad(quad: QuadRef<'_>, document: &str) -> Self {
        Self {
            subject: subject_value(quad.subject).into_owned(),
            predicate: quad.predicate.as_str().to_owned(),
            object: term_value(quad.object).into_owned(),
            graph: graph_name_value(quad.graph_name).to_owned(),
            document: document.to_owned(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    pub fn object(&self) -> &str {
        &self.object
    }

    /// The graph of the quad. Empty for the default graph.
    pub fn graph(&self) -> &str {
        &self.graph
    }

    /// The (normalized) identifier of the document this quint was read from.
    pub fn document(&self) -> &str {
        &self.document
    }
}

impl Display for Quint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.subject, self.predicate, self.object, self.graph, self.document
        )
    }
}
