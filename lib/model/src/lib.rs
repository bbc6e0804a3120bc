//! The data model of Quintstore.
//!
//! A [Quint] is an RDF quad annotated with the document it was read from. Queries are expressed
//! as [QuintPattern]s and are grouped by their [QueryScope].

mod document;
mod pattern;
mod quint;
mod term;

pub use document::{normalize_document_id, QueryScope};
pub use pattern::QuintPattern;
pub use quint::Quint;
pub use term::{graph_name_value, subject_value, term_value};

// Re-export some oxrdf types.
pub use oxrdf::{
    BlankNode, BlankNodeRef, Dataset, GraphName, GraphNameRef, IriParseError, Literal,
    LiteralRef, NamedNode, NamedNodeRef, Quad, QuadRef, Subject, SubjectRef, Term, TermRef,
    Triple,
};
