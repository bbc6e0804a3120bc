use oxrdf::{GraphNameRef, SubjectRef, TermRef};
use std::borrow::Cow;

/// Returns the value of a subject: the IRI of a named node or the identifier of a blank node.
///
/// Quoted triples are rendered in their N-Triples-star form.
pub fn subject_value(subject: SubjectRef<'_>) -> Cow<'_, str> {
    match subject {
        SubjectRef::NamedNode(node) => Cow::Borrowed(node.as_str()),
        SubjectRef::BlankNode(node) => Cow::Borrowed(node.as_str()),
        SubjectRef::Triple(triple) => Cow::Owned(format!("<< {triple} >>")),
    }
}

/// Returns the value of a term. For literals, this is the lexical form without datatype or
/// language tag.
pub fn term_value(term: TermRef<'_>) -> Cow<'_, str> {
    match term {
        TermRef::NamedNode(node) => Cow::Borrowed(node.as_str()),
        TermRef::BlankNode(node) => Cow::Borrowed(node.as_str()),
        TermRef::Literal(literal) => Cow::Borrowed(literal.value()),
        TermRef::Triple(triple) => Cow::Owned(format!("<< {triple} >>")),
    }
}

/// Returns the value of a graph name. The default graph has the empty string as value.
pub fn graph_name_value(graph_name: GraphNameRef<'_>) -> &str {
    match graph_name {
        GraphNameRef::NamedNode(node) => node.as_str(),
        GraphNameRef::BlankNode(node) => node.as_str(),
        GraphNameRef::DefaultGraph => "",
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use oxrdf::{BlankNodeRef, LiteralRef, NamedNodeRef};

    #[test]
    fn literal_value_is_lexical_form() {
        let literal = LiteralRef::new_language_tagged_literal_unchecked("Paris", "fr");
        assert_eq!(term_value(literal.into()), "Paris");
    }

    #[test]
    fn node_values() {
        let node = NamedNodeRef::new_unchecked("http://example.com/s");
        let blank = BlankNodeRef::new_unchecked("b0");
        assert_eq!(subject_value(node.into()), "http://example.com/s");
        assert_eq!(subject_value(blank.into()), "b0");
        assert_eq!(graph_name_value(GraphNameRef::DefaultGraph), "");
        assert_eq!(graph_name_value(node.into()), "http://example.com/s");
    }
}
