use quintstore_model::{Dataset, NamedNodeRef, Quad, QuadRef, QuintPattern};

/// The quads of a single document.
///
/// A [QuadCollection] is produced by parsing a document and is then handed to the
/// [DocumentStore](crate::DocumentStore), which owns it from then on.
#[derive(Debug, Clone, Default)]
pub struct QuadCollection {
    dataset: Dataset,
}

impl QuadCollection {
    /// Creates an empty [QuadCollection].
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a quad. Returns `false` if the quad was already present.
    pub fn insert<'a>(&mut self, quad: impl Into<QuadRef<'a>>) -> bool {
        self.dataset.insert(quad)
    }

    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = QuadRef<'_>> {
        self.dataset.iter()
    }

    /// Returns the quads matching the subject, predicate, object and graph of `pattern`.
    ///
    /// Uses the predicate index if the predicate is bound.
    pub fn quads_for_pattern<'a>(
        &'a self,
        pattern: &'a QuintPattern,
    ) -> impl Iterator<Item = QuadRef<'a>> + 'a {
        let candidates: Box<dyn Iterator<Item = QuadRef<'a>> + 'a> =
            match pattern.predicate.as_deref() {
                Some(predicate) => Box::new(
                    self.dataset
                        .quads_for_predicate(NamedNodeRef::new_unchecked(predicate)),
                ),
                None => Box::new(self.dataset.iter()),
            };
        candidates.filter(move |quad| pattern.matches(*quad))
    }

    /// Consumes the collection and returns the underlying [Dataset].
    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }
}

impl From<Dataset> for QuadCollection {
    fn from(dataset: Dataset) -> Self {
        Self { dataset }
    }
}

impl FromIterator<Quad> for QuadCollection {
    fn from_iter<T: IntoIterator<Item = Quad>>(iter: T) -> Self {
        Self {
            dataset: iter.into_iter().collect(),
        }
    }
}

impl Extend<Quad> for QuadCollection {
    fn extend<T: IntoIterator<Item = Quad>>(&mut self, iter: T) {
        self.dataset.extend(iter);
    }
}

#[cfg(test)]
mod test {
    use crate::test_utils::collection;
    use quintstore_model::QuintPattern;

    #[test]
    fn pattern_with_predicate_uses_index() {
        let quads = collection(&[
            ("http://ex.org/a", "http://ex.org/p", "http://ex.org/b", ""),
            ("http://ex.org/a", "http://ex.org/q", "http://ex.org/c", ""),
        ]);
        let pattern = QuintPattern::any().with_predicate("http://ex.org/q");
        let matches = quads.quads_for_pattern(&pattern).collect::<Vec<_>>();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].object.to_string(), "<http://ex.org/c>");
    }

    #[test]
    fn unknown_predicate_matches_nothing() {
        let quads = collection(&[("http://ex.org/a", "http://ex.org/p", "http://ex.org/b", "")]);
        let pattern = QuintPattern::any().with_predicate("http://ex.org/unknown");
        assert_eq!(quads.quads_for_pattern(&pattern).count(), 0);
    }

    #[test]
    fn duplicate_quads_are_collapsed() {
        let quads = collection(&[
            ("http://ex.org/a", "http://ex.org/p", "http://ex.org/b", ""),
            ("http://ex.org/a", "http://ex.org/p", "http://ex.org/b", ""),
        ]);
        assert_eq!(quads.len(), 1);
    }
}
