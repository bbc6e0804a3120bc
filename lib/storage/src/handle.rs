use quintstore_model::{Quint, QuintPattern};
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::watch;

/// A live, identity-stable result of a memoized query.
///
/// Cloning a [QueryHandle] yields another reference to the same result. The result is only ever
/// written by the [ReactiveQueryCache](crate::ReactiveQueryCache), which swaps in the new result
/// whenever the queried document is replaced. Consumers can either read the current result
/// or [subscribe](Self::subscribe) to be notified about every mutation.
#[derive(Clone)]
pub struct QueryHandle {
    inner: Arc<QueryHandleInner>,
}

struct QueryHandleInner {
    pattern: QuintPattern,
    /// Readers clone the `Arc` and release the lock before looking at the quints.
    result: RwLock<Arc<[Quint]>>,
    /// Incremented after every mutation of `result`.
    version: watch::Sender<u64>,
}

impl QueryHandle {
    pub(crate) fn new(pattern: QuintPattern, result: Vec<Quint>) -> Self {
        let (version, _) = watch::channel(0);
        Self {
            inner: Arc::new(QueryHandleInner {
                pattern,
                result: RwLock::new(result.into()),
                version,
            }),
        }
    }

    /// The pattern this handle holds the result of.
    pub fn pattern(&self) -> &QuintPattern {
        &self.inner.pattern
    }

    /// Returns a copy of the current result.
    pub fn snapshot(&self) -> Vec<Quint> {
        self.current().to_vec()
    }

    /// Calls `f` with the current result without copying it.
    ///
    /// `f` sees the result as it was when the call started. It may freely use the cache, e.g. to
    /// replace the queried document.
    pub fn with_result<R>(&self, f: impl FnOnce(&[Quint]) -> R) -> R {
        f(&self.current())
    }

    pub fn len(&self) -> usize {
        self.current().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current().is_empty()
    }

    /// Returns the number of mutations this handle has seen so far.
    pub fn version(&self) -> u64 {
        *self.inner.version.borrow()
    }

    /// Returns a receiver that is notified after every mutation of the result. The received
    /// value is the new [version](Self::version).
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.version.subscribe()
    }

    /// Returns whether both handles refer to the same result.
    pub fn ptr_eq(&self, other: &QueryHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Replaces the result and notifies subscribers.
    pub(crate) fn replace_result(&self, quints: Vec<Quint>) {
        self.swap(quints.into());
        self.notify();
    }

    /// Empties the result and notifies subscribers.
    pub(crate) fn clear_result(&self) {
        self.swap(Arc::new([]));
        self.notify();
    }

    fn notify(&self) {
        self.inner.version.send_modify(|version| *version += 1);
    }

    fn current(&self) -> Arc<[Quint]> {
        Arc::clone(
            &self
                .inner
                .result
                .read()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    fn swap(&self, quints: Arc<[Quint]>) {
        *self
            .inner
            .result
            .write()
            .unwrap_or_else(PoisonError::into_inner) = quints;
    }
}

impl Debug for QueryHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryHandle")
            .field("pattern", &self.inner.pattern)
            .field("result", &self.current())
            .field("version", &self.version())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn clones_share_result() {
        let handle = QueryHandle::new(QuintPattern::any(), Vec::new());
        let clone = handle.clone();
        handle.replace_result(vec![Quint::new("a", "p", "b", "g", "d1")]);

        assert!(handle.ptr_eq(&clone));
        assert_eq!(clone.len(), 1);
        assert_eq!(clone.version(), 1);
    }

    #[test]
    fn distinct_handles_are_not_equal() {
        let a = QueryHandle::new(QuintPattern::any(), Vec::new());
        let b = QueryHandle::new(QuintPattern::any(), Vec::new());
        assert!(!a.ptr_eq(&b));
    }

    #[tokio::test]
    async fn subscribers_are_notified() {
        let handle =
            QueryHandle::new(QuintPattern::any(), vec![Quint::new("a", "p", "b", "g", "d1")]);
        let mut receiver = handle.subscribe();

        handle.clear_result();

        receiver.changed().await.unwrap();
        assert_eq!(*receiver.borrow_and_update(), 1);
        assert!(handle.is_empty());
    }

    #[test]
    fn with_result_does_not_block_writers() {
        let handle =
            QueryHandle::new(QuintPattern::any(), vec![Quint::new("a", "p", "b", "g", "d1")]);

        let seen = handle.with_result(|result| {
            handle.clear_result();
            result.len()
        });

        assert_eq!(seen, 1);
        assert!(handle.is_empty());
        assert_eq!(handle.version(), 1);
    }
}
