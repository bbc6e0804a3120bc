//! Contains the document store and the reactive query cache of
//! [Quintstore](https://docs.rs/quintstore/).
//!
//! The [DocumentStore] maps document identifiers to their quads. The [ReactiveQueryCache] wraps
//! a [DocumentStore] and memoizes query results as live [QueryHandle]s.

mod cache;
mod collection;
mod document_store;
mod handle;

pub use cache::{CacheConfig, ReactiveQueryCache};
pub use collection::QuadCollection;
pub use document_store::DocumentStore;
pub use handle::QueryHandle;
