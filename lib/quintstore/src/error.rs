//! Errors raised by a [QuintStore](crate::QuintStore).
//!
//! Network loads never raise errors. Only the construction of a store (which creates an HTTP
//! client) and loading local content can fail.

pub use quintstore_web::error::{FetchError, LoadError, ParseError};
