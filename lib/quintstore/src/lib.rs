#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod error;
pub mod store;

pub use store::{QuintStore, StoreConfig};

pub mod model {
    pub use quintstore_model::*;
}

pub mod storage {
    pub use quintstore_storage::*;
}

pub mod web {
    pub use quintstore_web::*;
}
