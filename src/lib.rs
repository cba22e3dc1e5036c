// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod cache;
pub mod collect;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod keywords;
pub mod live;
pub mod metrics;
pub mod source_weights;
pub mod store;
pub mod types;

// `crate_root::api::router` and `crate_root::router` both work.
pub use crate::api::{router, AppState};
pub use crate::types::{KeywordScore, Source, TrendSnapshot};
