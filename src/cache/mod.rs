//! Per-topic cache of agent outputs.
//!
//! Each topic owns one JSON document, `{cache_dir}/{topic}_cache.json`, holding
//! a flat object from role key to that role's full text output:
//!
//! ```json
//! {
//!   "product_manager": "## Requirements ...",
//!   "ui_ux_designer": "## Design ..."
//! }
//! ```
//!
//! Every mutation is a whole-document read-modify-write. There is no locking:
//! one driver process owns a topic's document for the length of a run.
//!
//! Failures never cross the public API as errors. `put` and `clear` return
//! `false`, `get` returns `None`, and the cause is logged.

mod store;


pub use store::{CacheSummary, TopicCache, cache_file_name};
