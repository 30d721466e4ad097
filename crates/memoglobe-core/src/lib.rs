//! # memoglobe-core
//!
//! Domain types and the in-memory store behind the MemoGlobe API.
//!
//! This crate has no HTTP or async dependencies. It owns the note, anchor,
//! journey, quest, and metacognition models, the fixed analytics served in
//! place of real analysis, and the input checks the API applies before it
//! touches the store.

pub mod defaults;
pub mod error;
pub mod models;
pub mod scaffolding;
pub mod seed;
pub mod store;
pub mod validation;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use store::{review_spacing_days, InMemoryStore};
pub use validation::{validate_uuid, Pagination, RecallQuality};
