//! HTTP handlers for memoglobe-api, one module per resource.

pub mod globe;
pub mod journey;
pub mod metacog;
pub mod notes;
pub mod quests;
pub mod scaffolding;
