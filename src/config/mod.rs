//! Crew configuration.
//!
//! This module defines the Config struct that represents `crew.yaml`.
//! Unknown fields are ignored, every field has a default, and values
//! are validated on load.

mod model;
mod operations;

#[cfg(test)]
mod tests;

pub use model::Config;
