//! Configuration module for tokensrc
//!
//! Provides types, discovery and parsing for `tokensrc.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
