//! Tokensrc - Library for turning design variables into nested token trees
//!
//! This library provides functionality to:
//! - Read typed, mode-dependent variables from a pluggable data source
//! - Project every (variable, mode) pair to a scalar, with aliases kept as
//!   `##collection['path']##` placeholders
//! - Assemble one nested tree per (collection, mode) and emit it as a message
//! - Render the trees as TypeScript constants

pub mod alias;
pub mod case;
#[cfg(not(target_arch = "wasm32"))]
pub mod cli;
pub mod codegen;
pub mod color;
pub mod config;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
pub mod models;
pub mod orchestrator;
pub mod projector;
pub mod protocol;
pub mod sink;
pub mod source;
pub mod tree;

#[cfg(feature = "wasm")]
pub mod wasm;
