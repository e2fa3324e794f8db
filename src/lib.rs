//! Flash image composer library.
//!
//! This library provides the core components for the `fullflash` tool.
//! It is organized into several modules:
//! - `config`: CLI configuration.
//! - `blob`: Input binaries and how their sources are resolved.
//! - `composer`: The main composition orchestration.
//! - `layout`: The flash-shaped output buffer.
//! - `header`: The optional boot signature at offset 0.
//! - `writer`: Persisting the final image.

pub mod blob;
pub mod composer;
pub mod config;
pub mod error;
pub mod header;
pub mod layout;
pub mod utils;
pub mod writer;

pub use error::{Error, Result};
