//! Shared types, error model, and configuration for ContentLink.
//!
//! This crate is the foundation depended on by all other ContentLink crates.
//! It provides:
//! - [`ContentLinkError`], the unified error type
//! - Domain types ([`Identifier`], [`ContentReference`], [`ContentUuid`])
//! - Configuration ([`AppConfig`], [`ResolverConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, BlogEndpoint, EndpointsConfig, ResolverConfig, ResolverSection, config_dir,
    config_file_path, init_config, load_config, load_config_from,
};
pub use error::{ContentLinkError, Result};
pub use types::{ContentReference, ContentUuid, Identifier};
