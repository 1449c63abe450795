#![warn(missing_docs)]
//! # cachetier
//!
//! Administrative operations on top of [`cachetier_core`]: validated
//! cache-policy updates, cache-invalidation triggers and assembly of the
//! node cache admin page.
//!
//! The crate mirrors the shape of the administrative surface it backs:
//! one page with two independent forms. The "headers" form edits the
//! tiered policy (permission-gated, validated, persisted as response
//! headers), the "clear" form issues a best-effort ban towards the
//! front-end accelerator. Both post back with an `action` discriminator
//! and redirect to a caller-supplied referer on success.

/// Loading sites and translation catalogs from YAML configuration.
pub mod config;

/// Error types for administrative operations.
pub mod error;

/// Declarative forms with field-level validation.
pub mod forms;

/// Assembly of the node cache admin page.
pub mod page;

/// Locale-aware message lookup.
pub mod translate;

/// The cache-invalidation trigger.
pub mod clear;

/// The validate-and-persist policy update.
pub mod update;

pub use clear::clear_cache;
pub use config::{AdminConfig, SiteConfig};
pub use error::AdminError;
pub use forms::{Field, Form, FormValues, ValidationErrors, Validator};
pub use page::{Capabilities, NodeCachePage, assemble_page, clear_form};
pub use translate::Translator;
pub use update::{headers_form, update_policy};
