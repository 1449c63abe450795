#![warn(missing_docs)]
//! # cachetier-core
//!
//! Core model and policy resolution for cache administration on CMS
//! content trees.
//!
//! This crate provides the types that the administrative surface
//! (`cachetier`, `cachetier-axum`) and storage implementations
//! (`cachetier-memory`) build on:
//!
//! - **Model** the content tree ([`Node`], [`Site`], [`Locale`])
//! - **Describe** the tiered cache policy ([`CacheTarget`], [`TimeOption`])
//! - **Resolve** the effective policy through parent inheritance
//!   ([`resolve_effective_policy`])
//! - **Seam** out persistence and invalidation ([`NodeRepository`],
//!   [`BanClient`])
//!
//! ## Policy model
//!
//! Every node carries, per locale, a `cache.target` property with four
//! tiers: `none` (do not cache anywhere), `intermediate` (shared caches
//! only, `max-age` forced to zero), `all` (independent `max-age` and
//! `s-maxage` durations) and `inherit` (walk up the tree). The effective
//! policy is derived on every read and never persisted.

pub mod ban;
pub mod error;
pub mod locale;
pub mod node;
pub mod policy;
pub mod repository;
pub mod site;
pub mod target;
pub mod time;

pub use ban::{BanClient, BanError, NoopBanClient};
pub use error::CoreError;
pub use locale::Locale;
pub use node::{
    EXPIRES_SENTINEL, HEADER_EXPIRES, HEADER_MAX_AGE, HEADER_S_MAXAGE, HeaderSetting, Node, NodeId,
    PROPERTY_CACHE_DISABLED, PROPERTY_CACHE_TARGET,
};
pub use policy::{EffectivePolicy, resolve_effective_policy};
pub use repository::NodeRepository;
pub use site::{Site, SiteId};
pub use target::{CacheTarget, UnknownTarget};
pub use time::{TIME_OPTIONS, TimeOption};
