use thiserror::Error;

use cachetier_core::{BanError, CoreError};

use crate::forms::ValidationErrors;

/// Error type for administrative operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Model or repository failure (not-found, cycle, storage).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// One or more submitted fields failed validation.
    ///
    /// Recovered locally: the form is re-rendered with the per-field
    /// messages and the operator's original input; nothing is persisted.
    #[error("validation failed")]
    Validation(ValidationErrors),

    /// The invalidation transport failed.
    ///
    /// Recoverable and user-visible; the page re-renders with an error
    /// banner instead of propagating an unhandled fault.
    #[error(transparent)]
    Ban(#[from] BanError),

    /// Configuration (sites, catalogs) could not be loaded.
    #[error("invalid configuration: {0}")]
    Config(String),
}
