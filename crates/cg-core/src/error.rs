//! Framework error type.
//!
//! The simulation core is total over well-formed configuration, so the only
//! error the core can produce is a rejected configuration.  Higher crates wrap
//! `CgError` as one variant of their own enums.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CgError {
    #[error("invalid configuration: `{field}` {reason}")]
    InvalidConfiguration {
        field:  &'static str,
        reason: String,
    },
}

impl CgError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CgError::InvalidConfiguration { field, reason: reason.into() }
    }
}

/// Shorthand result type for all `cg-*` crates.
pub type CgResult<T> = Result<T, CgError>;
