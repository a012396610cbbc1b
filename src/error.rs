//! Top-level error type.
//!
//! Each subsystem defines its own error enum with miette `#[diagnostic]`
//! derives; this module wraps them so callers can bubble any of them up
//! with `?` while keeping error codes and help text intact.

use miette::Diagnostic;
use thiserror::Error;

use crate::config::ConfigError;
use crate::ingest::IngestError;
use crate::practice::PracticeError;
use crate::store::StoreError;
use crate::wordlist::CombineError;

/// Top-level error type.
///
/// Each variant wraps a subsystem-specific error, preserving the full
/// diagnostic chain through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum WordloomError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Combine(#[from] CombineError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Practice(#[from] PracticeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

/// Convenience alias for functions returning wordloom results.
pub type WordloomResult<T> = std::result::Result<T, WordloomError>;
