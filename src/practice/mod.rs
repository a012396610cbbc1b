//! Practice question generation from a combined wordlist.
//!
//! Three modes: matching, fill-in-blank, and multiple choice. Generation
//! is seedable so question sets are reproducible.

pub mod questions;

use miette::Diagnostic;
use thiserror::Error;

pub use questions::{
    BlankItem, ChoiceItem, MULTIPLE_CHOICE_MIN_WORDS, MatchingSet, fill_in_blank, matching,
    multiple_choice,
};

/// Errors from question generation.
#[derive(Debug, Error, Diagnostic)]
pub enum PracticeError {
    #[error("not enough words for {mode}: need at least {needed}, have {have}")]
    #[diagnostic(
        code(wordloom::practice::not_enough_words),
        help(
            "Combine a larger wordlist, or pick a practice mode with a \
             smaller minimum."
        )
    )]
    NotEnoughWords {
        mode: &'static str,
        needed: usize,
        have: usize,
    },
}

/// Convenience alias for question generation results.
pub type PracticeResult<T> = std::result::Result<T, PracticeError>;
