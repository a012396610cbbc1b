//! # wordloom
//!
//! Turns documents into bounded, deduplicated bilingual vocabulary lists
//! and practice question sets.
//!
//! ## Architecture
//!
//! - **Ingest** (`ingest`): parse plain text / HTML / PDF, split into
//!   position-numbered chunks, extract word pairs per chunk (in parallel;
//!   completion order does not matter)
//! - **Wordlist core** (`wordlist`): the deterministic first-chunk combiner
//!   with case-insensitive dedup and a hard word cap
//! - **Practice** (`practice`): matching, fill-in-blank, and multiple-choice
//!   question generation
//! - **Store** (`store`): saved wordlists and share tokens backed by redb
//!
//! ## Library usage
//!
//! ```
//! use wordloom::wordlist::{combine, ChunkResult, CombineOptions, WordPair};
//!
//! let chunks = vec![
//!     ChunkResult::new("c0", 0, vec![WordPair::new("cat", "猫")]),
//!     ChunkResult::new("c1", 1, vec![WordPair::new("CAT", "x")]),
//! ];
//! let result = combine(&chunks, &CombineOptions::default()).unwrap();
//! assert_eq!(result.words.len(), 1);
//! assert_eq!(result.metadata.duplicates_removed, 1);
//! ```

pub mod config;
pub mod error;
pub mod ingest;
pub mod practice;
pub mod store;
pub mod wordlist;

pub use error::{WordloomError, WordloomResult};
