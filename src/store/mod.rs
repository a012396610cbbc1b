//! Persistent wordlist store and share tokens, backed by redb.
//!
//! All writes go through transactions; reads use MVCC snapshots. Saved
//! wordlists are JSON-encoded records keyed by name; share tokens map a
//! random URL-safe token to a wordlist name in a second table.

use std::path::Path;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use miette::Diagnostic;
use rand::Rng;
use rand::distributions::Alphanumeric;
use redb::{Database, ReadableTable, TableDefinition};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::wordlist::{CombineMetadata, WordPair};

/// Saved wordlists: name → JSON-encoded [`SavedWordlist`].
const WORDLIST_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("wordlists");
/// Share tokens: token → wordlist name.
const SHARE_TABLE: TableDefinition<&str, &str> = TableDefinition::new("shares");

/// Fewest pairs a saved wordlist may carry.
pub const MIN_SAVED_WORDS: usize = 1;
/// Most pairs a saved wordlist may carry. This is the application-level
/// save cap, separate from the combiner's 10 to 50 configuration range.
pub const MAX_SAVED_WORDS: usize = 40;

const TOKEN_LEN: usize = 12;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from wordlist persistence and sharing.
#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("wordlist not found: \"{name}\"")]
    #[diagnostic(
        code(wordloom::store::not_found),
        help("List saved wordlists with `wordloom wordlist list`.")
    )]
    NotFound { name: String },

    #[error("duplicate wordlist: \"{name}\" already exists")]
    #[diagnostic(
        code(wordloom::store::duplicate),
        help("Remove the existing wordlist first, or pick another name.")
    )]
    Duplicate { name: String },

    #[error("wordlist \"{name}\" has {got} pairs: saved lists hold {min} to {max}")]
    #[diagnostic(
        code(wordloom::store::save_cap),
        help(
            "The save boundary enforces its own 1 to 40 pair cap, \
             independent of the combiner's 10 to 50 configuration range."
        )
    )]
    SaveCap {
        name: String,
        got: usize,
        min: usize,
        max: usize,
    },

    #[error("unknown share token: \"{token}\"")]
    #[diagnostic(
        code(wordloom::store::unknown_token),
        help("The token may have been revoked, or its wordlist removed.")
    )]
    UnknownToken { token: String },

    #[error("redb transaction error: {message}")]
    #[diagnostic(
        code(wordloom::store::redb),
        help(
            "The embedded database encountered a transaction error. This may \
             indicate corruption; try a fresh data directory."
        )
    )]
    Redb { message: String },

    #[error("serialization error: {message}")]
    #[diagnostic(
        code(wordloom::store::serde),
        help(
            "Failed to encode or decode a stored wordlist. The stored format \
             may have changed between versions; re-save the wordlist."
        )
    )]
    Serialization { message: String },

    #[error("I/O error: {source}")]
    #[diagnostic(
        code(wordloom::store::io),
        help(
            "A filesystem operation failed. Check that the data directory \
             exists, has correct permissions, and that the disk is not full."
        )
    )]
    Io {
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for store results.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A persisted wordlist: the pairs plus the combine metadata they came
/// with and a save timestamp (seconds since UNIX epoch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedWordlist {
    pub name: String,
    pub words: Vec<WordPair>,
    pub metadata: CombineMetadata,
    pub saved_at: u64,
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Durable wordlist store.
pub struct WordlistStore {
    db: Arc<Database>,
}

impl WordlistStore {
    /// Open or create a store in the given directory.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        std::fs::create_dir_all(data_dir).map_err(|e| StoreError::Io { source: e })?;
        let db_path = data_dir.join("wordloom.redb");
        let db = Database::create(&db_path).map_err(|e| StoreError::Redb {
            message: format!("failed to open redb at {}: {e}", db_path.display()),
        })?;

        let store = Self { db: Arc::new(db) };
        // Materialize both tables so reads on a fresh store succeed.
        let txn = store.begin_write()?;
        {
            txn.open_table(WORDLIST_TABLE).map_err(|e| StoreError::Redb {
                message: format!("open_table failed: {e}"),
            })?;
            txn.open_table(SHARE_TABLE).map_err(|e| StoreError::Redb {
                message: format!("open_table failed: {e}"),
            })?;
        }
        store.commit(txn)?;
        Ok(store)
    }

    /// Save a combined wordlist under a unique name.
    ///
    /// Enforces the 1 to 40 save cap and rejects duplicate names.
    pub fn save(
        &self,
        name: &str,
        words: &[WordPair],
        metadata: &CombineMetadata,
    ) -> StoreResult<SavedWordlist> {
        if words.len() < MIN_SAVED_WORDS || words.len() > MAX_SAVED_WORDS {
            return Err(StoreError::SaveCap {
                name: name.to_string(),
                got: words.len(),
                min: MIN_SAVED_WORDS,
                max: MAX_SAVED_WORDS,
            });
        }

        let record = SavedWordlist {
            name: name.to_string(),
            words: words.to_vec(),
            metadata: metadata.clone(),
            saved_at: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs(),
        };
        let encoded = serde_json::to_vec(&record).map_err(|e| StoreError::Serialization {
            message: e.to_string(),
        })?;

        let txn = self.begin_write()?;
        {
            let mut table = txn.open_table(WORDLIST_TABLE).map_err(|e| StoreError::Redb {
                message: format!("open_table failed: {e}"),
            })?;
            let exists = table
                .get(name)
                .map_err(|e| StoreError::Redb {
                    message: format!("get failed: {e}"),
                })?
                .is_some();
            if exists {
                return Err(StoreError::Duplicate {
                    name: name.to_string(),
                });
            }
            table
                .insert(name, encoded.as_slice())
                .map_err(|e| StoreError::Redb {
                    message: format!("insert failed: {e}"),
                })?;
        }
        self.commit(txn)?;
        Ok(record)
    }

    /// Load a saved wordlist by name.
    pub fn load(&self, name: &str) -> StoreResult<SavedWordlist> {
        let txn = self.begin_read()?;
        let table = txn.open_table(WORDLIST_TABLE).map_err(|e| StoreError::Redb {
            message: format!("open_table failed: {e}"),
        })?;
        let guard = table
            .get(name)
            .map_err(|e| StoreError::Redb {
                message: format!("get failed: {e}"),
            })?
            .ok_or_else(|| StoreError::NotFound {
                name: name.to_string(),
            })?;
        serde_json::from_slice(guard.value()).map_err(|e| StoreError::Serialization {
            message: e.to_string(),
        })
    }

    /// Names of all saved wordlists, sorted.
    pub fn list(&self) -> StoreResult<Vec<String>> {
        let txn = self.begin_read()?;
        let table = txn.open_table(WORDLIST_TABLE).map_err(|e| StoreError::Redb {
            message: format!("open_table failed: {e}"),
        })?;
        let mut names = Vec::new();
        for entry in table.iter().map_err(|e| StoreError::Redb {
            message: format!("iter failed: {e}"),
        })? {
            let (key, _) = entry.map_err(|e| StoreError::Redb {
                message: format!("iter entry failed: {e}"),
            })?;
            names.push(key.value().to_string());
        }
        names.sort();
        Ok(names)
    }

    /// Remove a saved wordlist and revoke any share tokens pointing at it.
    /// Returns whether the wordlist existed.
    pub fn remove(&self, name: &str) -> StoreResult<bool> {
        let txn = self.begin_write()?;
        let existed = {
            let mut table = txn.open_table(WORDLIST_TABLE).map_err(|e| StoreError::Redb {
                message: format!("open_table failed: {e}"),
            })?;
            let removed = table.remove(name).map_err(|e| StoreError::Redb {
                message: format!("remove failed: {e}"),
            })?;
            removed.is_some()
        };

        {
            let mut shares = txn.open_table(SHARE_TABLE).map_err(|e| StoreError::Redb {
                message: format!("open_table failed: {e}"),
            })?;
            let stale: Vec<String> = {
                let mut tokens = Vec::new();
                for entry in shares.iter().map_err(|e| StoreError::Redb {
                    message: format!("iter failed: {e}"),
                })? {
                    let (token, target) = entry.map_err(|e| StoreError::Redb {
                        message: format!("iter entry failed: {e}"),
                    })?;
                    if target.value() == name {
                        tokens.push(token.value().to_string());
                    }
                }
                tokens
            };
            for token in stale {
                shares.remove(token.as_str()).map_err(|e| StoreError::Redb {
                    message: format!("remove failed: {e}"),
                })?;
            }
        }

        self.commit(txn)?;
        Ok(existed)
    }

    /// Mint a share token for an existing wordlist.
    pub fn share(&self, name: &str) -> StoreResult<String> {
        // Verify the wordlist exists before minting.
        self.load(name)?;

        let txn = self.begin_write()?;
        let token = {
            let mut table = txn.open_table(SHARE_TABLE).map_err(|e| StoreError::Redb {
                message: format!("open_table failed: {e}"),
            })?;
            let token = loop {
                let candidate: String = rand::thread_rng()
                    .sample_iter(&Alphanumeric)
                    .take(TOKEN_LEN)
                    .map(char::from)
                    .collect();
                let taken = table
                    .get(candidate.as_str())
                    .map_err(|e| StoreError::Redb {
                        message: format!("get failed: {e}"),
                    })?
                    .is_some();
                if !taken {
                    break candidate;
                }
            };
            table
                .insert(token.as_str(), name)
                .map_err(|e| StoreError::Redb {
                    message: format!("insert failed: {e}"),
                })?;
            token
        };
        self.commit(txn)?;
        Ok(token)
    }

    /// Resolve a share token to its wordlist.
    pub fn resolve(&self, token: &str) -> StoreResult<SavedWordlist> {
        let name = {
            let txn = self.begin_read()?;
            let table = txn.open_table(SHARE_TABLE).map_err(|e| StoreError::Redb {
                message: format!("open_table failed: {e}"),
            })?;
            let guard = table
                .get(token)
                .map_err(|e| StoreError::Redb {
                    message: format!("get failed: {e}"),
                })?
                .ok_or_else(|| StoreError::UnknownToken {
                    token: token.to_string(),
                })?;
            guard.value().to_string()
        };
        self.load(&name)
    }

    /// Revoke a share token. Returns whether the token existed.
    pub fn revoke(&self, token: &str) -> StoreResult<bool> {
        let txn = self.begin_write()?;
        let existed = {
            let mut table = txn.open_table(SHARE_TABLE).map_err(|e| StoreError::Redb {
                message: format!("open_table failed: {e}"),
            })?;
            let removed = table.remove(token).map_err(|e| StoreError::Redb {
                message: format!("remove failed: {e}"),
            })?;
            removed.is_some()
        };
        self.commit(txn)?;
        Ok(existed)
    }

    fn begin_write(&self) -> StoreResult<redb::WriteTransaction> {
        self.db.begin_write().map_err(|e| StoreError::Redb {
            message: format!("begin_write failed: {e}"),
        })
    }

    fn begin_read(&self) -> StoreResult<redb::ReadTransaction> {
        self.db.begin_read().map_err(|e| StoreError::Redb {
            message: format!("begin_read failed: {e}"),
        })
    }

    fn commit(&self, txn: redb::WriteTransaction) -> StoreResult<()> {
        txn.commit().map_err(|e| StoreError::Redb {
            message: format!("commit failed: {e}"),
        })
    }
}

impl std::fmt::Debug for WordlistStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordlistStore").finish()
    }
}
