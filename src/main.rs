//! wordloom CLI: turn documents into practice-ready vocabulary lists.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use wordloom::config::WordloomConfig;
use wordloom::ingest::extract::GlossaryExtractor;
use wordloom::ingest::parser::DocumentFormat;
use wordloom::ingest::{ExtractConfig, extract_file};
use wordloom::practice;
use wordloom::store::WordlistStore;
use wordloom::wordlist::{CombineOptions, PriorityStrategy, combine};

#[derive(Parser)]
#[command(name = "wordloom", version, about = "Document-to-vocabulary toolkit")]
struct Cli {
    /// Data directory for saved wordlists.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file (TOML).
    #[arg(long, global = true, default_value = "wordloom.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and chunk a document, extracting word pairs per chunk.
    Extract {
        /// Document to process (pdf, html, or plain text).
        file: PathBuf,

        /// Bilingual glossary (TSV: source<TAB>target per line).
        #[arg(long)]
        glossary: PathBuf,

        /// Override extension-based format detection (pdf|html|text).
        #[arg(long)]
        format: Option<DocumentFormat>,

        /// Emit chunk results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Extract a document and combine chunks into one deduplicated wordlist.
    Combine {
        /// Document to process (pdf, html, or plain text).
        file: PathBuf,

        /// Bilingual glossary (TSV: source<TAB>target per line).
        #[arg(long)]
        glossary: PathBuf,

        /// Maximum words in the combined list (10-50).
        #[arg(long)]
        max_words: Option<usize>,

        /// Chunk priority strategy (first-chunk|frequency|random).
        #[arg(long)]
        strategy: Option<PriorityStrategy>,

        /// Override extension-based format detection (pdf|html|text).
        #[arg(long)]
        format: Option<DocumentFormat>,

        /// Save the combined wordlist under this name.
        #[arg(long)]
        save: Option<String>,

        /// Emit the combined result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate practice questions from a saved wordlist.
    Practice {
        /// Name of the saved wordlist.
        name: String,

        #[command(subcommand)]
        mode: PracticeMode,
    },

    /// Manage saved wordlists.
    Wordlist {
        #[command(subcommand)]
        action: WordlistAction,
    },
}

#[derive(Subcommand)]
enum PracticeMode {
    /// Match source words against a shuffled translation column.
    Matching {
        /// RNG seed for a reproducible shuffle.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Fill in the blanked source word given its translation.
    FillBlank,
    /// Pick the translation out of four choices.
    MultipleChoice {
        /// RNG seed for reproducible choices.
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Subcommand)]
enum WordlistAction {
    /// List all saved wordlists.
    List,
    /// Show a saved wordlist.
    Show {
        /// Wordlist name.
        name: String,
    },
    /// Remove a saved wordlist (revokes its share tokens).
    Remove {
        /// Wordlist name.
        name: String,
    },
    /// Mint a share token for a wordlist.
    Share {
        /// Wordlist name.
        name: String,
    },
    /// Resolve a share token to its wordlist.
    Resolve {
        /// Share token.
        token: String,
    },
    /// Revoke a share token.
    Revoke {
        /// Share token.
        token: String,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = WordloomConfig::load(&cli.config).into_diagnostic()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| PathBuf::from(".wordloom"));

    match cli.command {
        Commands::Extract {
            file,
            glossary,
            format,
            json,
        } => {
            let extractor = GlossaryExtractor::from_tsv(&glossary).into_diagnostic()?;
            let extract_config = ExtractConfig {
                format,
                chunker: config.chunker.clone(),
            };
            let report = extract_file(&file, &extractor, &extract_config).into_diagnostic()?;

            if json {
                let out = serde_json::to_string_pretty(&report.chunks).into_diagnostic()?;
                println!("{out}");
            } else {
                println!(
                    "Extracted {} pairs across {} chunks from {}",
                    report.pair_count,
                    report.chunk_count,
                    file.display()
                );
                for chunk in &report.chunks {
                    println!("  [{}] {} pairs", chunk.chunk_id, chunk.words.len());
                    for pair in &chunk.words {
                        println!("    {} = {}", pair.source, pair.target);
                    }
                }
            }
        }

        Commands::Combine {
            file,
            glossary,
            max_words,
            strategy,
            format,
            save,
            json,
        } => {
            let extractor = GlossaryExtractor::from_tsv(&glossary).into_diagnostic()?;
            let extract_config = ExtractConfig {
                format,
                chunker: config.chunker.clone(),
            };
            let report = extract_file(&file, &extractor, &extract_config).into_diagnostic()?;

            let options = CombineOptions {
                max_words: max_words.unwrap_or(config.combine.max_words),
                strategy: strategy.unwrap_or(config.combine.strategy),
            };
            let result = combine(&report.chunks, &options).into_diagnostic()?;

            if json {
                let out = serde_json::to_string_pretty(&result).into_diagnostic()?;
                println!("{out}");
            } else {
                let meta = &result.metadata;
                println!(
                    "Combined {} words ({} chunks ok, {} failed, {} duplicates removed, {} before limit)",
                    meta.words_after_limit,
                    meta.successful_chunks,
                    meta.failed_chunks,
                    meta.duplicates_removed,
                    meta.words_before_limit
                );
                for (i, pair) in result.words.iter().enumerate() {
                    println!("  {}. {} = {}", i + 1, pair.source, pair.target);
                }
            }

            if let Some(name) = save {
                let store = WordlistStore::open(&data_dir).into_diagnostic()?;
                store
                    .save(&name, &result.words, &result.metadata)
                    .into_diagnostic()?;
                println!("Saved wordlist \"{name}\"");
            }
        }

        Commands::Practice { name, mode } => {
            let store = WordlistStore::open(&data_dir).into_diagnostic()?;
            let saved = store.load(&name).into_diagnostic()?;

            match mode {
                PracticeMode::Matching { seed } => {
                    let seed = seed.or(config.practice.seed).unwrap_or_else(rand::random);
                    let set = practice::matching(&saved.words, seed).into_diagnostic()?;
                    println!("Matching ({} pairs, seed {seed}):", set.sources.len());
                    for (i, source) in set.sources.iter().enumerate() {
                        println!("  {}. {}", i + 1, source);
                    }
                    println!();
                    for (j, target) in set.shuffled_targets.iter().enumerate() {
                        println!("  {}. {}", (b'a' + j as u8) as char, target);
                    }
                }
                PracticeMode::FillBlank => {
                    let items = practice::fill_in_blank(&saved.words);
                    println!("Fill in the blank ({} items):", items.len());
                    for (i, item) in items.iter().enumerate() {
                        println!("  {}. {} = {}", i + 1, item.target, item.hint);
                    }
                }
                PracticeMode::MultipleChoice { seed } => {
                    let seed = seed.or(config.practice.seed).unwrap_or_else(rand::random);
                    let items =
                        practice::multiple_choice(&saved.words, seed).into_diagnostic()?;
                    println!("Multiple choice ({} items, seed {seed}):", items.len());
                    for (i, item) in items.iter().enumerate() {
                        println!("  {}. {}", i + 1, item.source);
                        for (j, choice) in item.choices.iter().enumerate() {
                            println!("     {}) {}", (b'a' + j as u8) as char, choice);
                        }
                    }
                }
            }
        }

        Commands::Wordlist { action } => {
            let store = WordlistStore::open(&data_dir).into_diagnostic()?;

            match action {
                WordlistAction::List => {
                    let names = store.list().into_diagnostic()?;
                    if names.is_empty() {
                        println!("No saved wordlists.");
                    } else {
                        println!("Wordlists ({}):", names.len());
                        for name in &names {
                            println!("  {name}");
                        }
                    }
                }
                WordlistAction::Show { name } => {
                    let saved = store.load(&name).into_diagnostic()?;
                    println!("Wordlist: \"{}\"", saved.name);
                    println!("  saved_at: {}", saved.saved_at);
                    println!("  words ({}):", saved.words.len());
                    for pair in &saved.words {
                        println!("    {} = {}", pair.source, pair.target);
                    }
                }
                WordlistAction::Remove { name } => {
                    if store.remove(&name).into_diagnostic()? {
                        println!("Removed wordlist \"{name}\"");
                    } else {
                        println!("No wordlist named \"{name}\"");
                    }
                }
                WordlistAction::Share { name } => {
                    let token = store.share(&name).into_diagnostic()?;
                    println!("Share token for \"{name}\": {token}");
                }
                WordlistAction::Resolve { token } => {
                    let saved = store.resolve(&token).into_diagnostic()?;
                    println!("Token resolves to \"{}\" ({} words)", saved.name, saved.words.len());
                }
                WordlistAction::Revoke { token } => {
                    if store.revoke(&token).into_diagnostic()? {
                        println!("Revoked token {token}");
                    } else {
                        println!("Unknown token {token}");
                    }
                }
            }
        }
    }

    Ok(())
}
