//! # subuniq
//!
//! Subdomain deduplication tool for recon workflows.
//!
//! ## Features
//!
//! - **Case-insensitive deduplication**: lines are trimmed and lowercased before comparison
//! - **Ignore lists**: drop any subdomain containing one of several substrings
//! - **Substring filter**: keep only subdomains containing a given substring
//! - **Hostname validation**: drop entries that are not dotted hostnames with an alphabetic TLD
//! - **Output formats**: plain text, JSON array or single-column CSV, always sorted
//! - **Encoding detection**: UTF-8, UTF-16 and legacy single-byte inputs
//!
//! ## Usage
//!
//! ```bash
//! # Deduplicate
//! subuniq -i subs.txt -o unique.txt
//!
//! # Ignore test/dev hosts, emit JSON
//! subuniq -i subs.txt -o unique.json --ignore test,dev --format json
//!
//! # Only well-formed hosts under .gov.eg
//! subuniq -i subs.txt -o gov.txt --filter .gov.eg --valid
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use subuniq::output::OutputFormat;
//! use subuniq::processor::{Processor, ProcessorConfig};
//!
//! let mut config = ProcessorConfig::new("subs.txt", "unique.json");
//! config.ignore = vec!["test".to_string()];
//! config.format = OutputFormat::Json;
//!
//! let stats = Processor::new(config).process().unwrap();
//! println!("{} unique", stats.unique());
//! ```

pub mod cli;
pub mod dedup;
pub mod encoding;
pub mod error;
pub mod filter;
pub mod output;
pub mod processor;
pub mod progress;

pub use cli::Args;
pub use dedup::{Deduplicator, UniqueSet};
pub use error::SubuniqError;
pub use output::OutputFormat;
pub use processor::{Processor, ProcessorConfig};
