//! Command-line interface definition for subuniq
//!
//! Provides argument parsing for the subdomain deduplication tool.

use clap::Parser;
use std::path::PathBuf;

/// Subdomain deduplication tool
///
/// Case-insensitively deduplicates a list of subdomains, optionally dropping
/// ignored, unmatched or malformed entries, and writes them back sorted.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "subuniq",
    version,
    about = "Subdomain deduplication tool",
    long_about = r#"
Read subdomains from a file, lowercase and trim them, drop duplicates and
write the sorted result as plain text, JSON or CSV.

EXAMPLES:
    # Basic deduplication
    subuniq -i subs.txt -o unique.txt

    # Skip anything containing "test" or "dev"
    subuniq -i subs.txt -o unique.txt --ignore test,dev

    # Only Egyptian government hosts, as JSON
    subuniq -i subs.txt -o gov.json --filter .gov.eg --format json

    # Drop malformed hostnames
    subuniq -i subs.txt -o unique.csv --valid --format csv
"#
)]
pub struct Args {
    /// Input file path
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Output file path
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Comma separated substrings to ignore
    #[arg(long, value_name = "LIST")]
    pub ignore: Option<String>,

    /// Output format: plain, json, csv
    #[arg(short, long, value_name = "FORMAT", default_value = "plain")]
    pub format: String,

    /// Only include subdomains containing this substring
    #[arg(long, value_name = "SUBSTRING")]
    pub filter: Option<String>,

    /// Only include valid subdomains
    #[arg(long, default_value_t = false)]
    pub valid: bool,

    /// Output buffer size (e.g. "64KB", "8MB")
    #[arg(long, value_name = "SIZE", default_value = "8MB")]
    pub buffer_size: String,

    /// Quiet mode - no progress or summary
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    /// Parse buffer size string to bytes
    pub fn parse_buffer_size(&self) -> anyhow::Result<usize> {
        parse_size(&self.buffer_size)
    }
}

/// Parse human-readable size string to bytes
pub fn parse_size(size_str: &str) -> anyhow::Result<usize> {
    let size_str = size_str.trim().to_uppercase();

    let (num_str, multiplier) = if let Some(n) = size_str.strip_suffix("GB") {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = size_str.strip_suffix("MB") {
        (n, 1024 * 1024)
    } else if let Some(n) = size_str.strip_suffix("KB") {
        (n, 1024)
    } else if let Some(n) = size_str.strip_suffix('B') {
        (n, 1)
    } else {
        (size_str.as_str(), 1)
    };

    let num: usize = num_str
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid size format: '{}'", size_str))?;

    if num == 0 {
        anyhow::bail!("Size must be greater than zero: '{}'", size_str);
    }

    Ok(num * multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_args() {
        let args = Args::try_parse_from(["subuniq", "-i", "in.txt", "-o", "out.txt"]).unwrap();

        assert_eq!(args.input, PathBuf::from("in.txt"));
        assert_eq!(args.output, PathBuf::from("out.txt"));
        assert_eq!(args.format, "plain");
        assert!(args.ignore.is_none());
        assert!(args.filter.is_none());
        assert!(!args.valid);
    }

    #[test]
    fn test_parse_all_options() {
        let args = Args::try_parse_from([
            "subuniq", "-i", "in.txt", "-o", "out.json", "--ignore", "test,dev", "--format", "json",
            "--filter", ".gov.eg", "--valid", "--buffer-size", "64KB", "-q",
        ])
        .unwrap();

        assert_eq!(args.ignore.as_deref(), Some("test,dev"));
        assert_eq!(args.format, "json");
        assert_eq!(args.filter.as_deref(), Some(".gov.eg"));
        assert!(args.valid);
        assert!(args.quiet);
        assert_eq!(args.parse_buffer_size().unwrap(), 64 * 1024);
    }

    #[test]
    fn test_missing_required() {
        assert!(Args::try_parse_from(["subuniq", "-i", "in.txt"]).is_err());
        assert!(Args::try_parse_from(["subuniq", "-o", "out.txt"]).is_err());
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("64MB").unwrap(), 64 * 1024 * 1024);
        assert_eq!(parse_size("8gb").unwrap(), 8 * 1024 * 1024 * 1024);
        assert_eq!(parse_size("1024KB").unwrap(), 1024 * 1024);
        assert_eq!(parse_size("512").unwrap(), 512);
        assert!(parse_size("lots").is_err());
        assert!(parse_size("0KB").is_err());
    }
}
