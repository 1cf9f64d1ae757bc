//! Progress display module
//!
//! Styled status lines, the line-count spinner and the end-of-run summary.

use crate::dedup::DedupStats;
use crate::output::OutputFormat;
use bytesize::ByteSize;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

/// How often the spinner message is refreshed, in lines
pub const PROGRESS_STEP: u64 = 1000;

/// Print a section header
pub fn print_header(text: &str) {
    println!("\n{} {}", "▶".green(), text.green().bold());
}

/// Print an info message
pub fn print_info(text: &str) {
    println!("  {} {}", "ℹ".cyan(), text);
}

/// Print a success message
pub fn print_success(text: &str) {
    println!("  {} {}", "✔".green(), text.green());
}

/// Print a warning message
pub fn print_warning(text: &str) {
    println!("  {} {}", "⚠".yellow(), text.yellow());
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".red(), text.red());
}

/// Print a bullet point
pub fn print_bullet(text: &str) {
    println!("  {} {}", "•".green(), text);
}

/// Create a styled spinner for line-count progress
pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();

    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ");
    pb.set_style(style);

    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Statistics for one run
#[derive(Debug, Clone)]
pub struct ProcessingStats {
    /// Every line read, blank ones included
    pub total_lines: u64,
    pub input_bytes: u64,
    /// Entries written to the output
    pub output_lines: u64,
    pub output_bytes: u64,
    pub dedup: DedupStats,
    pub start_time: Instant,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self {
            total_lines: 0,
            input_bytes: 0,
            output_lines: 0,
            output_bytes: 0,
            dedup: DedupStats::new(),
            start_time: Instant::now(),
        }
    }

    pub fn unique(&self) -> u64 {
        self.dedup.unique
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn lines_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.total_lines as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Print final statistics along with the active rules
    pub fn print_summary(&self, rules: &RuleSummary<'_>) {
        println!();
        println!("{}", "═".repeat(60).green());
        println!("{}", "       Done! Unique subdomains saved.".green().bold());
        println!("{}", "═".repeat(60).green());
        println!();

        println!("  {} {}", "Total input lines:".green(), format_number(self.total_lines));
        println!("  {} {}", "Input size:       ".green(), ByteSize(self.input_bytes));
        println!("  {} {}", "Blank lines:      ".green(), format_number(self.dedup.blank));
        println!("  {} {}", "Duplicates:       ".yellow(), format_number(self.dedup.duplicates));

        if self.dedup.rejected() > 0 {
            println!("  {} {}", "Dropped by rules: ".yellow(), format_number(self.dedup.rejected()));
        }

        println!(
            "  {} {}",
            "Unique subdomains:".green().bold(),
            format_number(self.unique()).green().bold()
        );
        println!();

        if !rules.ignore.is_empty() {
            println!("  {} {:?}", "Ignored substrings:".cyan(), rules.ignore);
        }
        if let Some(filter) = rules.filter {
            println!("  {} {}", "Filtered by:       ".cyan(), filter);
        }
        if rules.validate {
            println!("  {}", "Only valid subdomains included".cyan());
        }

        println!("  {} {}", "Format:            ".green(), rules.format);
        println!("  {} {:?}", "Output:            ".green(), rules.output);
        println!(
            "  {} {} entries, {}",
            "Written:           ".green(),
            format_number(self.output_lines),
            ByteSize(self.output_bytes)
        );
        println!(
            "  {} {} ({:.0} lines/sec)",
            "Duration:          ".green(),
            format_duration(self.elapsed()),
            self.lines_per_second()
        );
        println!();
        println!("{}", "═".repeat(60).green());
    }
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Active rules and destination, shown in the summary
#[derive(Debug)]
pub struct RuleSummary<'a> {
    pub ignore: &'a [String],
    pub filter: Option<&'a str>,
    pub validate: bool,
    pub format: OutputFormat,
    pub output: &'a std::path::Path,
}

/// Format a number with thousand separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{:.1}s", duration.as_secs_f64())
    } else if secs < 3600 {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        format!("{}h {}m", hours, mins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(123), "123");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(30)), "30.0s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_secs(3661)), "1h 1m");
    }

    #[test]
    fn test_stats() {
        let mut stats = ProcessingStats::new();
        stats.total_lines = 100;
        stats.dedup.unique = 40;
        stats.dedup.duplicates = 10;

        assert_eq!(stats.unique(), 40);
        assert!(stats.lines_per_second() >= 0.0);
    }
}
