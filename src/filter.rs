//! Line filtering module
//!
//! Normalization plus the ignore-list, substring and hostname validity rules
//! applied to every line before it reaches the unique set.

use regex::Regex;

/// Common regex patterns for subdomain filtering
pub mod patterns {
    /// Dotted labels of `[A-Za-z0-9_-]`, ending in an alphabetic TLD of 2+ chars
    pub const SUBDOMAIN: &str = r"^(?:[a-zA-Z0-9_-]+\.)+[a-zA-Z]{2,}$";
}

/// Why a line was rejected by [`LineFilter::check`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Contains one of the ignore substrings
    Ignored,
    /// Does not contain the filter substring
    Filtered,
    /// Failed the hostname validity pattern
    Invalid,
}

/// Trim surrounding whitespace and lowercase.
///
/// Returns `None` for lines that are blank after trimming.
#[inline]
pub fn normalize(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    Some(line.to_lowercase())
}

/// Parse a comma-separated ignore list into lowercase substrings
pub fn parse_ignore_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Filter configuration
#[derive(Debug, Clone)]
pub struct LineFilter {
    /// Lowercase substrings that disqualify a line
    ignore: Vec<String>,
    /// Substring a line must contain (None means no filter)
    contains: Option<String>,
    /// Hostname pattern (None means validation disabled)
    validity: Option<Regex>,
}

impl LineFilter {
    /// Create a new line filter
    pub fn new(ignore: Vec<String>, contains: Option<&str>, validate: bool) -> Self {
        let contains = contains
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty());

        let validity = if validate {
            Some(subdomain_regex())
        } else {
            None
        };

        Self {
            ignore,
            contains,
            validity,
        }
    }

    /// Check an already normalized line: ignore list, then filter, then validity
    #[inline]
    pub fn check(&self, line: &str) -> Result<(), Rejection> {
        if self.ignore.iter().any(|ign| line.contains(ign.as_str())) {
            return Err(Rejection::Ignored);
        }

        if let Some(ref needle) = self.contains {
            if !line.contains(needle.as_str()) {
                return Err(Rejection::Filtered);
            }
        }

        if let Some(ref pattern) = self.validity {
            if !pattern.is_match(line) {
                return Err(Rejection::Invalid);
            }
        }

        Ok(())
    }

    pub fn contains(&self) -> Option<&str> {
        self.contains.as_deref()
    }

    /// Check if any rule is active
    pub fn has_rules(&self) -> bool {
        !self.ignore.is_empty() || self.contains.is_some() || self.validity.is_some()
    }
}

fn subdomain_regex() -> Regex {
    // Constant pattern, covered by tests.
    Regex::new(patterns::SUBDOMAIN).expect("subdomain pattern compiles")
}
