//! Core processing engine
//!
//! Runs one input file through normalize, filter and dedup, then sorts the
//! unique set and writes it in the requested format.

use crate::cli::Args;
use crate::dedup::Deduplicator;
use crate::encoding::MmapLineIterator;
use crate::error::{Result, SubuniqError};
use crate::filter::{parse_ignore_list, LineFilter};
use crate::output::{OutputFormat, OutputWriter, DEFAULT_BUFFER_SIZE};
use crate::progress::{
    create_spinner, print_header, print_info, print_success, print_warning, ProcessingStats,
    RuleSummary, PROGRESS_STEP,
};

use colored::*;
use std::path::PathBuf;

/// Average subdomain line length, used to pre-size the unique set
const AVG_LINE_BYTES: u64 = 24;

/// Upper bound on the pre-sized set; inputs heavy in duplicates grow from here
const MAX_PRESIZE: usize = 1 << 20;

/// Processor configuration
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub ignore: Vec<String>,
    pub filter: Option<String>,
    pub validate: bool,
    pub format: OutputFormat,
    pub buffer_size: usize,
    pub quiet: bool,
    pub verbose: bool,
}

impl ProcessorConfig {
    /// Defaults for everything except the two paths
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            ignore: Vec::new(),
            filter: None,
            validate: false,
            format: OutputFormat::Plain,
            buffer_size: DEFAULT_BUFFER_SIZE,
            quiet: true,
            verbose: false,
        }
    }

    /// Build and validate the configuration from command-line arguments
    pub fn from_args(args: &Args) -> Result<Self> {
        let format: OutputFormat = args.format.parse()?;
        let buffer_size = args
            .parse_buffer_size()
            .map_err(|e| SubuniqError::InvalidOption(e.to_string()))?;

        Ok(Self {
            input: args.input.clone(),
            output: args.output.clone(),
            ignore: args.ignore.as_deref().map(parse_ignore_list).unwrap_or_default(),
            filter: args.filter.clone(),
            validate: args.valid,
            format,
            buffer_size,
            quiet: args.quiet,
            verbose: args.verbose,
        })
    }

    fn line_filter(&self) -> LineFilter {
        LineFilter::new(self.ignore.clone(), self.filter.as_deref(), self.validate)
    }
}

/// Main processor
pub struct Processor {
    config: ProcessorConfig,
}

impl Processor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self { config }
    }

    /// Read, dedup, sort and write. The output file is only created once the
    /// input has been fully read.
    pub fn process(&self) -> Result<ProcessingStats> {
        let mut stats = ProcessingStats::new();
        let quiet = self.config.quiet;

        if !quiet {
            print_header("Reading input...");
            print_info(&format!("Input: {:?}", self.config.input));
        }

        let lines = MmapLineIterator::new(&self.config.input)?;
        stats.input_bytes = lines.size() as u64;
        log::debug!("Mapped {} bytes from {:?}", stats.input_bytes, self.config.input);

        let filter = self.config.line_filter();
        if !filter.has_rules() {
            log::debug!("No ignore, filter or validity rules active");
        }
        // Normalized by LineFilter, shown in the summary
        let active_filter = filter.contains().map(str::to_string);
        let mut dedup = Deduplicator::new(filter, estimate_capacity(stats.input_bytes));

        let pb = if quiet {
            indicatif::ProgressBar::hidden()
        } else {
            create_spinner("Processing...")
        };

        for line in lines {
            stats.total_lines += 1;
            let outcome = dedup.ingest(&line);
            log::trace!("{:?}: {:?}", line, outcome);

            if stats.total_lines % PROGRESS_STEP == 0 {
                pb.set_message(format!("Processed {} lines...", stats.total_lines));
            }
        }

        let done = format!("Processed {} lines", stats.total_lines);
        pb.finish_with_message(done.as_str().green().to_string());

        let (unique, dedup_stats) = dedup.finalize();
        stats.dedup = dedup_stats;
        log::info!(
            "{} lines read, {} unique, {} duplicates, {} dropped by rules",
            stats.total_lines,
            unique.len(),
            stats.dedup.duplicates,
            stats.dedup.rejected()
        );

        if unique.is_empty() && !quiet {
            print_warning("No subdomains left after filtering, output will be empty");
        }

        let mut writer = OutputWriter::new(self.config.output.clone(), self.config.buffer_size)?;
        writer.write_all(&unique, self.config.format)?;
        stats.output_lines = writer.lines_written();
        stats.output_bytes = writer.bytes_written();

        if !quiet {
            print_success(&format!("Output written to: {:?}", writer.path()));
            stats.print_summary(&RuleSummary {
                ignore: &self.config.ignore,
                filter: active_filter.as_deref(),
                validate: self.config.validate,
                format: self.config.format,
                output: writer.path(),
            });
        }

        Ok(stats)
    }
}

/// Expected unique entries for an input of `input_bytes`, capped at [`MAX_PRESIZE`]
fn estimate_capacity(input_bytes: u64) -> usize {
    ((input_bytes / AVG_LINE_BYTES) as usize).min(MAX_PRESIZE)
}
