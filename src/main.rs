//! subuniq - subdomain deduplication tool
//!
//! Main entry point for the command-line application.

use clap::Parser;
use std::process;

use subuniq::cli::Args;
use subuniq::processor::{Processor, ProcessorConfig};
use subuniq::progress::{print_bullet, print_error, print_header};

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging
    if std::env::var_os("RUST_LOG").is_none() {
        if args.verbose {
            std::env::set_var("RUST_LOG", "debug");
        } else if !args.quiet {
            std::env::set_var("RUST_LOG", "info");
        }
    }
    env_logger::init();

    if let Err(e) = run(args) {
        print_error(&format!("{}", e));

        // Print chain of errors
        let mut source = e.source();
        while let Some(err) = source {
            print_error(&format!("  Caused by: {}", err));
            source = err.source();
        }

        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    // Validated before the input is touched
    let config = ProcessorConfig::from_args(&args)?;

    if !config.quiet && config.verbose {
        print_config(&config);
    }

    let processor = Processor::new(config);
    processor.process()?;

    Ok(())
}

/// Print configuration summary
fn print_config(config: &ProcessorConfig) {
    print_header("Configuration");

    print_bullet(&format!("Input:        {:?}", config.input));
    print_bullet(&format!("Output:       {:?}", config.output));
    print_bullet(&format!("Format:       {}", config.format));

    if !config.ignore.is_empty() {
        print_bullet(&format!("Ignore:       {:?}", config.ignore));
    }

    if let Some(ref filter) = config.filter {
        print_bullet(&format!("Filter:       {}", filter));
    }

    print_bullet(&format!("Validate:     {}", config.validate));
    print_bullet(&format!("Buffer size:  {} KB", config.buffer_size / 1024));
}
