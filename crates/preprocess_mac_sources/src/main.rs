// crates/preprocess_mac_sources/src/main.rs

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Arg, Command};

use preprocess_mac_sources::{read_file_list, run_batch, BatchOptions, FsTextStore};

fn main() -> Result<()> {
    let matches = Command::new("preprocess_mac_sources")
        .version("0.1.0")
        .about("Normalizes platform-conditional comment markers across an ordered list of source files")
        .arg(
            Arg::new("files")
                .value_name("FILE")
                .num_args(0..)
                .help("Source files to rewrite in place, processed in order"),
        )
        .arg(
            Arg::new("file_list")
                .long("file-list")
                .value_name("PATH")
                .num_args(1)
                .help("File holding the ordered list of paths, one per line; processed before any FILE arguments"),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .help("Verify block-marker pairing and abort before writing an unbalanced file")
                .action(clap::ArgAction::SetTrue)
                .default_value("false"),
        )
        .arg(
            Arg::new("dry_run")
                .long("dry-run")
                .help("Report files that would change without writing anything")
                .action(clap::ArgAction::SetTrue)
                .default_value("false"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue)
                .default_value("false"),
        )
        .get_matches();

    let mut files: Vec<PathBuf> = Vec::new();
    if let Some(list_path) = matches.get_one::<String>("file_list") {
        files.extend(read_file_list(Path::new(list_path))?);
    }
    files.extend(
        matches
            .get_many::<String>("files")
            .unwrap_or_default()
            .map(PathBuf::from),
    );

    if files.is_empty() {
        anyhow::bail!("No input files; pass FILE arguments or --file-list <PATH>");
    }

    let options = BatchOptions {
        check_balance: *matches.get_one::<bool>("check").unwrap(),
        dry_run: *matches.get_one::<bool>("dry_run").unwrap(),
        verbose: *matches.get_one::<bool>("verbose").unwrap(),
    };

    if options.verbose {
        println!("Processing {} file(s)", files.len());
    }

    let outcome = run_batch(&FsTextStore, &files, options)?;

    println!(
        "Done: {} file(s) processed, {} {}",
        outcome.processed,
        outcome.changed,
        if options.dry_run { "would change" } else { "rewritten" }
    );

    Ok(())
}
