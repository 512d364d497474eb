use clap::{ArgAction, Parser};
use corpus_pipeline::{index::Index, indexer, logging, CoreError};
use std::path::PathBuf;
use std::process::ExitCode;

/// Builds an inverted index from a page directory.
#[derive(Parser, Debug)]
struct Args {
    /// Directory of crawled pages, as produced by `crawler`.
    page_dir: PathBuf,

    /// Path the serialised index is written to.
    index_file: PathBuf,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn run(args: &Args) -> corpus_pipeline::Result<()> {
    if !args.page_dir.is_dir() {
        return Err(CoreError::Startup(format!(
            "page directory {:?} does not exist or is not a directory",
            args.page_dir
        )));
    }

    let index: Index = indexer::build_index(&args.page_dir)?;
    index.save(&args.index_file)?;
    tracing::info!(words = index.len(), "index written");
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("indexer: {e}");
            ExitCode::FAILURE
        }
    }
}
