use clap::{ArgAction, Parser};
use corpus_pipeline::{crawler, logging};
use std::path::PathBuf;
use std::process::ExitCode;

/// Breadth-first crawl from a seed URL into a page directory.
#[derive(Parser, Debug)]
struct Args {
    /// Seed URL to start crawling from.
    seed_url: String,

    /// Directory pages are saved into (created if absent).
    page_dir: PathBuf,

    /// Maximum crawl depth (0 saves only the seed page).
    max_depth: u32,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match crawler::crawl(&args.seed_url, &args.page_dir, args.max_depth) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("crawler: {e}");
            ExitCode::FAILURE
        }
    }
}
