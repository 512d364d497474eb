use clap::{ArgAction, Parser};
use corpus_pipeline::index::Index;
use corpus_pipeline::query::{self, QueryOutcome};
use corpus_pipeline::{logging, CoreError};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Interactive boolean query engine over a crawled page directory and index.
#[derive(Parser, Debug)]
struct Args {
    /// Directory of crawled pages, as produced by `crawler`.
    page_dir: PathBuf,

    /// Index file, as produced by `indexer`.
    index_file: PathBuf,

    /// Suppress the `> ` prompt (for piped/scripted input).
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,

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
    let index = Index::load(&args.index_file)?;

    let stdin = io::stdin();
    let mut handle = stdin.lock();
    let mut stdout = io::stdout();
    let mut line = String::new();

    loop {
        if !args.quiet {
            write!(stdout, "> ")?;
            stdout.flush()?;
        }

        line.clear();
        let bytes_read = handle.read_line(&mut line)?;
        if bytes_read == 0 {
            writeln!(stdout)?;
            return Ok(());
        }

        let query_text = line.trim_end_matches(['\n', '\r']);
        if query_text.trim().is_empty() {
            continue;
        }

        match query::answer(query_text, &index, &args.page_dir)? {
            QueryOutcome::Invalid => writeln!(stdout, "[invalid query]")?,
            QueryOutcome::Rendered(text) => write!(stdout, "{text}")?,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("query: {e}");
            ExitCode::FAILURE
        }
    }
}
