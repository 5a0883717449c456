use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use context_pack::cli::Cli;
use context_pack::config::Config;
use context_pack::constants::{
    DEFAULT_LOG_FILTER, EXIT_CHUNK_RANGE, EXIT_RUNTIME, EXIT_USAGE, LOG_ENV,
};
use context_pack::io::{self, Sink};
use context_pack::tokenizer::format_tokens;
use context_pack::ui::{self, Messages};
use context_pack::{Error, FileTree, Pipeline, gather};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    // clap exits with status 2 on malformed arguments
    let cli = Cli::parse();
    let config = match Config::from_cli(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            match err.downcast_ref::<Error>() {
                Some(Error::ChunkIndexOutOfRange { .. }) => ExitCode::from(EXIT_CHUNK_RANGE),
                Some(Error::InvalidPattern { .. }) => ExitCode::from(EXIT_USAGE),
                _ => ExitCode::from(EXIT_RUNTIME),
            }
        }
    }
}

fn run(config: &Config) -> Result<()> {
    let messages = Messages::for_lang(config.lang);

    let mut files = gather::scan_all(&config.paths, &config.scan).context("scanning inputs")?;
    if files.is_empty() {
        eprintln!("{}", messages.no_files);
        return Ok(());
    }

    if config.interactive {
        match ui::select_files_tui(FileTree::from_files(files), messages)? {
            Some(tree) => files = tree.selected_files(),
            None => {
                eprintln!("{}", messages.cancelled);
                return Ok(());
            }
        }
        if files.is_empty() {
            eprintln!("{}", messages.nothing_selected);
            return Ok(());
        }
    }

    let assembly = Pipeline::run(config, files)?;
    let delivered = io::emit(&config.sinks, &assembly.joined()).context("writing output")?;
    for sink in delivered {
        match sink {
            Sink::Clipboard => eprintln!("{}", messages.copied),
            Sink::File(path) => eprintln!("{}", messages.wrote(&path.display().to_string())),
            Sink::Stdout => {}
        }
    }

    if let Some(budget) = &assembly.budget
        && !budget.excluded.is_empty()
    {
        eprintln!("{}", messages.excluded(budget.excluded.len(), budget.budget_remaining));
    }
    eprintln!(
        "{}",
        messages.summary(
            assembly.files.len(),
            &format_tokens(assembly.file_tokens()),
            assembly.chunk_total
        )
    );
    Ok(())
}
