use crate::cli::Cli;
use crate::context::budget::BudgetOptions;
use crate::context::chunker::ChunkOptions;
use crate::context::formatter::OutputFormat;
use crate::context::gather::ScanOptions;
use crate::error::{Error, Result};
use crate::io::Sink;
use crate::tokenizer::parse_budget;
use crate::ui::Lang;
use std::path::PathBuf;

/// Application configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct Config {
    pub paths: Vec<PathBuf>,
    pub scan: ScanOptions,
    /// Present when a token ceiling was given.
    pub budget: Option<BudgetOptions>,
    /// Present when a chunk size was given.
    pub chunking: Option<ChunkOptions>,
    pub chunk_index: Option<usize>,
    pub format: OutputFormat,
    pub include_tree: bool,
    pub signatures_only: bool,
    pub compact: bool,
    pub interactive: bool,
    /// Never empty.
    pub sinks: Vec<Sink>,
    pub lang: Lang,
}

fn budget_arg(value: Option<&str>) -> Result<Option<usize>> {
    value.map(parse_budget).transpose()
}

impl Config {
    /// Validates parsed arguments. Every error here is a usage error.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let format: OutputFormat = cli.format.parse()?;

        let max_tokens = budget_arg(cli.max_tokens.as_deref())?;
        let reserve = budget_arg(cli.reserve.as_deref())?;
        let budget = match (max_tokens, reserve) {
            (Some(max_tokens), reserve) => Some(BudgetOptions {
                max_tokens,
                reserve_tokens: reserve.unwrap_or(0),
                priority_patterns: cli.priority,
            }),
            (None, Some(_)) => {
                return Err(Error::InvalidConfig("--reserve requires --max-tokens".into()));
            }
            (None, None) => None,
        };

        let chunking = match budget_arg(cli.chunk_size.as_deref())? {
            Some(0) => {
                return Err(Error::InvalidConfig("--chunk-size must be greater than zero".into()));
            }
            Some(max_tokens_per_chunk) => Some(ChunkOptions {
                max_tokens_per_chunk,
                overlap: cli.overlap,
            }),
            None => None,
        };
        if cli.chunk_index.is_some() && chunking.is_none() {
            return Err(Error::InvalidConfig("--chunk-index requires --chunk-size".into()));
        }

        let mut sinks = Vec::new();
        if cli.stdout {
            sinks.push(Sink::Stdout);
        }
        if let Some(path) = cli.output {
            sinks.push(Sink::File(path));
        }
        if !cli.no_clipboard {
            sinks.push(Sink::Clipboard);
        }
        if sinks.is_empty() {
            sinks.push(Sink::Stdout);
        }

        Ok(Config {
            paths: cli.paths,
            scan: ScanOptions {
                include: cli.include,
                exclude: cli.exclude,
                max_file_size: cli.max_size,
            },
            budget,
            chunking,
            chunk_index: cli.chunk_index,
            format,
            include_tree: !cli.no_tree,
            signatures_only: cli.signatures,
            compact: cli.compact,
            interactive: cli.interactive,
            sinks,
            lang: cli.lang,
        })
    }
}
