use crate::constants::{DEFAULT_FORMAT, DEFAULT_MAX_FILE_SIZE};
use crate::ui::Lang;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "context-pack", version)]
#[command(
    about = "Pack a source tree into a token-bounded Markdown or XML context for language models, \
             optionally reduced to signatures and split into chunks."
)]
pub struct Cli {
    /// Directories or files to scan, defaults to "."
    #[arg(default_value = ".", num_args(1..))]
    pub paths: Vec<PathBuf>,

    /// Glob patterns a file must match to be scanned (any of them).
    #[arg(short = 'I', long = "include")]
    pub include: Vec<String>,

    /// Glob patterns to exclude files from processing.
    #[arg(short = 'x', long = "exclude")]
    pub exclude: Vec<String>,

    /// Maximum file size in bytes before skipping files.
    #[arg(short = 's', long = "max-size", default_value_t = DEFAULT_MAX_FILE_SIZE)]
    pub max_size: u64,

    /// Token ceiling for the whole context, e.g. 32000, 32k or 1.5k.
    #[arg(short = 'L', long = "max-tokens")]
    pub max_tokens: Option<String>,

    /// Tokens kept free under --max-tokens for the model's reply.
    #[arg(short = 'r', long = "reserve")]
    pub reserve: Option<String>,

    /// Path substrings fitted into the budget before anything else.
    #[arg(short = 'p', long = "priority")]
    pub priority: Vec<String>,

    /// Split the context into chunks no larger than this many tokens.
    #[arg(short = 'c', long = "chunk-size")]
    pub chunk_size: Option<String>,

    /// Trailing files of each chunk repeated at the start of the next.
    #[arg(long = "overlap", default_value_t = 0)]
    pub overlap: usize,

    /// Emit only this chunk (0-based).
    #[arg(short = 'k', long = "chunk-index")]
    pub chunk_index: Option<usize>,

    /// Output format: markdown (alias md, hybrid) or xml.
    #[arg(short = 'f', long = "format", default_value = DEFAULT_FORMAT)]
    pub format: String,

    /// Leave out the directory tree.
    #[arg(long = "no-tree")]
    pub no_tree: bool,

    /// Replace file bodies with the signatures of their declarations.
    #[arg(short = 'S', long = "signatures")]
    pub signatures: bool,

    /// Drop comment-only lines and squeeze blank runs.
    #[arg(short = 'C', long = "compact")]
    pub compact: bool,

    /// If set, opens the TUI for interactive selection.
    #[arg(short = 'i', long = "interactive")]
    pub interactive: bool,

    /// Print output to stdout.
    #[arg(short = 'o', long = "stdout")]
    pub stdout: bool,

    /// Do not copy to clipboard.
    #[arg(short = 'n', long = "no-clipboard")]
    pub no_clipboard: bool,

    /// Write output to this file.
    #[arg(long = "output")]
    pub output: Option<PathBuf>,

    /// Language of status messages.
    #[arg(long = "lang", value_enum, default_value_t = Lang::En)]
    pub lang: Lang,
}
