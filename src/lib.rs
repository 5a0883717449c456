pub mod cli;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod selection;
pub mod tokenizer;
pub mod ui;

pub use context::budget::{self, BudgetOptions, BudgetResult};
pub use context::chunker::{self, Chunk, ChunkOptions};
pub use context::formatter::{OutputFormat, RenderOptions, render};
pub use context::gather::{self, ScanOptions};
pub use context::symbols::{self, CodeSymbol, Extractor, SymbolKind};
pub use context::types::{Language, ScannedFile};
pub use error::{Error, Result};
pub use pipeline::{Assembly, Pipeline};
pub use selection::FileTree;
