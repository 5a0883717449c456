use crate::config::Config;
use crate::context::budget::{self, BudgetResult};
use crate::context::chunker::{self, Chunk};
use crate::context::formatter::{self, RenderOptions};
use crate::context::symbols::{self, CodeSymbol};
use crate::context::types::ScannedFile;
use crate::error::{Error, Result};
use crate::tokenizer::count_tokens;
use std::collections::{HashMap, HashSet};

/// One rendered document, plus its chunk header when the run is chunked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub header: Option<String>,
    pub text: String,
    pub tokens: usize,
}

/// Everything a run produced.
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    /// Files that made it into the output, in input order.
    pub files: Vec<ScannedFile>,
    pub budget: Option<BudgetResult>,
    /// Chunk count of the run; 0 when not chunked.
    pub chunk_total: usize,
    /// A single document, every chunk, or the one chunk asked for.
    pub outputs: Vec<Rendered>,
}

impl Assembly {
    /// Sum of the file token counts that were packed.
    pub fn file_tokens(&self) -> usize {
        self.files.iter().map(ScannedFile::tokens).sum()
    }

    /// The text handed to the sinks: each output preceded by its header line.
    pub fn joined(&self) -> String {
        self.outputs
            .iter()
            .map(|r| match &r.header {
                Some(h) => format!("{h}\n\n{}", r.text),
                None => r.text.clone(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Pipeline for assembling context outputs: budget fit, symbol extraction,
/// chunking and rendering, each stage optional except the last.
pub struct Pipeline<'a> {
    config: &'a Config,
    files: Vec<ScannedFile>,
    budget: Option<BudgetResult>,
    symbols: HashMap<String, Vec<CodeSymbol>>,
    chunks: Vec<Chunk>,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a Config,
        files: Vec<ScannedFile>,
    ) -> Self {
        Pipeline {
            config,
            files,
            budget: None,
            symbols: HashMap::new(),
            chunks: Vec::new(),
        }
    }

    /// Runs every configured stage over `files`.
    pub fn run(
        config: &'a Config,
        files: Vec<ScannedFile>,
    ) -> Result<Assembly> {
        let mut pipeline = Pipeline::new(config, files);
        pipeline.fit_budget();
        pipeline.extract_symbols();
        pipeline.split_chunks();
        pipeline.render()
    }

    /// Keeps only the files the budget admits, preserving input order.
    pub fn fit_budget(&mut self) {
        let Some(options) = &self.config.budget else {
            return;
        };
        let result = budget::fit(&self.files, options);
        let admitted: HashSet<&str> = result.included.iter().map(|f| f.path.as_str()).collect();
        self.files.retain(|f| admitted.contains(f.path.as_str()));
        self.budget = Some(result);
    }

    /// Signature mode only: symbols for every file of a supported language.
    pub fn extract_symbols(&mut self) {
        if !self.config.signatures_only {
            return;
        }
        for file in &self.files {
            if !symbols::is_supported(file.language) {
                continue;
            }
            let found = symbols::extract(&file.content, file.language);
            tracing::debug!(path = %file.path, symbols = found.len(), "extracted symbols");
            self.symbols.insert(file.path.clone(), found);
        }
    }

    pub fn split_chunks(&mut self) {
        if let Some(options) = &self.config.chunking {
            self.chunks = chunker::split(&self.files, options);
        }
    }

    pub fn render(self) -> Result<Assembly> {
        let config = self.config;
        let options = RenderOptions {
            format: config.format,
            include_tree: config.include_tree,
            signatures_only: config.signatures_only,
            symbols_by_path: self.symbols,
            compact: config.compact,
        };
        let render_one = |files: &[ScannedFile], header: Option<String>| {
            let text = formatter::render(files, &options);
            Rendered {
                header,
                tokens: count_tokens(&text),
                text,
            }
        };

        let chunk_total = self.chunks.len();
        let outputs = if config.chunking.is_none() {
            vec![render_one(self.files.as_slice(), None)]
        } else if let Some(index) = config.chunk_index {
            let chunk = self.chunks.get(index).ok_or(Error::ChunkIndexOutOfRange {
                index,
                total: chunk_total,
            })?;
            vec![render_one(chunk.files.as_slice(), Some(chunk.header()))]
        } else {
            self.chunks
                .iter()
                .map(|c| render_one(c.files.as_slice(), Some(c.header())))
                .collect()
        };

        Ok(Assembly {
            files: self.files,
            budget: self.budget,
            chunk_total,
            outputs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn config(args: &[&str]) -> Config {
        let cli = Cli::try_parse_from(std::iter::once("context-pack").chain(args.iter().copied()))
            .unwrap();
        Config::from_cli(cli).unwrap()
    }

    fn files() -> Vec<ScannedFile> {
        vec![
            ScannedFile::with_tokens("a.ts", "export function a() {\n  return 1;\n}\n", 12),
            ScannedFile::with_tokens("b.ts", "export const b = 2;\n", 12),
            ScannedFile::with_tokens("c.ts", "const c = 3;\n", 9000),
        ]
    }

    #[test]
    fn plain_run_renders_one_document() {
        let assembly = Pipeline::run(&config(&["-n"]), files()).unwrap();
        assert_eq!(assembly.outputs.len(), 1);
        assert_eq!(assembly.chunk_total, 0);
        assert!(assembly.outputs[0].header.is_none());
        assert!(assembly.joined().starts_with("# Project Context\n\n## Structure"));
        assert_eq!(assembly.file_tokens(), 9024);
    }

    #[test]
    fn budget_drops_large_files_keeping_order() {
        let assembly = Pipeline::run(&config(&["-n", "-L", "30"]), files()).unwrap();
        let paths: Vec<&str> = assembly.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, ["a.ts", "b.ts"]);
        let budget = assembly.budget.unwrap();
        assert_eq!(budget.excluded.len(), 1);
        assert_eq!(budget.budget_remaining, 6);
        assert!(!assembly.outputs[0].text.contains("c.ts"));
    }

    #[test]
    fn chunked_run_carries_headers() {
        let assembly = Pipeline::run(&config(&["-n", "-c", "50"]), files()).unwrap();
        assert_eq!(assembly.chunk_total, 2);
        let headers: Vec<&str> = assembly
            .outputs
            .iter()
            .filter_map(|r| r.header.as_deref())
            .collect();
        assert_eq!(
            headers,
            ["Chunk 1/2 | 2 files | 24 tokens", "Chunk 2/2 | 1 files | 9.0k tokens"]
        );
        assert!(assembly.joined().starts_with("Chunk 1/2 | 2 files | 24 tokens\n\n# Project"));
    }

    #[test]
    fn chunk_index_selects_or_fails() {
        let assembly = Pipeline::run(&config(&["-n", "-c", "50", "-k", "1"]), files()).unwrap();
        assert_eq!(assembly.outputs.len(), 1);
        assert!(assembly.outputs[0].text.contains("c.ts"));
        assert!(matches!(
            Pipeline::run(&config(&["-n", "-c", "50", "-k", "2"]), files()),
            Err(Error::ChunkIndexOutOfRange { index: 2, total: 2 })
        ));
    }

    #[test]
    fn signatures_mode_uses_symbols() {
        let assembly =
            Pipeline::run(&config(&["-n", "--signatures", "--no-tree"]), files()).unwrap();
        let text = &assembly.outputs[0].text;
        assert!(text.contains("function: a\nexport function a()"));
        assert!(text.contains("variable: b\nexport const b = 2\n"));
        assert!(!text.contains("return 1;"));
        assert!(!text.contains("## Structure"));
    }
}
