//! Symbol extraction: named code constructs with their signatures.
//!
//! Two tiers exist. The structural tier builds a syntax tree (tree-sitter,
//! behind the `structural` feature) and is preferred wherever it supports the
//! language; the pattern tier matches ordered per-language line rules and is
//! always available. The tier is chosen once per process; a structural
//! failure on one file drops that file to the pattern tier.

mod pattern;
mod signature;
#[cfg(feature = "structural")]
mod structural;

pub use signature::signature;

use crate::context::types::Language;
use std::fmt;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Function,
    Class,
    Interface,
    Type,
    Method,
    Variable,
    Export,
}

impl SymbolKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SymbolKind::Function => "function",
            SymbolKind::Class => "class",
            SymbolKind::Interface => "interface",
            SymbolKind::Type => "type",
            SymbolKind::Method => "method",
            SymbolKind::Variable => "variable",
            SymbolKind::Export => "export",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declaration found in a file. Lines are 1-based and inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSymbol {
    pub name: String,
    pub kind: SymbolKind,
    pub start_line: usize,
    pub end_line: usize,
    pub signature: String,
    pub content: String,
    pub tokens: usize,
}

impl CodeSymbol {
    /// Builds a symbol from a line span of `lines` (0-based, inclusive indices).
    pub(crate) fn from_span(
        name: impl Into<String>,
        kind: SymbolKind,
        lines: &[&str],
        start: usize,
        end: usize,
    ) -> Self {
        let end = end.min(lines.len().saturating_sub(1)).max(start);
        let content = lines.get(start..=end).unwrap_or_default().join("\n");
        CodeSymbol {
            name: name.into(),
            kind,
            start_line: start + 1,
            end_line: end + 1,
            signature: signature(&content),
            tokens: crate::tokenizer::count_tokens(&content),
            content,
        }
    }
}

/// Extraction strategy, resolved once per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extractor {
    Structural,
    Pattern,
}

static ACTIVE: OnceLock<Extractor> = OnceLock::new();

impl Extractor {
    /// The strategy for this process; probes the structural tier on first use.
    pub fn active() -> Self {
        *ACTIVE.get_or_init(Self::detect)
    }

    fn detect() -> Self {
        #[cfg(feature = "structural")]
        {
            if structural::available() {
                tracing::debug!("symbol extraction: structural tier");
                return Extractor::Structural;
            }
        }
        tracing::debug!("symbol extraction: pattern tier");
        Extractor::Pattern
    }

    pub fn extract(
        self,
        content: &str,
        language: Language,
    ) -> Vec<CodeSymbol> {
        if self == Extractor::Structural {
            #[cfg(feature = "structural")]
            {
                if structural::supports(language) {
                    match structural::extract(content, language) {
                        Some(symbols) => return symbols,
                        None => tracing::debug!(
                            "structural parse failed for {language} input, using pattern rules"
                        ),
                    }
                }
            }
        }
        pattern::extract(content, language)
    }
}

/// Whether any tier produces symbols for `language`.
pub fn is_supported(language: Language) -> bool {
    pattern::supports(language)
}

/// Symbols of `content`, ordered by start line, spans never overlapping.
/// Unsupported languages yield an empty list.
pub fn extract(
    content: &str,
    language: Language,
) -> Vec<CodeSymbol> {
    Extractor::active().extract(content, language)
}

/// Sorts by start line and drops any symbol overlapping an earlier one.
pub(crate) fn normalize(mut symbols: Vec<CodeSymbol>) -> Vec<CodeSymbol> {
    symbols.sort_by_key(|s| s.start_line);
    let mut out: Vec<CodeSymbol> = Vec::with_capacity(symbols.len());
    for sym in symbols {
        if out.last().is_some_and(|prev| sym.start_line <= prev.end_line) {
            continue;
        }
        out.push(sym);
    }
    out
}
