use crate::tokenizer::{self, TokenInfo};
use std::fmt;
use std::path::Path;

/// Language tag detected from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    TypeScript,
    Tsx,
    JavaScript,
    Jsx,
    Rust,
    Python,
    Go,
    Java,
    C,
    Cpp,
    CSharp,
    Ruby,
    Shell,
    Sql,
    Lua,
    Html,
    Css,
    Markdown,
    Json,
    Yaml,
    Toml,
    Text,
}

impl Language {
    pub fn from_path(path: &str) -> Self {
        let ext = Path::new(path)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "ts" | "mts" | "cts" => Language::TypeScript,
            "tsx" => Language::Tsx,
            "js" | "mjs" | "cjs" => Language::JavaScript,
            "jsx" => Language::Jsx,
            "rs" => Language::Rust,
            "py" | "pyi" => Language::Python,
            "go" => Language::Go,
            "java" => Language::Java,
            "c" | "h" => Language::C,
            "cc" | "cpp" | "cxx" | "hpp" | "hh" | "hxx" => Language::Cpp,
            "cs" => Language::CSharp,
            "rb" => Language::Ruby,
            "sh" | "bash" | "zsh" => Language::Shell,
            "sql" => Language::Sql,
            "lua" => Language::Lua,
            "html" | "htm" | "xml" | "svg" | "vue" => Language::Html,
            "css" | "scss" | "less" => Language::Css,
            "md" | "markdown" => Language::Markdown,
            "json" => Language::Json,
            "yml" | "yaml" => Language::Yaml,
            "toml" => Language::Toml,
            _ => Language::Text,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::TypeScript => "typescript",
            Language::Tsx => "tsx",
            Language::JavaScript => "javascript",
            Language::Jsx => "jsx",
            Language::Rust => "rust",
            Language::Python => "python",
            Language::Go => "go",
            Language::Java => "java",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::CSharp => "csharp",
            Language::Ruby => "ruby",
            Language::Shell => "shell",
            Language::Sql => "sql",
            Language::Lua => "lua",
            Language::Html => "html",
            Language::Css => "css",
            Language::Markdown => "markdown",
            Language::Json => "json",
            Language::Yaml => "yaml",
            Language::Toml => "toml",
            Language::Text => "text",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file handed over by the scanner. Token figures are computed once, at
/// construction, and travel with the file for the rest of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    pub path: String,
    pub content: String,
    pub language: Language,
    pub token_info: TokenInfo,
}

impl ScannedFile {
    pub fn new(
        path: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let path = path.into();
        let language = Language::from_path(&path);
        Self::with_language(path, content, language)
    }

    pub fn with_language(
        path: impl Into<String>,
        content: impl Into<String>,
        language: Language,
    ) -> Self {
        let content = content.into();
        let token_info = tokenizer::count(&content);
        ScannedFile {
            path: path.into(),
            content,
            language,
            token_info,
        }
    }

    /// Builds a file with a preset token count; used where the caller already
    /// knows the figure (tests, replayed runs).
    pub fn with_tokens(
        path: impl Into<String>,
        content: impl Into<String>,
        tokens: usize,
    ) -> Self {
        let path = path.into();
        let content = content.into();
        let language = Language::from_path(&path);
        let token_info = TokenInfo {
            chars: content.chars().count(),
            lines: 1 + content.matches('\n').count(),
            tokens,
        };
        ScannedFile {
            path,
            content,
            language,
            token_info,
        }
    }

    #[inline]
    pub fn tokens(&self) -> usize {
        self.token_info.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_language_from_extension() {
        assert_eq!(Language::from_path("src/a.ts"), Language::TypeScript);
        assert_eq!(Language::from_path("App.TSX"), Language::Tsx);
        assert_eq!(Language::from_path("lib/main.rs"), Language::Rust);
        assert_eq!(Language::from_path("Makefile"), Language::Text);
        assert_eq!(Language::Tsx.to_string(), "tsx");
    }

    #[test]
    fn new_caches_token_info() {
        let f = ScannedFile::new("a.txt", "hello world");
        assert_eq!(f.token_info.tokens, 2);
        assert_eq!(f.token_info.lines, 1);
        assert_eq!(f.language, Language::Text);
    }
}
