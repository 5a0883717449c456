use crate::context::compact::compact;
use crate::context::symbols::CodeSymbol;
use crate::context::tree::render_tree;
use crate::context::types::ScannedFile;
use crate::context::xml::{escape_attr, escape_text};
use crate::error::Error;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Wire format of the rendered context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Markdown heading and tree with `<file>` blocks carrying raw bodies.
    #[default]
    Markdown,
    /// Well-formed XML document with escaped bodies.
    Xml,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" | "hybrid" => Ok(OutputFormat::Markdown),
            "xml" => Ok(OutputFormat::Xml),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Markdown => "markdown",
            OutputFormat::Xml => "xml",
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub include_tree: bool,
    /// Replace bodies with symbol signatures where symbols are known.
    pub signatures_only: bool,
    pub symbols_by_path: HashMap<String, Vec<CodeSymbol>>,
    /// Strip comment-only lines and squeeze blank runs.
    pub compact: bool,
}

impl RenderOptions {
    fn body<'a>(
        &self,
        file: &'a ScannedFile,
    ) -> std::borrow::Cow<'a, str> {
        if self.signatures_only
            && let Some(symbols) = self.symbols_by_path.get(&file.path)
            && !symbols.is_empty()
        {
            return signature_body(symbols).into();
        }
        if self.compact {
            return compact(&file.content, file.language).into();
        }
        file.content.as_str().into()
    }
}

fn signature_body(symbols: &[CodeSymbol]) -> String {
    symbols
        .iter()
        .map(|s| format!("{}: {}\n{}", s.kind, s.name, s.signature))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Renders `files`, in the order given, into the selected wire format.
pub fn render(
    files: &[ScannedFile],
    options: &RenderOptions,
) -> String {
    match options.format {
        OutputFormat::Markdown => render_hybrid(files, options),
        OutputFormat::Xml => render_xml(files, options),
    }
}

fn tree_of(files: &[ScannedFile]) -> String {
    let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
    render_tree(&paths)
}

fn render_hybrid(
    files: &[ScannedFile],
    options: &RenderOptions,
) -> String {
    let mut out = String::from("# Project Context\n\n");
    if options.include_tree {
        out.push_str("## Structure\n\n```\n");
        out.push_str(&tree_of(files));
        out.push_str("```\n\n");
    }
    out.push_str("---\n\n");
    for file in files {
        out.push_str(&format!(
            "<file path=\"{}\" language=\"{}\">\n",
            file.path, file.language
        ));
        out.push_str(&options.body(file));
        out.push_str("\n</file>\n\n");
    }
    out
}

fn render_xml(
    files: &[ScannedFile],
    options: &RenderOptions,
) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<context>\n");
    if options.include_tree {
        out.push_str("  <structure>\n");
        for line in tree_of(files).lines() {
            out.push_str("    ");
            out.push_str(&escape_text(line));
            out.push('\n');
        }
        out.push_str("  </structure>\n");
    }
    out.push_str("  <files>\n");
    for file in files {
        out.push_str(&format!(
            "    <file path=\"{}\" language=\"{}\">\n",
            escape_attr(&file.path),
            file.language
        ));
        out.push_str(&escape_text(&options.body(file)));
        out.push_str("\n    </file>\n");
    }
    out.push_str("  </files>\n</context>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::symbols::SymbolKind;

    fn sample() -> Vec<ScannedFile> {
        vec![
            ScannedFile::new("src/a.ts", "// note\nconst a = 1 < 2;\n"),
            ScannedFile::new("README.md", "# hi"),
        ]
    }

    #[test]
    fn parses_format_names() {
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("Hybrid".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!(" XML ".parse::<OutputFormat>().unwrap(), OutputFormat::Xml);
        assert!(matches!(
            "json".parse::<OutputFormat>(),
            Err(Error::UnknownFormat(s)) if s == "json"
        ));
    }

    #[test]
    fn hybrid_layout() {
        let options = RenderOptions {
            include_tree: true,
            ..Default::default()
        };
        let out = render(&sample(), &options);
        assert_eq!(
            out,
            "# Project Context\n\n\
             ## Structure\n\n```\nsrc/\n  a.ts\nREADME.md\n```\n\n\
             ---\n\n\
             <file path=\"src/a.ts\" language=\"typescript\">\n// note\nconst a = 1 < 2;\n\n</file>\n\n\
             <file path=\"README.md\" language=\"markdown\">\n# hi\n</file>\n\n"
        );
    }

    #[test]
    fn hybrid_without_tree() {
        let out = render(&sample()[1..], &RenderOptions::default());
        assert_eq!(
            out,
            "# Project Context\n\n---\n\n<file path=\"README.md\" language=\"markdown\">\n# hi\n</file>\n\n"
        );
    }

    #[test]
    fn xml_layout_escapes_bodies() {
        let options = RenderOptions {
            format: OutputFormat::Xml,
            include_tree: true,
            ..Default::default()
        };
        let out = render(&sample()[..1], &options);
        assert_eq!(
            out,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<context>\n\
             \x20 <structure>\n    src/\n      a.ts\n  </structure>\n\
             \x20 <files>\n\
             \x20   <file path=\"src/a.ts\" language=\"typescript\">\n// note\nconst a = 1 &lt; 2;\n\n    </file>\n\
             \x20 </files>\n</context>\n"
        );
    }

    #[test]
    fn xml_does_not_reinterpret_entities() {
        let files = [ScannedFile::new("a.txt", "&lt;tag&gt;")];
        let options = RenderOptions {
            format: OutputFormat::Xml,
            ..Default::default()
        };
        assert!(render(&files, &options).contains("&amp;lt;tag&amp;gt;"));
    }

    #[test]
    fn compact_applies_per_file() {
        let options = RenderOptions {
            compact: true,
            ..Default::default()
        };
        let out = render(&sample()[..1], &options);
        assert!(out.contains("\nconst a = 1 < 2;\n\n</file>"));
        assert!(!out.contains("// note"));
    }

    #[test]
    fn signature_bodies_replace_content() {
        let files = sample();
        let symbols = vec![
            CodeSymbol {
                name: "a".into(),
                kind: SymbolKind::Variable,
                start_line: 2,
                end_line: 2,
                signature: "const a = 1 < 2;".into(),
                content: "const a = 1 < 2;".into(),
                tokens: 7,
            },
            CodeSymbol {
                name: "run".into(),
                kind: SymbolKind::Function,
                start_line: 3,
                end_line: 5,
                signature: "function run()".into(),
                content: String::new(),
                tokens: 0,
            },
        ];
        let options = RenderOptions {
            signatures_only: true,
            symbols_by_path: HashMap::from([("src/a.ts".to_string(), symbols)]),
            ..Default::default()
        };
        let out = render(&files, &options);
        assert!(out.contains(
            "language=\"typescript\">\nvariable: a\nconst a = 1 < 2;\n\nfunction: run\nfunction run()\n</file>"
        ));
        // No symbols for the readme: full content stays.
        assert!(out.contains("language=\"markdown\">\n# hi\n</file>"));
    }
}
