use super::{CodeSymbol, SymbolKind, normalize};
use crate::context::types::Language;
use once_cell::sync::Lazy;
use regex::Regex;

type Rules = Vec<(Regex, SymbolKind)>;

fn rule(
    re: &str,
    kind: SymbolKind,
) -> (Regex, SymbolKind) {
    (Regex::new(re).expect("symbol rule is valid"), kind)
}

const IDENT_JS: &str = r"[A-Za-z_$][\w$]*";

static JS_RULES: Lazy<Rules> = Lazy::new(|| {
    let id = IDENT_JS;
    vec![
        rule(
            &format!(r"^\s*(?:export\s+)?(?:default\s+)?(?:declare\s+)?(?:abstract\s+)?class\s+(?P<name>{id})"),
            SymbolKind::Class,
        ),
        rule(
            &format!(r"^\s*(?:export\s+)?(?:declare\s+)?interface\s+(?P<name>{id})"),
            SymbolKind::Interface,
        ),
        rule(
            &format!(r"^\s*(?:export\s+)?(?:declare\s+)?type\s+(?P<name>{id})\s*(?:<[^=]*>)?\s*="),
            SymbolKind::Type,
        ),
        rule(
            &format!(r"^\s*(?:export\s+)?(?:declare\s+)?(?:const\s+)?enum\s+(?P<name>{id})"),
            SymbolKind::Type,
        ),
        rule(
            &format!(r"^\s*(?:export\s+)?(?:default\s+)?(?:declare\s+)?(?:async\s+)?function\s*\*?\s*(?P<name>{id})"),
            SymbolKind::Function,
        ),
        rule(
            &format!(
                r"^\s*(?:export\s+)?(?:const|let|var)\s+(?P<name>{id})\s*(?::[^=]+)?=\s*(?:async\s+)?(?:function\b|\([^)]*\)?\s*(?::[^=]+)?(?:=>|$)|{id}\s*=>)"
            ),
            SymbolKind::Function,
        ),
        rule(
            &format!(r"^\s*export\s+(?:const|let|var)\s+(?P<name>{id})"),
            SymbolKind::Variable,
        ),
        rule(
            &format!(r"^\s*export\s+default\s+(?P<name>{id})\s*;?\s*$"),
            SymbolKind::Export,
        ),
    ]
});

static RUST_RULES: Lazy<Rules> = Lazy::new(|| {
    let vis = r"(?:pub(?:\([^)]*\))?\s+)?";
    vec![
        rule(
            &format!(r#"^\s*{vis}(?:default\s+)?(?:const\s+)?(?:async\s+)?(?:unsafe\s+)?(?:extern\s+"[^"]*"\s+)?fn\s+(?P<name>\w+)"#),
            SymbolKind::Function,
        ),
        rule(&format!(r"^\s*{vis}struct\s+(?P<name>\w+)"), SymbolKind::Class),
        rule(&format!(r"^\s*{vis}union\s+(?P<name>\w+)"), SymbolKind::Class),
        rule(&format!(r"^\s*{vis}enum\s+(?P<name>\w+)"), SymbolKind::Type),
        rule(&format!(r"^\s*{vis}(?:unsafe\s+)?trait\s+(?P<name>\w+)"), SymbolKind::Interface),
        rule(&format!(r"^\s*{vis}type\s+(?P<name>\w+)"), SymbolKind::Type),
        rule(&format!(r"^\s*{vis}(?:const|static)\s+(?:mut\s+)?(?P<name>[A-Z_][A-Z0-9_]*)\s*:"), SymbolKind::Variable),
    ]
});

static GO_RULES: Lazy<Rules> = Lazy::new(|| {
    vec![
        rule(r"^func\s+\([^)]*\)\s*(?P<name>\w+)", SymbolKind::Method),
        rule(r"^func\s+(?P<name>\w+)", SymbolKind::Function),
        rule(r"^type\s+(?P<name>\w+)\s+struct\b", SymbolKind::Class),
        rule(r"^type\s+(?P<name>\w+)\s+interface\b", SymbolKind::Interface),
        rule(r"^type\s+(?P<name>\w+)", SymbolKind::Type),
    ]
});

static JAVA_LIKE_RULES: Lazy<Rules> = Lazy::new(|| {
    let mods = r"(?:(?:public|private|protected|internal|static|abstract|final|sealed|partial|readonly)\s+)*";
    vec![
        rule(&format!(r"^\s*{mods}(?:class|record)\s+(?P<name>\w+)"), SymbolKind::Class),
        rule(&format!(r"^\s*{mods}interface\s+(?P<name>\w+)"), SymbolKind::Interface),
        rule(&format!(r"^\s*{mods}enum\s+(?P<name>\w+)"), SymbolKind::Type),
        rule(&format!(r"^\s*{mods}struct\s+(?P<name>\w+)"), SymbolKind::Class),
    ]
});

static C_LIKE_RULES: Lazy<Rules> = Lazy::new(|| {
    vec![
        rule(r"^(?:template\s*<[^>]*>\s*)?(?:class|struct)\s+(?P<name>\w+)\s*(?:final\s*)?(?::[^;{]*)?\{?\s*$", SymbolKind::Class),
        rule(r"^(?:typedef\s+)?enum\s+(?:class\s+)?(?P<name>\w+)", SymbolKind::Type),
        rule(r"^typedef\s+.*?\b(?P<name>\w+)\s*;\s*$", SymbolKind::Type),
        rule(
            r"^(?:(?:static|inline|extern|virtual|constexpr)\s+)*[A-Za-z_][\w:<>,\s\*&]*?[\s\*&](?P<name>[A-Za-z_][\w:~]*)\s*\([^;]*$",
            SymbolKind::Function,
        ),
    ]
});

fn rules_for(language: Language) -> Option<&'static Rules> {
    match language {
        Language::TypeScript | Language::Tsx | Language::JavaScript | Language::Jsx => Some(&*JS_RULES),
        Language::Rust => Some(&*RUST_RULES),
        Language::Go => Some(&*GO_RULES),
        Language::Java | Language::CSharp => Some(&*JAVA_LIKE_RULES),
        Language::C | Language::Cpp => Some(&*C_LIKE_RULES),
        _ => None,
    }
}

pub(super) fn supports(language: Language) -> bool {
    rules_for(language).is_some()
}

/// Line-rule extraction. Each line is tried against the rules in order; the
/// first hit opens a symbol whose end is found by [`span_end`]. Lines inside
/// an earlier symbol are never matched again.
pub(super) fn extract(
    content: &str,
    language: Language,
) -> Vec<CodeSymbol> {
    let Some(rules) = rules_for(language) else {
        return Vec::new();
    };
    let lines: Vec<&str> = content.lines().collect();
    let mut symbols = Vec::new();
    let mut i = 0usize;
    while i < lines.len() {
        let hit = rules.iter().find_map(|(re, kind)| {
            re.captures(lines[i])
                .and_then(|c| c.name("name"))
                .map(|m| (m.as_str().to_string(), *kind))
        });
        match hit {
            Some((name, kind)) => {
                let end = span_end(&lines, i);
                symbols.push(CodeSymbol::from_span(name, kind, &lines, i, end));
                i = end + 1;
            }
            None => i += 1,
        }
    }
    normalize(symbols)
}

/// Last line (0-based) of the construct opening at `start`.
///
/// Braces are balanced from the first `{`; before any brace, a `;` ends a
/// braceless statement. A blank line before any brace or `;` ends the
/// statement on the preceding line, so a one-line alias never swallows the
/// next declaration.
fn span_end(
    lines: &[&str],
    start: usize,
) -> usize {
    let mut depth = 0usize;
    let mut opened = false;
    for (j, line) in lines.iter().enumerate().skip(start) {
        if !opened && j > start && line.trim().is_empty() {
            return j - 1;
        }
        for c in line.chars() {
            match c {
                '{' => {
                    depth += 1;
                    opened = true;
                }
                '}' if opened => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return j;
                    }
                }
                ';' if !opened => return j,
                _ => {}
            }
        }
    }
    if opened { lines.len() - 1 } else { start }
}
