use super::{CodeSymbol, SymbolKind, normalize};
use crate::context::types::Language;
use tree_sitter::{Node, Parser};

fn grammar(language: Language) -> Option<tree_sitter::Language> {
    match language {
        Language::TypeScript => Some(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
        Language::Tsx | Language::JavaScript | Language::Jsx => {
            Some(tree_sitter_typescript::LANGUAGE_TSX.into())
        }
        _ => None,
    }
}

pub(super) fn supports(language: Language) -> bool {
    matches!(
        language,
        Language::TypeScript | Language::Tsx | Language::JavaScript | Language::Jsx
    )
}

/// Whether the grammars load in this build.
pub(super) fn available() -> bool {
    let mut parser = Parser::new();
    [Language::TypeScript, Language::Tsx]
        .into_iter()
        .filter_map(grammar)
        .all(|lang| parser.set_language(&lang).is_ok())
}

/// Syntax-tree extraction. `None` when the file does not parse cleanly; the
/// caller then falls back to line rules.
pub(super) fn extract(
    content: &str,
    language: Language,
) -> Option<Vec<CodeSymbol>> {
    let lang = grammar(language)?;
    let mut parser = Parser::new();
    parser.set_language(&lang).ok()?;
    let tree = parser.parse(content, None)?;
    let root = tree.root_node();
    if root.has_error() {
        return None;
    }

    let src = content.as_bytes();
    let lines: Vec<&str> = content.lines().collect();
    let mut out = Vec::new();
    for i in 0..root.named_child_count() {
        if let Some(node) = root.named_child(i) {
            visit_top_level(node, src, &lines, &mut out);
        }
    }
    Some(normalize(out))
}

fn text<'a>(
    node: Node<'_>,
    src: &'a [u8],
) -> &'a str {
    node.utf8_text(src).unwrap_or_default()
}

fn name_of(
    node: Node<'_>,
    src: &[u8],
) -> Option<String> {
    node.child_by_field_name("name").map(|n| text(n, src).to_string())
}

fn rows(node: Node<'_>) -> (usize, usize) {
    (node.start_position().row, node.end_position().row)
}

fn is_function_value(kind: &str) -> bool {
    matches!(
        kind,
        "arrow_function" | "function_expression" | "function" | "generator_function"
    )
}

/// Handles one statement of the program; `outer` is the enclosing
/// `export_statement`, whose span replaces the declaration's own.
fn visit_top_level(
    node: Node<'_>,
    src: &[u8],
    lines: &[&str],
    out: &mut Vec<CodeSymbol>,
) {
    if node.kind() == "export_statement" {
        match node.child_by_field_name("declaration") {
            Some(decl) => visit_declaration(decl, Some(node), src, lines, out),
            None => {
                let mut cursor = node.walk();
                let is_default = node.children(&mut cursor).any(|c| c.kind() == "default");
                // export clauses and re-exports declare nothing here
                if !is_default {
                    return;
                }
                let name = node
                    .child_by_field_name("value")
                    .map(|v| text(v, src).to_string())
                    .filter(|v| !v.contains('\n'))
                    .unwrap_or_else(|| "default".to_string());
                let (start, end) = rows(node);
                out.push(CodeSymbol::from_span(name, SymbolKind::Export, lines, start, end));
            }
        }
    } else {
        visit_declaration(node, None, src, lines, out);
    }
}

fn visit_declaration(
    decl: Node<'_>,
    outer: Option<Node<'_>>,
    src: &[u8],
    lines: &[&str],
    out: &mut Vec<CodeSymbol>,
) {
    let (start, end) = rows(outer.unwrap_or(decl));
    let exported = outer.is_some();
    let simple = match decl.kind() {
        "function_declaration" | "generator_function_declaration" => Some(SymbolKind::Function),
        "interface_declaration" => Some(SymbolKind::Interface),
        "type_alias_declaration" | "enum_declaration" => Some(SymbolKind::Type),
        _ => None,
    };
    if let Some(kind) = simple {
        if let Some(name) = name_of(decl, src) {
            out.push(CodeSymbol::from_span(name, kind, lines, start, end));
        }
        return;
    }

    match decl.kind() {
        "class_declaration" | "abstract_class_declaration" => {
            let Some(name) = name_of(decl, src) else {
                return;
            };
            let methods = decl
                .child_by_field_name("body")
                .map(|body| class_methods(body, src, lines))
                .unwrap_or_default();
            // Methods are their own symbols; the class keeps its header and
            // any members ahead of the first method so spans stay disjoint.
            let class_end = match methods.first() {
                Some(m) if m.start_line - 1 > start => m.start_line - 2,
                Some(_) => start,
                None => end,
            };
            out.push(CodeSymbol::from_span(name, SymbolKind::Class, lines, start, class_end));
            out.extend(methods);
        }
        "lexical_declaration" | "variable_declaration" => {
            for i in 0..decl.named_child_count() {
                let Some(declarator) = decl.named_child(i) else {
                    continue;
                };
                if declarator.kind() != "variable_declarator" {
                    continue;
                }
                let Some(name) = name_of(declarator, src) else {
                    continue;
                };
                let value_kind = declarator.child_by_field_name("value").map(|v| v.kind());
                let kind = match value_kind {
                    Some(k) if is_function_value(k) => SymbolKind::Function,
                    _ if exported => SymbolKind::Variable,
                    _ => continue,
                };
                out.push(CodeSymbol::from_span(name, kind, lines, start, end));
                // One symbol per statement keeps `const a = .., b = ..` disjoint.
                break;
            }
        }
        _ => {}
    }
}

fn class_methods(
    body: Node<'_>,
    src: &[u8],
    lines: &[&str],
) -> Vec<CodeSymbol> {
    let mut methods = Vec::new();
    for i in 0..body.named_child_count() {
        let Some(member) = body.named_child(i) else {
            continue;
        };
        if member.kind() != "method_definition" {
            continue;
        }
        if let Some(name) = name_of(member, src) {
            let (start, end) = rows(member);
            methods.push(CodeSymbol::from_span(name, SymbolKind::Method, lines, start, end));
        }
    }
    methods
}
