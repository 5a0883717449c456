use crate::context::types::Language;

/// Comment syntax of a language family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CommentStyle {
    line: Option<&'static str>,
    block: Option<(&'static str, &'static str)>,
}

const C_LIKE: CommentStyle = CommentStyle {
    line: Some("//"),
    block: Some(("/*", "*/")),
};
const HASH: CommentStyle = CommentStyle {
    line: Some("#"),
    block: None,
};
const DASH: CommentStyle = CommentStyle {
    line: Some("--"),
    block: None,
};
const MARKUP: CommentStyle = CommentStyle {
    line: None,
    block: Some(("<!--", "-->")),
};
const NONE: CommentStyle = CommentStyle {
    line: None,
    block: None,
};

fn style_for(language: Language) -> CommentStyle {
    match language {
        Language::TypeScript
        | Language::Tsx
        | Language::JavaScript
        | Language::Jsx
        | Language::Rust
        | Language::Go
        | Language::Java
        | Language::C
        | Language::Cpp
        | Language::CSharp
        | Language::Css => C_LIKE,
        Language::Python | Language::Ruby | Language::Shell | Language::Yaml | Language::Toml => {
            HASH
        }
        Language::Sql | Language::Lua => DASH,
        Language::Html | Language::Markdown => MARKUP,
        Language::Json | Language::Text => NONE,
    }
}

/// Drops comment-only lines and squeezes blank runs to a single blank line.
/// Every other line is kept verbatim and in order; CRLF files stay CRLF.
pub fn compact(
    content: &str,
    language: Language,
) -> String {
    let style = style_for(language);
    let mut out: Vec<&str> = Vec::new();
    // Open block comment: its closing marker and the lines seen so far. The
    // lines are only dropped once the block turns out to be comment-only.
    let mut block: Option<(&str, Vec<&str>)> = None;
    let mut last_blank = false;

    for line in content.lines() {
        let t = line.trim();

        if let Some((close, pending)) = block.as_mut() {
            let Some(pos) = t.find(*close) else {
                pending.push(line);
                continue;
            };
            let code_follows = !t[pos + close.len()..].trim().is_empty();
            let (_, pending) = block.take().unwrap_or_default();
            if !code_follows {
                continue;
            }
            out.extend(pending);
        } else if t.is_empty() {
            if !last_blank {
                out.push("");
                last_blank = true;
            }
            continue;
        } else if style
            .line
            .is_some_and(|marker| t.starts_with(marker) && !t.starts_with("#!"))
        {
            continue;
        } else if let Some((open, close)) = style.block
            && let Some(rest) = t.strip_prefix(open)
        {
            match rest.find(close) {
                Some(pos) if rest[pos + close.len()..].trim().is_empty() => continue,
                Some(_) => {}
                None => {
                    block = Some((close, vec![line]));
                    continue;
                }
            }
        }

        out.push(line);
        last_blank = false;
    }
    // An unterminated block is not a comment we can prove; keep it.
    if let Some((_, pending)) = block {
        out.extend(pending);
    }

    // kept lines are rejoined with the file's own line ending
    let eol = if content.contains("\r\n") { "\r\n" } else { "\n" };
    let mut joined = out.join(eol);
    if content.ends_with('\n') && !joined.is_empty() {
        joined.push_str(eol);
    }
    joined
}
