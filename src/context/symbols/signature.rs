/// Declaration line(s) of a source span with the body elided, on one line.
///
/// A `{` on the first line ends the signature there. Otherwise lines are
/// gathered until one holds `{` or `=>`; a brace body is cut off and an arrow
/// body is reduced to a bare `=>`.
pub fn signature(span: &str) -> String {
    let mut lines = span.lines();
    let Some(first) = lines.next() else {
        return String::new();
    };
    if let Some(brace) = first.find('{') {
        return collapse(&first[..brace]);
    }

    let mut acc = String::new();
    for line in std::iter::once(first).chain(lines) {
        if !acc.is_empty() {
            acc.push(' ');
        }
        acc.push_str(line.trim());
        if line.contains('{') || line.contains("=>") {
            break;
        }
    }

    let arrow = acc.find("=>");
    let brace = acc.find('{');
    let cut = match (arrow, brace) {
        (Some(a), Some(b)) if a < b => format!("{} =>", acc[..a].trim_end()),
        (Some(a), None) => format!("{} =>", acc[..a].trim_end()),
        (_, Some(b)) => acc[..b].to_string(),
        (None, None) => acc.trim_end().trim_end_matches(';').to_string(),
    };
    collapse(&cut)
}

fn collapse(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
