/// Escapes element text. `&` is replaced first so entities already present in
/// the input come out as literal text (`&lt;` → `&amp;lt;`).
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// [`escape_text`] plus double quotes, for attribute values.
pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_angle_brackets() {
        assert_eq!(escape_text("a < b"), "a &lt; b");
        assert_eq!(escape_text("Vec<T> -> x"), "Vec&lt;T&gt; -&gt; x");
    }

    #[test]
    fn ampersand_goes_first() {
        assert_eq!(escape_text("&lt;"), "&amp;lt;");
        assert_eq!(escape_text("a && b"), "a &amp;&amp; b");
    }

    #[test]
    fn attributes_escape_quotes() {
        assert_eq!(escape_attr(r#"say "hi" <now>"#), "say &quot;hi&quot; &lt;now&gt;");
        assert_eq!(escape_text("\"kept\""), "\"kept\"");
    }
}
