use std::collections::{BTreeMap, BTreeSet};

#[derive(Default)]
struct Dir {
    dirs: BTreeMap<String, Dir>,
    files: BTreeSet<String>,
}

impl Dir {
    fn insert(
        &mut self,
        path: &str,
    ) {
        let mut parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        let Some(file) = parts.pop() else {
            return;
        };
        let mut node = self;
        for part in parts {
            node = node.dirs.entry(part.to_string()).or_default();
        }
        node.files.insert(file.to_string());
    }

    fn render(
        &self,
        depth: usize,
        out: &mut String,
    ) {
        let indent = "  ".repeat(depth);
        for (name, sub) in &self.dirs {
            out.push_str(&indent);
            out.push_str(name);
            out.push_str("/\n");
            sub.render(depth + 1, out);
        }
        for name in &self.files {
            out.push_str(&indent);
            out.push_str(name);
            out.push('\n');
        }
    }
}

/// Indented directory listing of slash-separated paths: two spaces per level,
/// directories (suffixed `/`) ahead of files, each group alphabetical.
pub fn render_tree<S: AsRef<str>>(paths: &[S]) -> String {
    let mut root = Dir::default();
    for path in paths {
        root.insert(path.as_ref());
    }
    let mut out = String::new();
    root.render(0, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::render_tree;

    #[test]
    fn directories_before_files_alphabetical() {
        let tree = render_tree(&[
            "README.md",
            "src/lib.rs",
            "src/context/tree.rs",
            "src/context/budget.rs",
            "Cargo.toml",
            "tests/cli.rs",
        ]);
        insta::assert_snapshot!(tree, @r"
        src/
          context/
            budget.rs
            tree.rs
          lib.rs
        tests/
          cli.rs
        Cargo.toml
        README.md
        ");
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert_eq!(render_tree::<&str>(&[]), "");
    }

    #[test]
    fn duplicate_paths_collapse() {
        assert_eq!(render_tree(&["a/b.rs", "a/b.rs"]), "a/\n  b.rs\n");
    }
}
