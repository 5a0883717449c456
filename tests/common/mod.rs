#![allow(dead_code)]
use assert_cmd::Command;
use assert_fs::{TempDir, prelude::*};

/// Builds a fixture tree:
/// root/
///   src/greet.ts
///   src/greet.test.ts
///   src/util/math.rs
///   README.md
///   bin/blob.dat   (binary)
///   dist/bundle.js (ignored via .gitignore)
pub fn project() -> TempDir {
    let td = TempDir::new().unwrap();
    td.child("src/greet.ts")
        .write_str(
            "// Greeting helpers\nexport interface Options {\n  loud: boolean;\n}\n\n\
             export function greet(name: string): string {\n  return `hi ${name}`;\n}\n",
        )
        .unwrap();
    td.child("src/greet.test.ts")
        .write_str("import { greet } from './greet';\ngreet('a');\n")
        .unwrap();
    td.child("src/util/math.rs")
        .write_str("/// Adds.\npub fn add(a: i32, b: i32) -> i32 {\n    a + b\n}\n")
        .unwrap();
    td.child("README.md").write_str("# demo & <notes>\n").unwrap();
    td.child("bin/blob.dat").write_binary(&[0u8; 64]).unwrap();
    td.child("dist/bundle.js").write_str("var x = 1;\n").unwrap();
    td.child(".gitignore").write_str("/dist\n").unwrap();
    td
}

/// The binary under test, run inside `dir` and never touching the clipboard.
pub fn pack(dir: &TempDir) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("context-pack");
    cmd.current_dir(dir).args(["--stdout", "--no-clipboard"]);
    cmd
}
