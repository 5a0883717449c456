pub mod clipboard;

use crate::error::Result;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// A destination for rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    Stdout,
    File(PathBuf),
    Clipboard,
}

impl Sink {
    /// Writes `text`. Returns whether the text was delivered; only the
    /// clipboard can decline, and only when `fail_hard` is false.
    pub fn write(
        &self,
        text: &str,
        fail_hard: bool,
    ) -> Result<bool> {
        match self {
            Sink::Stdout => {
                let mut out = std::io::stdout().lock();
                out.write_all(text.as_bytes())?;
                if !text.ends_with('\n') {
                    out.write_all(b"\n")?;
                }
                out.flush()?;
                Ok(true)
            }
            Sink::File(path) => {
                fs::write(path, text)?;
                Ok(true)
            }
            Sink::Clipboard => clipboard::copy_to_clipboard(text, fail_hard),
        }
    }
}

/// Writes `text` to every sink in order. A clipboard failure is only an
/// error when the clipboard is the sole sink. Returns the sinks that received
/// the text.
pub fn emit<'a>(
    sinks: &'a [Sink],
    text: &str,
) -> Result<Vec<&'a Sink>> {
    let sole = sinks.len() == 1;
    let mut delivered = Vec::with_capacity(sinks.len());
    for sink in sinks {
        if sink.write(text, sole)? {
            delivered.push(sink);
        }
    }
    Ok(delivered)
}
