use crate::error::{Error, Result};
use copypasta::{ClipboardContext, ClipboardProvider};

/// Copy text to clipboard. When `fail_hard` is false a failure is logged and
/// swallowed; otherwise it is returned as [`Error::Clipboard`].
pub fn copy_to_clipboard(
    text: &str,
    fail_hard: bool,
) -> Result<bool> {
    let fail = |what: &str, e: &dyn std::fmt::Debug| -> Result<bool> {
        if fail_hard {
            Err(Error::Clipboard(format!("{what}: {e:?}")))
        } else {
            tracing::warn!("{what}: {e:?}");
            Ok(false)
        }
    };

    let mut ctx = match ClipboardContext::new() {
        Ok(c) => c,
        Err(e) => return fail("clipboard unavailable", &e),
    };
    if let Err(e) = ctx.set_contents(text.to_string()) {
        return fail("clipboard copy failed", &e);
    }
    tracing::debug!(bytes = text.len(), "copied to clipboard");
    Ok(true)
}
