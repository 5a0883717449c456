use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use tiktoken_rs::{CoreBPE, o200k_base};

/// Character, line and token figures for one text blob.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenInfo {
    pub chars: usize,
    pub lines: usize,
    pub tokens: usize,
}

/// Display classification of a token count against a limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTier {
    Low,
    Mid,
    High,
}

static TOK: Lazy<Option<CoreBPE>> = Lazy::new(|| match o200k_base() {
    Ok(bpe) => Some(bpe),
    Err(e) => {
        tracing::warn!("o200k tokenizer unavailable, falling back to estimates: {e}");
        None
    }
});

static BUDGET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)(\.\d+)?([kK])?$").expect("budget regex is valid"));

/// Count tokens in a string using the shared CoreBPE tokenizer
#[inline]
pub fn count_tokens(text: &str) -> usize {
    match TOK.as_ref() {
        Some(bpe) => bpe.encode_with_special_tokens(text).len(),
        None => estimate(text),
    }
}

/// Full figures for a blob: code points, lines (1 + line breaks) and tokens.
pub fn count(text: &str) -> TokenInfo {
    TokenInfo {
        chars: text.chars().count(),
        lines: 1 + text.matches('\n').count(),
        tokens: count_tokens(text),
    }
}

fn is_cjk(c: char) -> bool {
    matches!(c as u32,
        0x3000..=0x303F     // CJK symbols and punctuation
        | 0x3040..=0x30FF   // Hiragana, Katakana
        | 0x3400..=0x4DBF   // Extension A
        | 0x4E00..=0x9FFF   // Unified Ideographs
        | 0xAC00..=0xD7AF   // Hangul syllables
        | 0xF900..=0xFAFF   // Compatibility Ideographs
        | 0xFF00..=0xFFEF   // Half/full-width forms
        | 0x20000..=0x2FA1F // Extensions B..F, compatibility supplement
    )
}

/// Cheap approximation: one token per CJK code point, four other code points per token.
pub fn estimate(text: &str) -> usize {
    let (cjk, other) = text.chars().fold((0usize, 0usize), |(cjk, other), c| {
        if is_cjk(c) { (cjk + 1, other) } else { (cjk, other + 1) }
    });
    cjk + other.div_ceil(4)
}

/// `999` stays `999`; `1000` and above render as `1.0k`, `12.3k`, ...
pub fn format_tokens(tokens: usize) -> String {
    if tokens < 1000 {
        tokens.to_string()
    } else {
        format!("{:.1}k", tokens as f64 / 1000.0)
    }
}

/// Parse a human budget: `"128000"`, `"32k"`, `"128K"`, `"1.5k"`.
pub fn parse_budget(input: &str) -> Result<usize> {
    let invalid = || Error::InvalidBudget {
        input: input.to_string(),
    };
    let trimmed = input.trim();
    let caps = BUDGET_RE.captures(trimmed).ok_or_else(invalid)?;
    let has_k = caps.get(3).is_some();
    match caps.get(2) {
        // A fractional mantissa only makes sense with a thousands suffix.
        Some(_) if !has_k => Err(invalid()),
        Some(_) => {
            let mantissa: f64 = trimmed[..trimmed.len() - 1].parse().map_err(|_| invalid())?;
            Ok((mantissa * 1000.0).round() as usize)
        }
        None => {
            let whole: usize = caps[1].parse().map_err(|_| invalid())?;
            if has_k {
                whole.checked_mul(1000).ok_or_else(invalid)
            } else {
                Ok(whole)
            }
        }
    }
}

/// `<50%` low, `<80%` mid, otherwise high.
pub fn color_tier(
    tokens: usize,
    limit: usize,
) -> ColorTier {
    if limit == 0 {
        return ColorTier::High;
    }
    let ratio = tokens as f64 / limit as f64;
    if ratio < 0.5 {
        ColorTier::Low
    } else if ratio < 0.8 {
        ColorTier::Mid
    } else {
        ColorTier::High
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_reports_chars_lines_tokens() {
        let info = count("héllo\nworld");
        assert_eq!(info.chars, 11);
        assert_eq!(info.lines, 2);
        assert!(info.tokens > 0);
        assert_eq!(count("").lines, 1);
    }

    #[test]
    fn token_count_is_stable() {
        assert_eq!(count_tokens("hello world"), 2);
        assert_eq!(count_tokens("hello world"), count_tokens("hello world"));
    }

    #[test]
    fn estimate_weights_cjk_higher_than_latin() {
        let cjk = "中文测试中文测试";
        let latin = "abcdefgh";
        assert_eq!(cjk.chars().count(), latin.chars().count());
        assert!(estimate(cjk) > estimate(latin));
        assert_eq!(estimate(latin), 2);
        assert_eq!(estimate(cjk), 8);
    }

    #[test]
    fn format_switches_to_thousands() {
        assert_eq!(format_tokens(0), "0");
        assert_eq!(format_tokens(999), "999");
        assert_eq!(format_tokens(1000), "1.0k");
        assert_eq!(format_tokens(12_345), "12.3k");
    }

    #[test]
    fn parse_budget_accepts_suffixes() {
        assert_eq!(parse_budget("1.5k").unwrap(), 1500);
        assert_eq!(parse_budget("128K").unwrap(), 128_000);
        assert_eq!(parse_budget("1000").unwrap(), 1000);
        assert_eq!(parse_budget(" 32k ").unwrap(), 32_000);
    }

    #[test]
    fn parse_budget_rejects_other_shapes() {
        for bad in ["abc", "", "1.5", "k", "12kk", "-5", "1,000", "1.k"] {
            let err = parse_budget(bad).unwrap_err();
            assert!(
                matches!(err, Error::InvalidBudget { ref input } if input == bad),
                "{bad}: {err}"
            );
        }
    }

    #[test]
    fn tiers_follow_thresholds() {
        assert_eq!(color_tier(49, 100), ColorTier::Low);
        assert_eq!(color_tier(50, 100), ColorTier::Mid);
        assert_eq!(color_tier(79, 100), ColorTier::Mid);
        assert_eq!(color_tier(80, 100), ColorTier::High);
        assert_eq!(color_tier(1, 0), ColorTier::High);
    }
}
