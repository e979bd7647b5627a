//! Ability text, keyword line and title normalization

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::mappings::{TOKEN_SHORT_CODES, pay_short_code};
use crate::models::CardType;

static LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());

static LEADING_LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^<br\s*/?>").unwrap());

static KEYWORD_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&#8226;|&bull;|•").unwrap());

static MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

// [PAY N], [PAY *] or a bare word token like [BOW]
static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\[(?:PAY\s+(\d+|\*)|([A-Z]+))\]").unwrap()
});

// Bullet followed by "Experienced", optionally with a level and set suffix
static EXPERIENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*(?:&#149;|&#8226;|&bull;|•|\x{0095})\s*Experienced\s*(.*)$")
        .unwrap()
});

/// Ability text split from its keyword line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SplitText {
    pub text: String,
    pub keywords: Vec<String>,
}

/// Display variants of a card name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Titles {
    /// Base name without experience marker or markup
    pub title: String,
    /// Name exactly as found in the catalog
    pub formatted: String,
    /// Plain-text name with a `- expN` suffix for experienced versions
    pub pure: String,
}

/// Remove every markup tag
pub fn strip_markup(text: &str) -> String {
    MARKUP.replace_all(text, "").to_string()
}

/// Replace bracketed tokens with their short-codes
///
/// Single pass, so a replacement is never rewritten again. Unknown tokens are
/// left as they are.
pub fn substitute_tokens(text: &str) -> String {
    TOKEN
        .replace_all(text, |caps: &Captures| {
            if let Some(amount) = caps.get(1) {
                return pay_short_code(amount.as_str());
            }
            caps.get(2)
                .and_then(|word| {
                    TOKEN_SHORT_CODES
                        .get(word.as_str().to_uppercase().as_str())
                        .map(|code| code.to_string())
                })
                .unwrap_or_else(|| caps[0].to_string())
        })
        .to_string()
}

/// Split a keyword line on bullet separators
pub fn split_keywords(line: &str) -> Vec<String> {
    KEYWORD_SEPARATOR
        .split(line)
        .map(|keyword| strip_markup(keyword).trim().to_string())
        .filter(|keyword| !keyword.is_empty())
        .collect()
}

fn clean_body(body: &str) -> String {
    let substituted = substitute_tokens(body);
    let trimmed = substituted.trim();
    LEADING_LINE_BREAK
        .replace(trimmed, "")
        .trim_start()
        .to_string()
}

/// Separate ability text from its keyword line
///
/// Only types with a keyword line are split, at the first line break. When
/// there is no line break the whole text is the keyword line.
pub fn split_text(raw: &str, card_type: CardType) -> SplitText {
    if !card_type.has_keyword_line() {
        return SplitText {
            text: clean_body(raw),
            keywords: Vec::new(),
        };
    }

    match LINE_BREAK.find(raw) {
        Some(m) => SplitText {
            keywords: split_keywords(&raw[..m.start()]),
            text: clean_body(&raw[m.end()..]),
        },
        None => SplitText {
            keywords: split_keywords(raw),
            text: String::new(),
        },
    }
}

/// Derive the display variants of a card name
pub fn titles(raw_name: &str) -> Titles {
    let formatted = raw_name.trim().to_string();
    match EXPERIENCE.captures(&formatted) {
        Some(caps) => {
            let start = caps.get(0).map(|m| m.start()).unwrap_or(formatted.len());
            let base = strip_markup(&formatted[..start]).trim().to_string();
            let level = caps
                .get(1)
                .map(|m| strip_markup(m.as_str()).replace(' ', ""))
                .unwrap_or_default();
            Titles {
                pure: format!("{} - exp{}", base, level),
                title: base,
                formatted,
            }
        }
        None => {
            let base = strip_markup(&formatted).trim().to_string();
            Titles {
                title: base.clone(),
                pure: base,
                formatted,
            }
        }
    }
}
