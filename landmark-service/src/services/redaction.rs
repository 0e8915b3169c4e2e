//! Best-effort removal of coordinate-like text from model replies.
//!
//! This is a heuristic: it removes anything that looks like a precise
//! coordinate or a long number, which also catches phone numbers and
//! postcodes. Four-digit years survive.

use once_cell::sync::Lazy;
use regex::Regex;

/// Signed decimal with at least four fractional digits, optionally followed
/// by a degree sign and a hemisphere letter: `41.0256`, `-28,97410°`, `41.0256° N`.
static DECIMAL_COORDINATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[-+]?\d+[.,]\d{4,}(?:\s*°(?:\s*[NSEW]\b)?)?").expect("valid coordinate regex")
});

static LONG_DIGIT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{5,}").expect("valid digit-run regex"));

/// English and Turkish words for latitude/longitude, including Turkish
/// suffixed forms (`enlemi`, `boylamında`).
static COORDINATE_WORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:latitudes?|longitudes?|enlem\w*|boylam\w*)\b")
        .expect("valid coordinate-word regex")
});

static SPACE_BEFORE_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]+([,.;:!?])").expect("valid punctuation regex"));

static REPEATED_SPACES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]{2,}").expect("valid whitespace regex"));

/// Remove coordinates, long digit runs and latitude/longitude words. Text
/// without any of those comes back byte-for-byte unchanged.
pub fn redact(text: &str) -> String {
    let mut text = text.to_string();
    // Tidying can close a gap like "41 .0256" into a fresh match; repeat
    // until nothing is left. Every pass removes at least one character.
    while is_sensitive(&text) {
        text = strip_once(&text);
    }
    text
}

fn is_sensitive(text: &str) -> bool {
    DECIMAL_COORDINATE.is_match(text)
        || LONG_DIGIT_RUN.is_match(text)
        || COORDINATE_WORDS.is_match(text)
}

fn strip_once(text: &str) -> String {
    let text = DECIMAL_COORDINATE.replace_all(text, "");
    let text = LONG_DIGIT_RUN.replace_all(&text, "");
    let text = COORDINATE_WORDS.replace_all(&text, "");
    let text = SPACE_BEFORE_PUNCTUATION.replace_all(&text, "$1");
    let text = REPEATED_SPACES.replace_all(&text, " ");

    text.trim().to_string()
}
