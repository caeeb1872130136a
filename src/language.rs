//! Language-name normalization for the preferred-language dropdown.
//!
//! The dropdown renders each language in its own script, so English names are
//! translated to the exact option text before matching. Values must stay
//! byte-identical to what the site shows.

use std::collections::HashMap;

use autofill_core_types::bag::{as_text, is_truthy};
use once_cell::sync::Lazy;
use serde_json::Value;

const DEFAULT_LANGUAGE: &str = "English";

static LANGUAGE_LABELS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Japanese", "日本語"),
        ("English", "English"),
        ("Chinese", "中文(中国)"),
        // Keyed by the normalized spelling so it stays reachable.
        ("Chinese (taiwan)", "中文(台灣)"),
        ("Korean", "한국어"),
        ("Spanish", "español"),
        ("French", "français"),
        ("German", "Deutsch"),
        ("Russian", "русский"),
        ("Arabic", "العربية"),
        ("Thai", "ไทย"),
        ("Vietnamese", "Tiếng Việt"),
        ("Turkish", "Türkçe"),
        ("Portuguese", "português"),
        ("Italian", "italiano"),
        ("Hindi", "हिंदी"),
        ("Indonesian", "Bahasa Indonesia"),
        ("Malay", "Bahasa Melayu"),
        ("Filipino", "Filipino"),
        ("Urdu", "Urdu"),
        ("Tamil", "Tamil"),
        ("Polish", "polski"),
        ("Swedish", "Swedish"),
        ("Norwegian", "Norwegian Bokmål"),
        ("Danish", "Danish"),
        ("Finnish", "Finnish"),
    ])
});

/// Map a language name to the label the dropdown displays. Unknown names come
/// back capitalized; empty input means English.
pub fn normalize(language: &str) -> String {
    if language.is_empty() {
        return DEFAULT_LANGUAGE.to_string();
    }
    let normalized = capitalize(language);
    match LANGUAGE_LABELS.get(normalized.as_str()) {
        Some(label) => label.to_string(),
        None => normalized,
    }
}

/// Bag-value form of [`normalize`]; falsy or non-scalar values mean English.
pub fn normalize_value(value: Option<&Value>) -> String {
    let text = value
        .filter(|value| is_truthy(value))
        .and_then(as_text)
        .unwrap_or_default();
    normalize(&text)
}

/// First character upper-cased, the rest lower-cased.
fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
