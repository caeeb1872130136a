const SENSITIVE_MARKERS: &[&str] = &[
    "passport",
    "national_id",
    "nationalid",
    "phone",
    "mobile",
    "email",
    "password",
    "kba",
    "birth",
];

/// Log-safe rendering of a value written into `identifier`.
pub fn value(identifier: &str, raw: &str) -> String {
    let lowered = identifier.to_ascii_lowercase();
    if SENSITIVE_MARKERS.iter().any(|marker| lowered.contains(marker)) {
        return format!("<redacted:{} chars>", raw.chars().count());
    }
    title(raw, 48)
}

pub fn title(raw: &str, max_chars: usize) -> String {
    if raw.chars().count() > max_chars {
        let mut truncated: String = raw.chars().take(max_chars).collect();
        truncated.push_str("...");
        truncated
    } else {
        raw.to_string()
    }
}
