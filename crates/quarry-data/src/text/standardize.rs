use std::sync::OnceLock;

use regex::Regex;

fn line_break_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<br\s*/?>").expect("static regex"))
}

fn punctuation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[[:punct:]]").expect("static regex"))
}

/// Lowercase, turn HTML line breaks into spaces, and drop ASCII punctuation.
pub fn standardize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let no_breaks = line_break_re().replace_all(&lowered, " ");
    punctuation_re().replace_all(&no_breaks, "").into_owned()
}

/// Standardize and split on whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    standardize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
