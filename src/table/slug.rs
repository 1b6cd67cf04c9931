use once_cell::sync::Lazy;
use regex::Regex;

static SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("slug pattern should compile"));

/// Column-name form of a header label: lowercase, apostrophes dropped, every
/// run of non-alphanumerics turned into one `_`, no leading/trailing `_`.
pub fn slugify(text: &str) -> String {
    let lower = text
        .to_lowercase()
        .replace(|c: char| c == '\'' || c == '\u{2019}', "");
    SEPARATORS
        .replace_all(&lower, "_")
        .trim_matches('_')
        .to_string()
}
