//! Small pure text helpers.

/// Truncate `s` and append `suffix` if it exceeds `threshold` characters.
///
/// - `threshold`: character count at which truncation kicks in.
/// - `take`: how many characters of content to keep when truncating.
fn truncate_core(s: &str, threshold: usize, take: usize, suffix: &str) -> String {
    if s.chars().count() <= threshold {
        return s.to_string();
    }
    let head: String = s.chars().take(take).collect();
    format!("{head}{suffix}")
}

/// Keep the first `max_length` characters of `text`, then append `...`.
///
/// Text that already fits is returned unchanged. The ellipsis does not count
/// toward `max_length`, so the result may be up to `max_length + 3` characters.
/// Lengths are measured in `char`s so a Unicode scalar value is never split.
#[must_use]
pub fn truncate(text: &str, max_length: usize) -> String {
    truncate_core(text, max_length, max_length, "...")
}

/// Upper-case the first character and leave the rest untouched.
#[must_use]
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Up to two upper-case initials taken from the whitespace-separated words of `name`.
///
/// Upper-casing happens before the cut, so a first letter that expands
/// (e.g. `ß` -> `SS`) can use both slots.
#[must_use]
pub fn get_initials(name: &str) -> String {
    let firsts: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect();
    firsts.to_uppercase().chars().take(2).collect()
}

/// Whitespace as a JavaScript `\s` class sees it: Unicode `White_Space`
/// without U+0085, plus the byte-order mark U+FEFF.
fn is_js_whitespace(ch: char) -> bool {
    (ch.is_whitespace() && ch != '\u{85}') || ch == '\u{feff}'
}

/// Turn arbitrary text into a URL slug.
///
/// Lower-cases, drops everything except ASCII word characters, whitespace and
/// `-`, folds every run of whitespace, `_` and `-` into a single `-`, and trims
/// hyphens from both ends. The output only contains `[a-z0-9-]` with no
/// doubled or edge hyphens, so applying it twice changes nothing.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for ch in text.to_lowercase().chars() {
        if is_js_whitespace(ch) || ch == '_' || ch == '-' {
            pending_separator = true;
        } else if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch);
        }
        // Anything else is stripped without breaking a separator run.
    }

    slug
}
