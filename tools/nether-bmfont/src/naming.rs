//! Face name to C identifier normalization

/// Used when the face name has no usable characters
pub const FALLBACK_NAME: &str = "FONT";

/// Convert a face name into an UPPER_SNAKE identifier.
///
/// Words break on any non-alphanumeric character, on lower-to-upper case
/// changes, between letters and digits, and before the last capital of an
/// acronym (`JSONData` -> `JSON_DATA`). Non-ASCII characters act as
/// separators.
pub fn symbol_name(face: &str) -> String {
    let chars: Vec<char> = face.chars().collect();
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            flush(&mut words, &mut current);
            continue;
        }

        if !current.is_empty() {
            let prev = chars[i - 1];
            let next = chars.get(i + 1).copied();
            if is_word_boundary(prev, c, next) {
                flush(&mut words, &mut current);
            }
        }

        current.push(c.to_ascii_uppercase());
    }
    flush(&mut words, &mut current);

    if words.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        words.join("_")
    }
}

fn is_word_boundary(prev: char, c: char, next: Option<char>) -> bool {
    (prev.is_ascii_lowercase() && c.is_ascii_uppercase())
        || (prev.is_ascii_digit() != c.is_ascii_digit())
        || (prev.is_ascii_uppercase()
            && c.is_ascii_uppercase()
            && next.is_some_and(|n| n.is_ascii_lowercase()))
}

fn flush(words: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}
