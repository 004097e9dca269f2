// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! English helpers for scene sentences: plurals, articles, list joining

/// Pluralize a noun for `count`
///
/// Counts of 1 or less return the word unchanged. `man` and `person` have
/// irregular plurals; nouns ending in s, ch, sh or x take "es".
pub fn pluralize(word: &str, count: u32) -> String {
    if count <= 1 {
        return word.to_string();
    }

    match word.to_lowercase().as_str() {
        "man" => return "men".to_string(),
        "person" => return "people".to_string(),
        _ => {}
    }

    if word.ends_with('s') || word.ends_with("ch") || word.ends_with("sh") || word.ends_with('x') {
        format!("{}es", word)
    } else {
        format!("{}s", word)
    }
}

/// Indefinite article for a noun: "an" before a vowel letter, else "a"
pub fn article(noun: &str) -> &'static str {
    match noun.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

/// Phrase for one object class: "a chair", "an apple", "3 chairs"
pub fn object_phrase(noun: &str, count: u32) -> String {
    if count == 1 {
        format!("{} {}", article(noun), noun)
    } else {
        format!("{} {}", count, pluralize(noun, count))
    }
}

/// Join phrases into one "... ahead." sentence
///
/// One item: "x ahead."; two: "x and y ahead."; more: "x, y, and z ahead."
/// Returns `None` for an empty list.
pub fn join_ahead<S: AsRef<str>>(phrases: &[S]) -> Option<String> {
    match phrases {
        [] => None,
        [only] => Some(format!("{} ahead.", only.as_ref())),
        [first, second] => Some(format!("{} and {} ahead.", first.as_ref(), second.as_ref())),
        [init @ .., last] => {
            let head = init.iter().map(AsRef::as_ref).collect::<Vec<&str>>().join(", ");
            Some(format!("{}, and {} ahead.", head, last.as_ref()))
        }
    }
}

/// Upper-case the first character and lower-case the rest
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
