//! Text normalization shared by the classifier and the final cleanup pass.

use crate::model::ParsedMenuItem;

/// Lower-cased line with everything except word characters and whitespace
/// removed. Header rules match against this form.
pub fn strip_punctuation(lower: &str) -> String {
    lower
        .chars()
        .filter(|c| is_word_char(*c) || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Item name as displayed: stray punctuation dropped (`&`, `'` and `-` are
/// kept) and every space-separated word title-cased.
pub fn clean_name(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| is_word_char(*c) || c.is_whitespace() || matches!(c, '&' | '\'' | '-'))
        .collect();
    title_case(kept.trim())
}

pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Keeps `[A-Za-z0-9 ,.-&]` and trims.
pub fn clean_ingredients(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | ',' | '.' | '-' | '&'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Final pass over sealed items; order is preserved.
pub fn finalize(items: Vec<ParsedMenuItem>, min_name_len: usize) -> Vec<ParsedMenuItem> {
    items
        .into_iter()
        .map(|item| ParsedMenuItem {
            name: item.name.trim().to_string(),
            ingredients: clean_ingredients(&item.ingredients),
            ..item
        })
        .filter(|item| item.name.chars().count() >= min_name_len)
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
