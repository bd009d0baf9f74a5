//! Text normalization.
use itertools::Itertools;

/// Accented characters remapping.
///
/// Source and target of each pair are the same precomposed codepoint, so this pass changes nothing.
/// Decomposed input (eg. `a` + U+0301) is *not* folded into its precomposed form.
const DIACRITICS: [(char, char); 6] = [
    ('á', 'á'),
    ('é', 'é'),
    ('í', 'í'),
    ('ó', 'ó'),
    ('ú', 'ú'),
    ('ñ', 'ñ'),
];

fn remap_diacritics(text: &str) -> String {
    text.chars()
        .map(|c| {
            DIACRITICS
                .iter()
                .find(|(src, _)| *src == c)
                .map_or(c, |(_, dst)| *dst)
        })
        .collect()
}

/// Whitespace, including the ASCII information separators (U+001C..U+001F).
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Normalize text: whitespace runs become a single space (ends are trimmed),
/// diacritics are remapped and everything is lowercased.
///
/// Normalization is idempotent.
pub fn normalize(text: &str) -> String {
    let collapsed = text
        .split(is_separator)
        .filter(|s| !s.is_empty())
        .join(" ");
    remap_diacritics(&collapsed).to_lowercase()
}
