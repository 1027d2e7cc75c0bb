//! Deterministic slugs for catalog keys.

/// Fold accented Spanish letters to their unaccented Latin equivalents.
fn fold(c: char) -> char {
    match c {
        'á' => 'a',
        'é' => 'e',
        'í' => 'i',
        'ó' => 'o',
        'ú' | 'ü' => 'u',
        'ñ' => 'n',
        other => other,
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '_' || c == '-'
}

/// Turn a human-readable label into a lowercase, hyphenated key.
///
/// Runs of whitespace, underscores, and hyphens collapse into a single hyphen
/// and edge hyphens are trimmed. `slugify(slugify(x)) == slugify(x)`.
pub fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut pending_separator = false;

    for c in label.chars().flat_map(char::to_lowercase).map(fold) {
        if is_separator(c) {
            pending_separator = true;
            continue;
        }
        if pending_separator && !slug.is_empty() {
            slug.push('-');
        }
        pending_separator = false;
        slug.push(c);
    }

    slug
}
