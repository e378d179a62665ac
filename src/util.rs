/// Turns a human readable name into a topic segment, e.g. "Living Room" -> "living_room".
/// Characters outside [a-z0-9_-] are dropped.
pub fn slugify(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| is_id_char(*c))
        .collect()
}

/// Checks that `id` is non-empty and only contains [a-zA-Z0-9_-]
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(is_id_char)
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}
