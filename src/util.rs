/// Truncate a string to `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte-index slicing (`&s[..n]`), this is safe for multi-byte UTF-8
/// strings and will never panic on non-ASCII input.
pub fn truncate_with_ellipsis(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

/// Mask a credential for display, keeping at most the first four characters.
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 8 {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}
