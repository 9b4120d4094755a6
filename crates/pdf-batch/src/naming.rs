/// File name used when a title has no usable characters.
pub const PLACEHOLDER_NAME: &str = "file";

/// Lowercase `[a-z0-9]` runs joined by single hyphens.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        PLACEHOLDER_NAME.to_string()
    } else {
        slug
    }
}

/// Resolve the file name (without extension) for item `index`.
///
/// An explicit name wins after cleanup; otherwise the title slug is used.
pub fn resolve_file_name(title: &str, explicit: Option<&str>, index: usize) -> String {
    let resolved = explicit
        .map(clean_explicit_name)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| slugify(title));
    log::debug!("Item {} resolved to file name {:?}", index + 1, resolved);
    resolved
}

fn clean_explicit_name(name: &str) -> String {
    let name = name.trim();
    let stem = match name.len().checked_sub(4) {
        Some(split) if name.is_char_boundary(split) && name[split..].eq_ignore_ascii_case(".pdf") => {
            &name[..split]
        }
        _ => name,
    };
    stem.trim().replace(['/', '\\'], "-")
}
