//! Slug helpers for lesson ids and output paths.

/// Slugify a topic directory or file stem into a URL path segment.
///
/// # Rules
/// 1. Lowercase the entire string
/// 2. Replace spaces, underscores, and `&` with dashes
/// 3. Strip any character not in `[a-z0-9-]`
/// 4. Collapse consecutive dashes
/// 5. Trim leading/trailing dashes
/// 6. If result is empty, use `lesson-{index}`
#[must_use]
pub fn slugify(name: &str, index: usize) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.to_lowercase().chars() {
        let mapped = match c {
            ' ' | '_' | '&' | '-' => Some('-'),
            c if c.is_ascii_alphanumeric() => Some(c),
            _ => None,
        };
        if let Some(c) = mapped {
            if !(c == '-' && slug.ends_with('-')) {
                slug.push(c);
            }
        }
    }

    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        format!("lesson-{index}")
    } else {
        slug.to_string()
    }
}

/// Produce an HTML `id` attribute value from a section title.
#[must_use]
pub fn anchor(title: &str) -> String {
    slugify(title, 0)
}
