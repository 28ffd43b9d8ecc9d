//! Subdomain allocation. Open question #1 (per design notes): unique at
//! project create time only; renames are not modeled.

/// Lowercases, replaces non-alphanumerics with `-`, and collapses repeats.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_dash = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }
    let trimmed = slug.trim_matches('-');
    if trimmed.is_empty() {
        "project".to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Appends a monotonic numeric suffix until `candidate` is not present in
/// `existing`. Two projects with identical names end up with distinct,
/// both-resolvable subdomains.
pub fn unique_subdomain(name: &str, existing: &std::collections::HashSet<String>) -> String {
    let base = slugify(name);
    if !existing.contains(&base) {
        return base;
    }

    let mut n = 2u32;
    loop {
        let candidate = format!("{base}-{n}");
        if !existing.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
