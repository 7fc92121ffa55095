// ABOUTME: Identifier normalization helpers for project and resource names
// ABOUTME: Total functions; bad input is sanitized, never rejected

/// Normalizes a free-form name to kebab-case, keeping only ASCII
/// alphanumerics. "Blog Platform" -> "blog-platform".
pub fn to_kebab_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_sep = false;
    for ch in raw.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            pending_sep = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }
    out
}

/// Normalizes a free-form name to PascalCase singular-ish form.
/// "blog post" -> "BlogPost", "posts" stays "Posts" (singularization is the
/// collaborator's job; this only fixes casing).
pub fn to_pascal_case(raw: &str) -> String {
    raw.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
                }
                None => String::new(),
            }
        })
        .collect()
}
