//! Text rendering utilities for human-friendly error messages.
//!
//! Provides helpers to format dependency chains, shorten qualified type
//! names, derive simple names, and suggest close matches for bean lookups.

/// Renders a dependency chain as a readable string.
///
/// # Examples
/// ```
/// use beanery_support::rendering::render_chain;
///
/// let chain = vec!["UserService", "UserRepository", "Database"];
/// let rendered = render_chain(&chain);
/// assert_eq!(rendered, "UserService → UserRepository → Database");
/// ```
pub fn render_chain(chain: &[impl AsRef<str>]) -> String {
    chain
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Returns the unqualified name of a type path, without generic arguments.
///
/// ```
/// use beanery_support::rendering::simple_name;
///
/// assert_eq!(simple_name("app::service::UserService"), "UserService");
/// assert_eq!(simple_name("app::cache::Cache<app::Key>"), "Cache");
/// assert_eq!(simple_name("Clock"), "Clock");
/// ```
pub fn simple_name(qualified: &str) -> &str {
    let path = match qualified.find('<') {
        Some(idx) => &qualified[..idx],
        None => qualified,
    };
    path.rsplit("::").next().unwrap_or(path).trim()
}

/// Lower-cases the first character of `name`, leaving the rest untouched.
///
/// ```
/// use beanery_support::rendering::decapitalize;
///
/// assert_eq!(decapitalize("UserService"), "userService");
/// assert_eq!(decapitalize("URLParser"), "uRLParser");
/// assert_eq!(decapitalize(""), "");
/// ```
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Shortens a fully qualified type name for display.
///
/// ```
/// use beanery_support::rendering::shorten_type_name;
///
/// let short = shorten_type_name("my_app::services::user::UserService");
/// assert_eq!(short, "UserService");
///
/// let short = shorten_type_name("alloc::sync::Arc<my_app::db::Pool>");
/// assert_eq!(short, "Arc<Pool>");
/// ```
pub fn shorten_type_name(full_name: &str) -> String {
    let mut result = String::with_capacity(full_name.len());
    let mut chars = full_name.chars().peekable();
    let mut current_segment = String::new();

    while let Some(ch) = chars.next() {
        match ch {
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                current_segment.clear();
            }
            '<' | '>' | ',' | ' ' => {
                result.push_str(&current_segment);
                result.push(ch);
                current_segment.clear();
            }
            _ => {
                current_segment.push(ch);
            }
        }
    }

    result.push_str(&current_segment);
    result
}

/// Generates "did you mean?" suggestions for a requested name.
///
/// Substring matches rank first, then names sharing a prefix of at least
/// three characters with the request.
pub fn suggest_similar(
    requested: &str,
    available: &[&str],
    max_suggestions: usize,
) -> Vec<String> {
    let requested_lower = requested.to_lowercase();

    let mut scored: Vec<(&str, usize)> = available
        .iter()
        .filter_map(|&name| {
            let name_lower = name.to_lowercase();
            if name_lower == requested_lower {
                return Some((name, 200));
            }

            if name_lower.contains(&requested_lower) || requested_lower.contains(&name_lower) {
                return Some((name, 100));
            }

            let common = name_lower
                .chars()
                .zip(requested_lower.chars())
                .take_while(|(a, b)| a == b)
                .count();

            if common >= 3 {
                return Some((name, common * 10));
            }

            None
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    scored
        .into_iter()
        .take(max_suggestions)
        .map(|(name, _)| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_simple_chain() {
        let chain = vec!["A", "B", "C", "A"];
        assert_eq!(render_chain(&chain), "A → B → C → A");
    }

    #[test]
    fn render_empty_chain() {
        let chain: Vec<&str> = vec![];
        assert_eq!(render_chain(&chain), "");
    }

    #[test]
    fn simple_name_of_nested_generic() {
        assert_eq!(simple_name("a::b::Wrapper<a::Inner<b::X>>"), "Wrapper");
    }

    #[test]
    fn decapitalize_non_ascii() {
        assert_eq!(decapitalize("Ärger"), "ärger");
        assert_eq!(decapitalize("x"), "x");
    }

    #[test]
    fn shorten_no_path() {
        assert_eq!(shorten_type_name("String"), "String");
    }

    #[test]
    fn suggest_case_insensitive_match_first() {
        let available = vec!["userRepository", "userservice", "clock"];
        let suggestions = suggest_similar("userService", &available, 3);
        assert_eq!(suggestions[0], "userservice");
        assert!(suggestions.contains(&"userRepository".to_string()));
    }

    #[test]
    fn suggest_no_match() {
        let available = vec!["database"];
        assert!(suggest_similar("xyzAbcDef", &available, 3).is_empty());
    }
}
