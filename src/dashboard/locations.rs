//! Location switching, swipe cycling, and search filtering.

/// Index of `name` in `names`, if present.
#[must_use]
pub fn position(names: &[String], name: &str) -> Option<usize> {
    names.iter().position(|n| n == name)
}

/// Next name after `current`, wrapping to the first.
#[must_use]
pub fn next<'a>(names: &'a [String], current: &str) -> Option<&'a str> {
    let idx = position(names, current).map_or(0, |i| (i + 1) % names.len());
    names.get(idx).map(String::as_str)
}

/// Previous name before `current`, wrapping to the last.
#[must_use]
pub fn prev<'a>(names: &'a [String], current: &str) -> Option<&'a str> {
    if names.is_empty() {
        return None;
    }
    let idx = position(names, current).map_or(0, |i| (i + names.len() - 1) % names.len());
    names.get(idx).map(String::as_str)
}

/// Case-insensitive substring filter on the raw query; surrounding
/// whitespace is part of the needle.
///
/// An empty query, or a query that matches nothing, yields the full list so
/// the search sheet never renders empty.
#[must_use]
pub fn search<'a>(names: &'a [String], query: &str) -> Vec<&'a str> {
    let needle = query.to_lowercase();
    let all = || names.iter().map(String::as_str).collect::<Vec<_>>();
    if needle.is_empty() {
        return all();
    }
    let hits: Vec<&str> = names
        .iter()
        .filter(|n| n.to_lowercase().contains(&needle))
        .map(String::as_str)
        .collect();
    if hits.is_empty() { all() } else { hits }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        ["Copenhagen", "Stockholm", "Berlin", "London", "Paris"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn next_and_prev_wrap() {
        let n = names();
        assert_eq!(next(&n, "Copenhagen"), Some("Stockholm"));
        assert_eq!(next(&n, "Paris"), Some("Copenhagen"));
        assert_eq!(prev(&n, "Copenhagen"), Some("Paris"));
        assert_eq!(prev(&n, "Berlin"), Some("Stockholm"));
    }

    #[test]
    fn cycling_from_unknown_starts_at_first() {
        let n = names();
        assert_eq!(next(&n, "Atlantis"), Some("Copenhagen"));
        assert_eq!(prev(&n, "Atlantis"), Some("Copenhagen"));
        assert_eq!(next(&[], "x"), None);
        assert_eq!(prev(&[], "x"), None);
    }

    #[test]
    fn search_is_case_insensitive() {
        let n = names();
        assert_eq!(search(&n, "BER"), vec!["Berlin"]);
        assert_eq!(search(&n, "o"), vec!["Copenhagen", "Stockholm", "London"]);
    }

    #[test]
    fn empty_or_missing_query_returns_everything() {
        let n = names();
        assert_eq!(search(&n, "").len(), 5);
        assert_eq!(search(&n, "   ").len(), 5);
        assert_eq!(search(&n, "zzz").len(), 5);
    }

    #[test]
    fn whitespace_is_not_trimmed() {
        let n = vec!["New York".to_string(), "Newcastle".to_string()];
        assert_eq!(search(&n, "new "), vec!["New York"]);
        assert_eq!(search(&n, " ber").len(), 2);
    }
}
