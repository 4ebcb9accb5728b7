// SPDX-License-Identifier: AGPL-3.0-or-later
//! Model term names: classification, sanitizing and prettifying

use unicode_segmentation::UnicodeSegmentation;

/// Name of the intercept term as produced by model summaries
pub const INTERCEPT: &str = "(Intercept)";

/// Separator between factors of an interaction term
pub const INTERACTION: char = ':';

pub fn is_intercept(term: &str) -> bool {
    matches!(term.trim(), INTERCEPT | "Intercept")
}

/// Dummy row holding the residual error, which carries no test
pub fn is_residual(term: &str) -> bool {
    matches!(term.trim(), "Residuals" | "Residual")
}

/// Factors making up a term (`A:B` -> `[A, B]`)
pub fn factors(term: &str) -> impl Iterator<Item = &str> {
    term.split(INTERACTION).map(str::trim)
}

/// Interaction order of a term: 0 for the intercept, 1 for main effects
pub fn order(term: &str) -> usize {
    if is_intercept(term) {
        0
    } else {
        factors(term).count()
    }
}

/// Whether `factor` is one of the factors of `term`
pub fn involves(term: &str, factor: &str) -> bool {
    factors(term).any(|f| f == factor.trim())
}

/// Turn a term into a name usable as an identifier
///
/// `(Intercept)` becomes `Intercept`, interaction colons become underscores,
/// whitespace becomes an underscore and anything else that is not
/// alphanumeric, `_` or `.` is dropped.
pub fn sanitize(term: &str) -> String {
    if is_intercept(term) {
        return "Intercept".to_string();
    }
    term.trim()
        .chars()
        .filter_map(|c| match c {
            ':' => Some('_'),
            c if c.is_whitespace() => Some('_'),
            c if c.is_alphanumeric() || c == '_' || c == '.' => Some(c),
            _ => None,
        })
        .collect()
}

/// Human-readable label for tables, LaTeX-flavored
///
/// `a_b:c` becomes `A b $\times$ C`.
pub fn prettify(term: &str) -> String {
    if is_intercept(term) {
        return "Intercept".to_string();
    }
    factors(term)
        .map(|f| capitalize(&f.replace('_', " ")))
        .collect::<Vec<_>>()
        .join(" $\\times$ ")
}

/// Uppercase the first grapheme
fn capitalize(s: &str) -> String {
    let mut graphemes = s.graphemes(true);
    match graphemes.next() {
        Some(first) => {
            let mut out = first.to_uppercase();
            out.push_str(graphemes.as_str());
            out
        }
        None => String::new(),
    }
}

/// Stable order: intercept, main effects, two-way interactions, ...
pub fn sort_by_order<'t, T>(items: &mut [T], term: impl Fn(&T) -> &'t str) {
    items.sort_by_key(|item| order(term(item)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classification() {
        assert!(is_intercept("(Intercept)"));
        assert!(!is_intercept("A"));
        assert!(is_residual("Residuals"));
        assert!(!is_residual("Residualism"));
    }

    #[test]
    fn test_involves_matches_whole_factors() {
        assert!(involves("A:B", "A"));
        assert!(involves("A:B", "B"));
        assert!(!involves("AB", "A"));
        assert!(!involves("age.group", "age"));
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("(Intercept)"), "Intercept");
        assert_eq!(sanitize("A:B"), "A_B");
        assert_eq!(sanitize("cond (log)"), "cond_log");
        assert_eq!(sanitize("age.group"), "age.group");
    }

    #[test]
    fn test_prettify() {
        assert_eq!(prettify("(Intercept)"), "Intercept");
        assert_eq!(prettify("task"), "Task");
        assert_eq!(prettify("task_type:valence"), "Task type $\\times$ Valence");
        assert_eq!(prettify("ñ"), "Ñ");
    }

    #[test]
    fn test_sort_by_order_is_stable() {
        let mut terms = vec!["A:B", "B", "(Intercept)", "A:B:C", "A"];
        sort_by_order(&mut terms, |t| *t);
        assert_eq!(terms, vec!["(Intercept)", "B", "A", "A:B", "A:B:C"]);
    }
}
