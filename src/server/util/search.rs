//! Case-insensitive substring search across text columns.

use sea_orm::{sea_query::Expr, Condition};

/// Builds an `OR` condition matching `term` anywhere in any of `columns`, ignoring case.
///
/// Column names are inserted verbatim, so callers pass table-qualified names and may
/// wrap JSON columns in `CAST(.. AS TEXT)`. The search term is always bound as a
/// parameter.
///
/// # Arguments
/// - `columns` - SQL column expressions to search
/// - `term` - Raw search text from the client
///
/// # Returns
/// - `Condition` - `LOWER(col) LIKE '%term%'` for each column joined with `OR`
pub fn contains_ignore_case(columns: &[&str], term: &str) -> Condition {
    let pattern = format!("%{}%", escape_like(&term.to_lowercase()));

    columns.iter().fold(Condition::any(), |condition, column| {
        condition.add(Expr::cust_with_values(
            format!("LOWER({}) LIKE ? ESCAPE '\\'", column),
            [pattern.clone()],
        ))
    })
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_like_wildcards() {
        assert_eq!(escape_like("100%_a\\b"), "100\\%\\_a\\\\b");
        assert_eq!(escape_like("yoga"), "yoga");
    }
}
