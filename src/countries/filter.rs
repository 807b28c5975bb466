//! Client-side search over an already-fetched country list.

use super::types::CommonName;

/// Returns the countries whose common name contains `query`,
/// case-insensitively, preserving input order.
///
/// Pure and re-entrant: safe to call on every keystroke. An empty query
/// returns the full input. No ranking, no fuzzy matching — plain substring
/// containment.
pub fn filter<'a, C: CommonName>(countries: &'a [C], query: &str) -> Vec<&'a C> {
    if query.is_empty() {
        return countries.iter().collect();
    }
    let needle = query.to_lowercase();
    countries
        .iter()
        .filter(|c| c.common_name().to_lowercase().contains(&needle))
        .collect()
}
