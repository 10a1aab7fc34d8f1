use crate::state::Product;

/// What: Select products whose display name contains the search term.
///
/// Inputs:
/// - `items`: Candidate products, normally the full catalog
/// - `term`: Free-text search term; may be empty
///
/// Output:
/// - The matching subsequence in input order. An empty term matches every
///   product.
///
/// Details:
/// - Matching is a case-insensitive substring test on the display name only.
/// - The result is never sorted here; the caller applies the active sort
///   configuration afterwards.
pub fn filter_by_name(items: &[Product], term: &str) -> Vec<Product> {
    let needle = term.to_lowercase();
    items
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
