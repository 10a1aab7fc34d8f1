use std::cmp::Ordering;

use crate::state::{Product, SortConfig, SortDirection};

/// What: Compare two products under the given sort configuration.
///
/// Inputs:
/// - `cfg`: Active ordering directives (price takes precedence over name)
/// - `a`, `b`: Products to compare
///
/// Output:
/// - The ordering decided by the first applicable directive; `Equal` when no
///   directive is set or every applicable comparison ties.
///
/// Details:
/// - Price comparison decides only when prices actually differ; equal prices
///   fall through to the name directive.
/// - Names are compared case-insensitively via lowercase mapping.
/// - Any `SortConfig` value is valid; there are no error cases.
pub fn product_cmp(cfg: &SortConfig, a: &Product, b: &Product) -> Ordering {
    if let Some(dir) = cfg.price {
        // Prices are finite by upstream contract; fall back to Equal rather
        // than panic on a malformed value.
        let by_price = a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal);
        let by_price = match dir {
            SortDirection::Ascending => by_price,
            SortDirection::Descending => by_price.reverse(),
        };
        if by_price != Ordering::Equal {
            return by_price;
        }
    }
    if let Some(dir) = cfg.name {
        let na = a.name.to_lowercase();
        let nb = b.name.to_lowercase();
        return match dir {
            SortDirection::Ascending => na.cmp(&nb),
            SortDirection::Descending => nb.cmp(&na),
        };
    }
    Ordering::Equal
}

/// What: Sort a product list in place under the given configuration.
///
/// Inputs:
/// - `items`: Candidate subset produced by the active view mode
/// - `cfg`: Active ordering directives
///
/// Output:
/// - `items` reordered by [`product_cmp`]. The sort is stable, so with both
///   directives unset the input order is preserved exactly; the grouping
///   pre-pass relies on this.
pub fn apply_sort(items: &mut [Product], cfg: &SortConfig) {
    items.sort_by(|a, b| product_cmp(cfg, a, b));
}
