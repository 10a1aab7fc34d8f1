use crate::state::Product;

/// What: Reorder products so all items of one brand are contiguous.
///
/// Inputs:
/// - `items`: Candidate products, normally the full catalog
///
/// Output:
/// - A permutation of `items`: brands appear in first-occurrence order and
///   products keep their relative order within each brand run.
///
/// Details:
/// - This is a pre-pass, not a final order. The caller always applies the
///   active sort configuration afterwards, so the grouped order survives
///   only while both sort directives are unset (the stable sort then leaves
///   it intact). An active directive fully determines the final order and
///   the grouping becomes invisible.
pub fn group_by_brand(items: &[Product]) -> Vec<Product> {
    let mut buckets: Vec<(&str, Vec<Product>)> = Vec::new();
    for p in items {
        if let Some((_, bucket)) = buckets.iter_mut().find(|(brand, _)| *brand == p.brand) {
            bucket.push(p.clone());
        } else {
            buckets.push((p.brand.as_str(), vec![p.clone()]));
        }
    }
    buckets.into_iter().flat_map(|(_, bucket)| bucket).collect()
}
