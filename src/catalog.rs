//! Catalog service retrieval.
//!
//! One asynchronous operation lives here: fetching the full product list over
//! HTTP and narrowing it to a category. This is the only fallible collaborator
//! of the view pipeline; everything downstream operates on validated in-memory
//! data.

use std::sync::LazyLock;
use std::time::Duration;

use crate::state::Product;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Shared HTTP client with connection pooling for catalog fetches.
/// Connection pooling is enabled by default in `reqwest::Client`.
static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(30))
        .user_agent(format!("Vitrina/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to create HTTP client")
});

/// What: Fetch all products, optionally restricted to one category.
///
/// Inputs:
/// - `base_url`: Catalog service root, e.g. `http://localhost:5001`
/// - `category`: Optional category restriction
///
/// Output:
/// - `Ok(Vec<Product>)` with matching records; `Err` on transport, HTTP
///   status, or decode failures.
///
/// Details:
/// - The service returns the whole catalog; the category restriction is
///   applied after decoding, so no backend query support is assumed.
///
/// # Errors
/// - Returns `Err` when the request cannot be sent or times out.
/// - Returns `Err` on a non-success HTTP status.
/// - Returns `Err` when the body is not a JSON array of products.
pub async fn fetch_products(base_url: &str, category: Option<&str>) -> Result<Vec<Product>> {
    let url = format!("{}/api/products", base_url.trim_end_matches('/'));
    tracing::debug!(url = %url, category = category.unwrap_or("<all>"), "fetching catalog");
    let resp = HTTP_CLIENT.get(&url).send().await?.error_for_status()?;
    let mut items: Vec<Product> = resp.json().await?;
    restrict_to_category(&mut items, category);
    Ok(items)
}

/// Keep only products whose category matches exactly; `None` keeps all.
fn restrict_to_category(items: &mut Vec<Product>, category: Option<&str>) {
    if let Some(cat) = category {
        items.retain(|p| p.category == cat);
    }
}
