//! Pure view-pipeline logic split into modular submodules.

pub mod compare;
pub mod filter;
pub mod group;
pub mod view;

// Re-export public APIs to preserve short import paths (crate::logic::...)
pub use compare::{apply_sort, product_cmp};
pub use filter::filter_by_name;
pub use group::group_by_brand;
pub use view::{handle_catalog_response, recompute, search, send_load, set_grouped, set_sort};
