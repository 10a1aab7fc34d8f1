//! Core state types for the catalog view pipeline.
//!
//! This module defines the product records decoded from the catalog service,
//! the sort configuration, the active view mode, the load coordination types,
//! and the central [`ViewState`] container mutated by the controller logic in
//! [`crate::logic::view`].

/// Direction of a single ordering directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    /// Lower values first (for names: "a" before "z").
    Ascending,
    /// Higher values first.
    Descending,
}

impl SortDirection {
    /// Stable key used when persisting a direction to the settings file.
    pub const fn as_config_key(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    /// Parse a direction from a settings value. Unknown or empty values are
    /// treated as "no preference" by the caller.
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Ascending),
            "desc" | "descending" => Some(Self::Descending),
            _ => None,
        }
    }
}

/// Which field of [`SortConfig`] a sort command targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    /// Numeric price directive.
    Price,
    /// Display-name directive.
    Name,
}

/// The pair of independent ordering directives shared by all view
/// recomputations.
///
/// `None` is a valid "no preference" state, not an error. Price takes
/// precedence over name when both are set; see [`crate::logic::compare`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortConfig {
    /// Directive for the numeric price field.
    pub price: Option<SortDirection>,
    /// Directive for the display name.
    pub name: Option<SortDirection>,
}

impl SortConfig {
    /// Whether neither directive is set, i.e. the comparator treats every
    /// pair of products as equal.
    pub const fn is_unset(&self) -> bool {
        self.price.is_none() && self.name.is_none()
    }
}

/// One product record as served by the catalog service.
///
/// Records are immutable once loaded; the catalog is only ever replaced
/// wholesale, never patched in place.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Product {
    /// Opaque unique identifier (upstream field `_id`).
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name shown in lists and matched by the text filter.
    pub name: String,
    /// Non-negative price as reported by the service.
    pub price: f64,
    /// Category label used for catalog narrowing at load time.
    pub category: String,
    /// Brand label used by the grouping pre-pass.
    pub brand: String,
    /// Image path, resolved against the media base URL by the presentation
    /// layer.
    #[serde(default)]
    pub image: String,
}

/// Which candidate-subset derivation is currently active.
///
/// Exactly one mode is active at a time; activating one replaces any other,
/// so search and grouping can never compose. A successful load always resets
/// the mode to [`ViewMode::All`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Full catalog, no extra derivation.
    #[default]
    All,
    /// Name-filtered subset for the stored search term.
    Searched(String),
    /// Catalog reordered so products of one brand are contiguous.
    GroupedByBrand,
}

/// Load request sent to the background catalog worker.
#[derive(Clone, Debug)]
pub struct LoadRequest {
    /// Monotonic identifier used to correlate the response.
    pub id: u64,
    /// Optional category restriction for this load.
    pub category: Option<String>,
}

/// Response corresponding to a prior [`LoadRequest`].
#[derive(Clone, Debug)]
pub struct CatalogResponse {
    /// Echoed identifier from the originating request.
    pub id: u64,
    /// Fetched products, or a transport/parse error description.
    pub result: Result<Vec<Product>, String>,
}

/// Single-owner mutable state for one catalog screen.
///
/// Mutated only through the operations in [`crate::logic::view`]; every
/// state change funnels into `recompute`, which rebuilds `displayed` from
/// scratch.
#[derive(Clone, Debug)]
pub struct ViewState {
    /// Canonical product list as last successfully loaded.
    pub catalog: Vec<Product>,
    /// Derived, ordered list currently shown. Always a permutation of a
    /// subset of `catalog`.
    pub displayed: Vec<Product>,
    /// Active ordering directives.
    pub sort: SortConfig,
    /// Active candidate-subset derivation.
    pub mode: ViewMode,
    /// Category the latest load was issued for.
    pub category: Option<String>,
    /// Identifier of the latest load whose response may still be applied.
    pub latest_load_id: u64,
    /// Next load identifier to allocate.
    pub next_load_id: u64,
    /// Whether a load is currently in flight.
    pub loading: bool,
    /// Error message from the most recent failed load, cleared on success.
    pub load_error: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            catalog: Vec::new(),
            displayed: Vec::new(),
            sort: SortConfig::default(),
            mode: ViewMode::All,
            category: None,
            latest_load_id: 0,
            next_load_id: 1,
            loading: false,
            load_error: None,
        }
    }
}
