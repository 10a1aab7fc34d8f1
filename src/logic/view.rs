use tokio::sync::mpsc;

use crate::logic::{apply_sort, filter_by_name, group_by_brand};
use crate::state::{
    CatalogResponse, LoadRequest, Product, SortDirection, SortField, ViewMode, ViewState,
};

/// What: Rebuild the displayed list from the catalog and the current state.
///
/// Inputs:
/// - `state`: Mutable view state (catalog, mode, sort)
///
/// Output:
/// - `state.displayed` replaced wholesale with the freshly derived list.
///
/// Details:
/// - Single recomputation entry point: every operation below funnels through
///   here after mutating its piece of state.
/// - The candidate subset is always derived from the full catalog, never from
///   the previously displayed list.
pub fn recompute(state: &mut ViewState) {
    let mut items: Vec<Product> = match &state.mode {
        ViewMode::All => state.catalog.clone(),
        ViewMode::Searched(term) => filter_by_name(&state.catalog, term),
        ViewMode::GroupedByBrand => group_by_brand(&state.catalog),
    };
    apply_sort(&mut items, &state.sort);
    state.displayed = items;
}

/// What: Issue a catalog load for the given category with a fresh id.
///
/// Inputs:
/// - `state`: Mutable view state; updates `next_load_id` and `latest_load_id`
/// - `load_tx`: Channel to the background catalog worker
/// - `category`: Optional category restriction
///
/// Output:
/// - Sends a [`LoadRequest`]; marks the state as loading.
///
/// Details:
/// - The id lets [`handle_catalog_response`] discard responses that were
///   superseded by a newer load (last request wins).
pub fn send_load(
    state: &mut ViewState,
    load_tx: &mpsc::UnboundedSender<LoadRequest>,
    category: Option<String>,
) {
    let id = state.next_load_id;
    state.next_load_id += 1;
    state.latest_load_id = id;
    state.loading = true;
    state.category.clone_from(&category);
    let _ = load_tx.send(LoadRequest { id, category });
}

/// What: Apply a catalog response, discarding stale or failed loads safely.
///
/// Inputs:
/// - `state`: Mutable view state
/// - `resp`: Response from the catalog worker
///
/// Output:
/// - On a current, successful response: replaces the catalog, resets the
///   view mode to [`ViewMode::All`], and recomputes the displayed list.
/// - On a stale response (id mismatch): no state change at all.
/// - On failure: records the error and keeps the last-known-good catalog and
///   displayed list unchanged.
pub fn handle_catalog_response(state: &mut ViewState, resp: CatalogResponse) {
    if resp.id != state.latest_load_id {
        tracing::debug!(
            id = resp.id,
            latest = state.latest_load_id,
            "ignoring stale catalog response"
        );
        return;
    }
    state.loading = false;
    match resp.result {
        Ok(items) => {
            tracing::info!(
                count = items.len(),
                category = state.category.as_deref().unwrap_or("<all>"),
                "catalog loaded"
            );
            state.catalog = items;
            state.mode = ViewMode::All;
            state.load_error = None;
            recompute(state);
        }
        Err(e) => {
            tracing::warn!(error = %e, "catalog load failed; keeping previous view");
            state.load_error = Some(e);
        }
    }
}

/// What: Activate a text search over the full catalog.
///
/// Inputs:
/// - `state`: Mutable view state
/// - `term`: Search term; empty matches everything
///
/// Output:
/// - Mode becomes `Searched(term)` and the displayed list is recomputed.
///   Any prior grouping or search is discarded, not composed.
pub fn search(state: &mut ViewState, term: &str) {
    state.mode = ViewMode::Searched(term.to_string());
    recompute(state);
}

/// What: Update one field of the sort configuration.
///
/// Inputs:
/// - `state`: Mutable view state
/// - `field`: Which directive to change
/// - `direction`: New direction, or `None` to clear the directive
///
/// Output:
/// - Only the named field changes; the view mode is untouched and its subset
///   derivation is replayed under the new configuration.
pub fn set_sort(state: &mut ViewState, field: SortField, direction: Option<SortDirection>) {
    match field {
        SortField::Price => state.sort.price = direction,
        SortField::Name => state.sort.name = direction,
    }
    recompute(state);
}

/// What: Enable or disable the brand-grouping view.
///
/// Inputs:
/// - `state`: Mutable view state
/// - `enabled`: `true` groups by brand, `false` returns to the plain view
///
/// Output:
/// - Mode becomes `GroupedByBrand` or `All` and the displayed list is
///   recomputed from the full catalog.
pub fn set_grouped(state: &mut ViewState, enabled: bool) {
    state.mode = if enabled {
        ViewMode::GroupedByBrand
    } else {
        ViewMode::All
    };
    recompute(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SortConfig;

    fn item(name: &str, price: f64, brand: &str) -> Product {
        Product {
            id: format!("id-{name}"),
            name: name.to_string(),
            price,
            category: "Kitchen".to_string(),
            brand: brand.to_string(),
            image: String::new(),
        }
    }

    fn names(items: &[Product]) -> Vec<String> {
        items.iter().map(|p| p.name.clone()).collect()
    }

    fn loaded_state() -> ViewState {
        let mut st = ViewState::default();
        st.catalog = vec![
            item("Mug", 5.0, "A"),
            item("Jug", 3.0, "B"),
            item("Cup", 5.0, "A"),
        ];
        recompute(&mut st);
        st
    }

    #[tokio::test]
    /// What: `send_load` allocates a fresh id and forwards the category.
    ///
    /// - Input: Default state, category "Books"
    /// - Output: `latest_load_id` advances to 1 and the channel receives a
    ///   matching request
    async fn send_load_increments_and_sends() {
        let mut st = ViewState::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        send_load(&mut st, &tx, Some("Books".to_string()));
        assert_eq!(st.latest_load_id, 1);
        assert_eq!(st.next_load_id, 2);
        assert!(st.loading);
        let req = tokio::time::timeout(std::time::Duration::from_millis(50), rx.recv())
            .await
            .ok()
            .flatten()
            .expect("request sent");
        assert_eq!(req.id, st.latest_load_id);
        assert_eq!(req.category.as_deref(), Some("Books"));
    }

    #[test]
    /// What: A response with a superseded id leaves the state untouched.
    ///
    /// - Input: `latest_load_id` 2, response id 1 with replacement items
    /// - Output: Catalog, displayed list, and mode unchanged
    fn stale_response_is_ignored() {
        let mut st = loaded_state();
        st.latest_load_id = 2;
        st.mode = ViewMode::GroupedByBrand;
        recompute(&mut st);
        let shown_before = names(&st.displayed);

        handle_catalog_response(
            &mut st,
            CatalogResponse {
                id: 1,
                result: Ok(vec![item("Stale", 1.0, "Z")]),
            },
        );
        assert_eq!(names(&st.displayed), shown_before);
        assert_eq!(st.mode, ViewMode::GroupedByBrand);
        assert_eq!(st.catalog.len(), 3);
    }

    #[test]
    /// What: A current successful response replaces the catalog and resets
    /// the mode to `All`.
    ///
    /// - Input: Grouped state, matching response with new items
    /// - Output: New catalog shown, mode back to `All`, error cleared
    fn matching_response_replaces_catalog_and_resets_mode() {
        let mut st = loaded_state();
        st.mode = ViewMode::GroupedByBrand;
        st.load_error = Some("old failure".to_string());
        st.latest_load_id = 1;
        st.loading = true;

        handle_catalog_response(
            &mut st,
            CatalogResponse {
                id: 1,
                result: Ok(vec![item("Pot", 9.0, "C")]),
            },
        );
        assert_eq!(st.mode, ViewMode::All);
        assert_eq!(names(&st.displayed), vec!["Pot"]);
        assert!(st.load_error.is_none());
        assert!(!st.loading);
    }

    #[test]
    /// What: A failed load keeps the last-known-good catalog and view.
    ///
    /// - Input: Loaded state, matching response carrying an error
    /// - Output: Displayed list unchanged, error recorded
    fn failed_load_keeps_previous_view() {
        let mut st = loaded_state();
        st.latest_load_id = 1;
        st.loading = true;
        let shown_before = names(&st.displayed);

        handle_catalog_response(
            &mut st,
            CatalogResponse {
                id: 1,
                result: Err("connection refused".to_string()),
            },
        );
        assert_eq!(names(&st.displayed), shown_before);
        assert_eq!(st.load_error.as_deref(), Some("connection refused"));
        assert!(!st.loading);
    }

    #[test]
    /// What: A failed first load leaves the screen empty, not crashed.
    ///
    /// - Input: Default (never-loaded) state, failing response
    /// - Output: Both lists still empty
    fn failed_first_load_shows_nothing() {
        let mut st = ViewState::default();
        st.latest_load_id = 1;
        handle_catalog_response(
            &mut st,
            CatalogResponse {
                id: 1,
                result: Err("boom".to_string()),
            },
        );
        assert!(st.catalog.is_empty());
        assert!(st.displayed.is_empty());
    }

    #[test]
    /// What: Search always derives from the full catalog, discarding grouping.
    ///
    /// - Input: Grouped state, then `search("u")`
    /// - Output: Result equals filtering the catalog directly; grouping gone
    fn search_discards_grouping() {
        let mut st = loaded_state();
        set_grouped(&mut st, true);
        assert_eq!(names(&st.displayed), vec!["Mug", "Cup", "Jug"]);

        search(&mut st, "u");
        assert_eq!(st.mode, ViewMode::Searched("u".to_string()));
        // Catalog order, not grouped order.
        assert_eq!(names(&st.displayed), vec!["Mug", "Jug", "Cup"]);
    }

    #[test]
    /// What: `set_sort` touches one directive and replays the current mode.
    ///
    /// - Input: Searched state, price asc then name asc
    /// - Output: Filter stays active; price directive survives the name update
    fn set_sort_replays_active_mode() {
        let mut st = loaded_state();
        search(&mut st, "u");
        set_sort(&mut st, SortField::Price, Some(SortDirection::Ascending));
        set_sort(&mut st, SortField::Name, Some(SortDirection::Ascending));
        assert_eq!(
            st.sort,
            SortConfig {
                price: Some(SortDirection::Ascending),
                name: Some(SortDirection::Ascending),
            }
        );
        assert_eq!(st.mode, ViewMode::Searched("u".to_string()));
        assert_eq!(names(&st.displayed), vec!["Jug", "Cup", "Mug"]);
    }

    #[test]
    /// What: Grouping is visible without directives and negated by one.
    ///
    /// - Input: Grouped state; then enable price ascending
    /// - Output: Grouped order first, then purely price-determined order
    fn active_sort_negates_grouping() {
        let mut st = loaded_state();
        set_grouped(&mut st, true);
        assert_eq!(names(&st.displayed), vec!["Mug", "Cup", "Jug"]);

        set_sort(&mut st, SortField::Price, Some(SortDirection::Ascending));
        assert_eq!(st.mode, ViewMode::GroupedByBrand);
        assert_eq!(names(&st.displayed)[0], "Jug");
    }

    #[test]
    /// What: Disabling grouping restores the plain sorted catalog view.
    ///
    /// - Input: Grouped state, then `set_grouped(false)`
    /// - Output: Mode `All`, catalog order shown
    fn disabling_group_restores_all() {
        let mut st = loaded_state();
        set_grouped(&mut st, true);
        set_grouped(&mut st, false);
        assert_eq!(st.mode, ViewMode::All);
        assert_eq!(names(&st.displayed), vec!["Mug", "Jug", "Cup"]);
    }
}
