//! Async runtime wiring: the catalog worker task, the command dispatch that
//! drives the view controller, and the one-shot driver used by the binary.

use tokio::sync::mpsc;
use tokio::time::Duration;

use crate::state::{
    CatalogResponse, LoadRequest, SortConfig, SortDirection, SortField, ViewState,
};
use crate::{catalog, config, logic, util};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// How long the driver waits for the catalog service before giving up.
const LOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Run options resolved from CLI arguments; unset fields fall back to the
/// settings file.
#[derive(Clone, Debug, Default)]
pub struct Options {
    /// Catalog service root URL override.
    pub base_url: Option<String>,
    /// Category restriction for the initial load.
    pub category: Option<String>,
    /// Search term applied after the load.
    pub search: Option<String>,
    /// Price directive override.
    pub sort_price: Option<SortDirection>,
    /// Name directive override.
    pub sort_name: Option<SortDirection>,
    /// Whether to group the displayed list by brand.
    pub group_by_brand: bool,
}

/// User-driven commands accepted by the view controller.
///
/// `Load` is the only command that touches the network; the rest are pure
/// recomputations over the in-memory catalog.
#[derive(Clone, Debug)]
pub enum Command {
    /// Replace the catalog with a fresh load for the given category.
    Load(Option<String>),
    /// Narrow the displayed list by a name substring.
    Search(String),
    /// Update one sort directive, leaving the other untouched.
    Sort(SortField, Option<SortDirection>),
    /// Enable or disable brand grouping.
    Group(bool),
}

/// What: Dispatch one command to the view controller.
///
/// Inputs:
/// - `state`: Mutable view state
/// - `cmd`: Command to apply
/// - `load_tx`: Channel to the catalog worker, used only by `Load`
///
/// Output:
/// - State mutated per the command; `Load` additionally sends a request with
///   a fresh id so stale responses can be discarded on receipt.
pub fn apply_command(
    state: &mut ViewState,
    cmd: Command,
    load_tx: &mpsc::UnboundedSender<LoadRequest>,
) {
    match cmd {
        Command::Load(category) => logic::send_load(state, load_tx, category),
        Command::Search(term) => logic::search(state, &term),
        Command::Sort(field, direction) => logic::set_sort(state, field, direction),
        Command::Group(enabled) => logic::set_grouped(state, enabled),
    }
}

/// What: Spawn the background task that services catalog load requests.
///
/// Inputs:
/// - `base_url`: Catalog service root
/// - `load_rx`: Incoming load requests
/// - `resp_tx`: Outgoing responses, request id echoed
///
/// Output:
/// - Join handle of the worker. The task exits when either channel closes.
///
/// Details:
/// - One fetch per request, no retries; a request superseded while in flight
///   still completes but its response is dropped by the controller's id
///   check.
pub fn spawn_catalog_worker(
    base_url: String,
    mut load_rx: mpsc::UnboundedReceiver<LoadRequest>,
    resp_tx: mpsc::UnboundedSender<CatalogResponse>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(req) = load_rx.recv().await {
            let result = catalog::fetch_products(&base_url, req.category.as_deref())
                .await
                .map_err(|e| e.to_string());
            if resp_tx
                .send(CatalogResponse { id: req.id, result })
                .is_err()
            {
                break;
            }
        }
    })
}

/// What: Load one catalog view and print it: the end-to-end demo driver.
///
/// Inputs:
/// - `opts`: Resolved run options
///
/// Output:
/// - `Ok(())` after printing the displayed list (possibly empty); `Err` only
///   on runtime faults such as a missing worker or timeout. A failed load is
///   reported and leaves the screen empty rather than erroring out.
///
/// # Errors
/// - Returns `Err` when the catalog worker exits unexpectedly or no response
///   arrives within the load timeout.
pub async fn run(opts: Options) -> Result<()> {
    let prefs = config::settings();
    let base_url = opts.base_url.clone().unwrap_or_else(|| prefs.api_base_url.clone());

    let mut state = ViewState {
        sort: SortConfig {
            price: prefs.sort_price,
            name: prefs.sort_name,
        },
        ..Default::default()
    };

    let (load_tx, load_rx) = mpsc::unbounded_channel();
    let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
    let _worker = spawn_catalog_worker(base_url, load_rx, resp_tx);

    apply_command(&mut state, Command::Load(opts.category.clone()), &load_tx);
    while state.loading {
        match tokio::time::timeout(LOAD_TIMEOUT, resp_rx.recv()).await {
            Ok(Some(resp)) => logic::handle_catalog_response(&mut state, resp),
            Ok(None) => return Err("catalog worker exited unexpectedly".into()),
            Err(_) => return Err("timed out waiting for the catalog service".into()),
        }
    }

    // CLI pipeline flags replay the interactive command order: sort
    // directives first, then grouping, then search (which overrides
    // grouping, as it does on screen).
    if let Some(dir) = opts.sort_price {
        apply_command(&mut state, Command::Sort(SortField::Price, Some(dir)), &load_tx);
    }
    if let Some(dir) = opts.sort_name {
        apply_command(&mut state, Command::Sort(SortField::Name, Some(dir)), &load_tx);
    }
    if opts.group_by_brand {
        apply_command(&mut state, Command::Group(true), &load_tx);
    }
    if let Some(term) = &opts.search {
        apply_command(&mut state, Command::Search(term.clone()), &load_tx);
    }

    render(&state, &prefs.media_base_url);
    Ok(())
}

/// Print the displayed list, one product per line.
fn render(state: &ViewState, media_base: &str) {
    let heading = state.category.as_deref().unwrap_or("All Products");
    println!("{heading} ({} items)", state.displayed.len());
    if let Some(e) = &state.load_error {
        println!("  load failed: {e}");
    }
    for p in &state.displayed {
        println!(
            "  {:<28} {:<14} £{:>8.2}  {}",
            p.name,
            p.brand,
            p.price,
            util::media_url(media_base, &p.image)
        );
    }
}
