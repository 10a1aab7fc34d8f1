//! Vitrina binary entrypoint kept minimal. The pipeline lives in the library.

use std::sync::OnceLock;
use std::{fmt, time::SystemTime};

use clap::Parser;

use vitrina::app::{self, Options};
use vitrina::config;
use vitrina::state::SortDirection;
use vitrina::util;

/// Browse a product catalog from the command line: load a category, then
/// narrow, order, and regroup the visible list.
#[derive(Parser, Debug)]
#[command(name = "vitrina", version, about)]
struct Cli {
    /// Restrict the catalog to one category
    #[arg(long)]
    category: Option<String>,

    /// Narrow the displayed list by a name substring
    #[arg(long)]
    search: Option<String>,

    /// Sort by price: asc or desc
    #[arg(long, value_parser = parse_direction)]
    sort_price: Option<SortDirection>,

    /// Sort by name: asc or desc
    #[arg(long, value_parser = parse_direction)]
    sort_name: Option<SortDirection>,

    /// Group the displayed list by brand
    #[arg(long)]
    group_by_brand: bool,

    /// Catalog service base URL (overrides settings.conf)
    #[arg(long)]
    base_url: Option<String>,
}

/// Parse a sort direction CLI value.
fn parse_direction(s: &str) -> Result<SortDirection, String> {
    SortDirection::from_config_key(s).ok_or_else(|| format!("expected 'asc' or 'desc', got '{s}'"))
}

/// Timestamp source for log lines.
struct VitrinaTimer;

impl tracing_subscriber::fmt::time::FormatTime for VitrinaTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let secs = match SystemTime::now().duration_since(std::time::UNIX_EPOCH) {
            Ok(d) => d.as_secs() as i64,
            Err(_) => 0,
        };
        let s = util::ts_to_date(Some(secs)); // "YYYY-MM-DD HH:MM:SS"
        w.write_str(&s)
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

#[tokio::main]
async fn main() {
    // Initialize tracing logger writing to ~/.config/vitrina/logs/vitrina.log
    {
        let mut log_path = config::logs_dir();
        log_path.push("vitrina.log");
        match std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
        {
            Ok(file) => {
                let (non_blocking, guard) = tracing_appender::non_blocking(file);
                let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(non_blocking)
                    .with_timer(VitrinaTimer)
                    .init();
                let _ = LOG_GUARD.set(guard);
                tracing::info!(path = %log_path.display(), "logging initialized");
            }
            Err(e) => {
                // Fallback: init stderr logger to avoid blocking startup
                let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .with_target(false)
                    .with_ansi(true)
                    .with_timer(VitrinaTimer)
                    .init();
                tracing::warn!(error = %e, "failed to open log file; using stderr");
            }
        }
    }

    let cli = Cli::parse();
    tracing::info!(
        category = cli.category.as_deref().unwrap_or("<all>"),
        "Vitrina starting"
    );
    let opts = Options {
        base_url: cli.base_url,
        category: cli.category,
        search: cli.search,
        sort_price: cli.sort_price,
        sort_name: cli.sort_name,
        group_by_brand: cli.group_by_brand,
    };
    if let Err(err) = app::run(opts).await {
        tracing::error!(error = ?err, "Application error");
        std::process::exit(1);
    }
    tracing::info!("Vitrina exited");
}
