pub mod cli;
pub mod config;
pub mod error;
pub mod harness;
pub mod paginate;
pub mod param;

use crate::{
    cli::{Action, Args, QueryKind, Source},
    config::{HarnessConfig, load_config},
    error::Error,
    harness::Query,
    paginate::Paginator,
    param::Param,
};
use std::fs;
use tracing::{Level, info};

pub fn run(args: Args) -> Result<(), Error> {
    let cfg = load_config(&args.config).map_err(|source| Error::Config { source })?;
    init_tracing(args.debug || cfg.debug);

    match args.action {
        Action::Check => check(&cfg),
        Action::Query {
            source,
            per_page,
            query,
        } => {
            let value = answer(&cfg, &source, per_page, query)?;
            println!("{value}");
            Ok(())
        }
    }
}

/// Installs the stderr subscriber; later calls keep the first one.
pub fn init_tracing(debug: bool) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(if debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .try_init();
}

fn check(cfg: &HarnessConfig) -> Result<(), Error> {
    let report = harness::run(cfg)?;

    for outcome in &report.outcomes {
        println!("{outcome}");
    }
    info!(passed = report.passed, failed = report.failed, "checks finished");
    println!("Check done: {} passed, {} failed", report.passed, report.failed);

    if report.all_passed() {
        Ok(())
    } else {
        Err(Error::ChecksFailed {
            failed: report.failed,
            total: report.outcomes.len(),
        })
    }
}

/// Builds the paginator `source` describes and runs `kind` against it.
pub fn answer(
    cfg: &HarnessConfig,
    source: &Source,
    per_page: Option<String>,
    kind: QueryKind,
) -> Result<i64, Error> {
    let items_per_page = match per_page {
        Some(text) => Param::from(text),
        None => Param::from(cfg.items_per_page),
    };

    let pager = match (&source.json, source.items) {
        (Some(path), _) => {
            let text = fs::read_to_string(path)?;
            let collection: serde_json::Value = serde_json::from_str(&text)?;
            Paginator::from_json(&collection, items_per_page)?
        }
        (None, Some(count)) => Paginator::from_item_count(count, items_per_page)?,
        (None, None) => Paginator::from_item_count(0, items_per_page)?,
    };

    let query = match kind {
        QueryKind::PageCount => Query::PageCount,
        QueryKind::ItemCount => Query::ItemCount,
        QueryKind::PageItemCount { page } => Query::PageItemCount(page.into()),
        QueryKind::PageIndex { item } => Query::PageIndex(item.into()),
    };
    Ok(query.apply(&pager)?)
}
