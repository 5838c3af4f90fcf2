use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use genesys_scraper::catalog::{self, CatalogIndex};
use genesys_scraper::fuzzy_matcher::Reconciler;
use genesys_scraper::output;
use genesys_scraper::scrape;

#[derive(Parser)]
#[command(name = "genesys-scraper")]
#[command(about = "Scrape the Yu-Gi-Oh! Genesys points list and enrich it with card data")]
struct Args {
    /// Export only the ranked list, without card database enrichment
    #[arg(short, long)]
    genesys_only: bool,

    /// Minimum similarity score (0-100) for a fuzzy match
    #[arg(long, default_value_t = 85.0)]
    threshold: f64,

    /// Path for the exported JSON file
    #[arg(short, long, default_value = "genesys.json")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let ranked = scrape::fetch_ranked_list().await?;
    info!("Scraped {} ranked cards", ranked.len());

    if args.genesys_only {
        info!("Skipping catalog enrichment; exporting the ranked list only");
        output::write_json(&ranked, &args.output)?;
        info!("Saved {} cards to {}", ranked.len(), args.output.display());
        return Ok(());
    }

    let cards = catalog::fetch_catalog().await?;
    let index = CatalogIndex::build(cards);

    let reconciler = Reconciler::new(args.threshold);
    let (enriched, report) = reconciler.reconcile(&ranked, &index);
    report.log_summary();

    output::write_json(&enriched, &args.output)?;
    info!("Saved {} cards to {}", enriched.len(), args.output.display());
    Ok(())
}
