//! Creates the extraction-tracking tables if needed and fills them with sample rows.
//!
//! Not idempotent: every run appends another three rows per table.

use postboard::{
    config::DatabaseConfig,
    db,
    extraction::{
        self,
        models::{ExtractionLog, ExtractionSite, Location, Product, Resource, Worker},
        repo,
    },
    logging,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init("postboard=info,seed=info");

    let config = DatabaseConfig::from_env()?;
    let pool = db::connect(&config).await?;

    let report = extraction::seed(&pool).await?;
    info!(logs = ?report.logs, "seed committed");

    let products = repo::count_rows::<Product>(&pool).await?;
    let resources = repo::count_rows::<Resource>(&pool).await?;
    let locations = repo::count_rows::<Location>(&pool).await?;
    let sites = repo::count_rows::<ExtractionSite>(&pool).await?;
    let workers = repo::count_rows::<Worker>(&pool).await?;
    let logs = repo::count_rows::<ExtractionLog>(&pool).await?;
    info!(products, resources, locations, sites, workers, logs, "table totals");

    let dangling = repo::count_dangling_log_refs(&pool).await?;
    anyhow::ensure!(dangling == 0, "{dangling} extraction_log rows reference missing rows");
    Ok(())
}
