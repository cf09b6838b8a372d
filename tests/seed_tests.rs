//! Seed loader against a real database: `cargo test -- --ignored`

use postboard::extraction::{
    self,
    models::{ExtractionLog, ExtractionSite, Location, Product, Resource, Worker},
    repo,
};
use rust_decimal::Decimal;
use sqlx::PgPool;
use time::macros::date;

async fn counts(pool: &PgPool) -> anyhow::Result<[i64; 6]> {
    Ok([
        repo::count_rows::<Product>(pool).await?,
        repo::count_rows::<Resource>(pool).await?,
        repo::count_rows::<Location>(pool).await?,
        repo::count_rows::<ExtractionSite>(pool).await?,
        repo::count_rows::<Worker>(pool).await?,
        repo::count_rows::<ExtractionLog>(pool).await?,
    ])
}

// no migrations here: the loader has to create the tables itself
#[sqlx::test(migrations = false)]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn seeding_an_empty_database_yields_three_rows_each(pool: PgPool) -> anyhow::Result<()> {
    let report = extraction::seed(&pool).await?;
    assert!(report.counts().iter().all(|(_, n)| *n == 3));
    assert_eq!(counts(&pool).await?, [3; 6]);
    Ok(())
}

#[sqlx::test(migrations = false)]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn every_log_reference_resolves(pool: PgPool) -> anyhow::Result<()> {
    extraction::seed(&pool).await?;
    assert_eq!(repo::count_dangling_log_refs(&pool).await?, 0);

    let sites = repo::fetch_all::<ExtractionSite>(&pool).await?;
    let locations = repo::fetch_all::<Location>(&pool).await?;
    for site in &sites {
        let loc = site.location_id.expect("site has a location");
        assert!(locations.iter().any(|l| l.location_id == loc));
    }
    Ok(())
}

#[sqlx::test(migrations = false)]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn seeded_values_survive_the_round_trip(pool: PgPool) -> anyhow::Result<()> {
    extraction::seed(&pool).await?;

    let logs = repo::fetch_all::<ExtractionLog>(&pool).await?;
    assert_eq!(logs[0].extraction_date, date!(2022 - 01 - 05));
    assert_eq!(logs[2].quantity_extracted, 300);
    assert_eq!(logs[1].notes.as_deref(), Some("Secondary extraction"));

    let workers = repo::fetch_all::<Worker>(&pool).await?;
    assert_eq!(workers[1].salary, Some(Decimal::new(7_500_000, 2)));

    let locations = repo::fetch_all::<Location>(&pool).await?;
    assert_eq!(locations[0].latitude, Some(Decimal::new(12_345, 3)));
    Ok(())
}

#[sqlx::test(migrations = false)]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn reseeding_appends_a_second_copy(pool: PgPool) -> anyhow::Result<()> {
    let first = extraction::seed(&pool).await?;
    let second = extraction::seed(&pool).await?;

    assert_eq!(counts(&pool).await?, [6; 6]);
    // second copy links to its own parents, not the first run's
    assert!(second.sites.iter().all(|id| !first.sites.contains(id)));
    assert_eq!(repo::count_dangling_log_refs(&pool).await?, 0);
    Ok(())
}

#[sqlx::test(migrations = false)]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn failed_batch_commits_nothing(pool: PgPool) -> anyhow::Result<()> {
    postboard::db::migrate(&pool).await?;
    // rejects the second location, after products and resources are already inserted
    sqlx::query("ALTER TABLE location ADD CONSTRAINT no_seed CHECK (name <> 'Location B')")
        .execute(&pool)
        .await?;

    assert!(extraction::seed(&pool).await.is_err());
    assert_eq!(counts(&pool).await?, [0; 6]);
    Ok(())
}
