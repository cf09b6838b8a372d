//! Fixed sample data for the extraction-tracking tables.
//!
//! Rows are inserted parent-first inside one transaction: products, resources,
//! locations, sites, workers, then logs. Foreign keys in later rows are indexes
//! into the earlier lists and become real ids only after the parents are inserted.
//! A second run appends another copy; none of these tables has a uniqueness
//! constraint besides the serial keys.

use anyhow::Context;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use time::{macros::date, Date};
use tracing::{debug, info};

use super::{
    models::{
        NewExtractionLog, NewExtractionSite, NewLocation, NewProduct, NewResource, NewWorker,
    },
    repo,
};

pub struct SiteSeed {
    pub site_name: &'static str,
    pub location: usize,
    pub capacity: i32,
    pub established_date: Date,
}

pub struct LogSeed {
    pub resource: usize,
    pub site: usize,
    pub worker: usize,
    pub extraction_date: Date,
    pub quantity_extracted: i32,
    pub notes: &'static str,
}

pub fn products() -> Vec<NewProduct> {
    vec![
        NewProduct {
            manufacturer: "Manufacturer A",
            units: "Unit A",
        },
        NewProduct {
            manufacturer: "Manufacturer B",
            units: "Unit B",
        },
        NewProduct {
            manufacturer: "Manufacturer C",
            units: "Unit C",
        },
    ]
}

pub fn resources() -> Vec<NewResource> {
    vec![
        NewResource {
            name: "Resource A",
            quantity: 1000,
            unit_of_measure: "Unit A",
            description: Some("Description A"),
        },
        NewResource {
            name: "Resource B",
            quantity: 500,
            unit_of_measure: "Unit B",
            description: Some("Description B"),
        },
        NewResource {
            name: "Resource C",
            quantity: 200,
            unit_of_measure: "Unit C",
            description: Some("Description C"),
        },
    ]
}

pub fn locations() -> Vec<NewLocation> {
    let loc = |name: &'static str,
               country: &'static str,
               region: &'static str,
               lat: i64,
               lon: i64| NewLocation {
        name,
        country: Some(country),
        region: Some(region),
        latitude: Some(Decimal::new(lat, 3)),
        longitude: Some(Decimal::new(lon, 3)),
    };
    vec![
        loc("Location A", "Country A", "Region A", 12_345, 45_678),
        loc("Location B", "Country B", "Region B", 23_456, 56_789),
        loc("Location C", "Country C", "Region C", 34_567, 67_890),
    ]
}

pub fn sites() -> Vec<SiteSeed> {
    vec![
        SiteSeed {
            site_name: "Site A",
            location: 0,
            capacity: 500,
            established_date: date!(2020 - 01 - 01),
        },
        SiteSeed {
            site_name: "Site B",
            location: 1,
            capacity: 700,
            established_date: date!(2018 - 05 - 15),
        },
        SiteSeed {
            site_name: "Site C",
            location: 2,
            capacity: 1000,
            established_date: date!(2019 - 11 - 20),
        },
    ]
}

pub fn workers() -> Vec<NewWorker> {
    let worker =
        |name: &'static str, position: &'static str, hire_date: Date, salary: i64| NewWorker {
            name,
            position,
            hire_date: Some(hire_date),
            salary: Some(Decimal::new(salary * 100, 2)),
        };
    vec![
        worker("Worker A", "Position A", date!(2019 - 02 - 10), 50_000),
        worker("Worker B", "Position B", date!(2020 - 05 - 20), 75_000),
        worker("Worker C", "Position C", date!(2018 - 10 - 15), 60_000),
    ]
}

pub fn logs() -> Vec<LogSeed> {
    vec![
        LogSeed {
            resource: 0,
            site: 0,
            worker: 0,
            extraction_date: date!(2022 - 01 - 05),
            quantity_extracted: 200,
            notes: "Initial extraction",
        },
        LogSeed {
            resource: 1,
            site: 1,
            worker: 1,
            extraction_date: date!(2022 - 02 - 10),
            quantity_extracted: 100,
            notes: "Secondary extraction",
        },
        LogSeed {
            resource: 2,
            site: 2,
            worker: 2,
            extraction_date: date!(2022 - 03 - 15),
            quantity_extracted: 300,
            notes: "Another extraction",
        },
    ]
}

/// Ids assigned to the inserted rows, per table, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct SeedReport {
    pub products: Vec<i32>,
    pub resources: Vec<i32>,
    pub locations: Vec<i32>,
    pub sites: Vec<i32>,
    pub workers: Vec<i32>,
    pub logs: Vec<i32>,
}

impl SeedReport {
    pub fn counts(&self) -> [(&'static str, usize); 6] {
        [
            ("products", self.products.len()),
            ("resource", self.resources.len()),
            ("location", self.locations.len()),
            ("extraction_site", self.sites.len()),
            ("worker", self.workers.len()),
            ("extraction_log", self.logs.len()),
        ]
    }
}

fn resolve(ids: &[i32], index: usize, what: &str) -> anyhow::Result<i32> {
    ids.get(index)
        .copied()
        .with_context(|| {
            format!("seed references {what} #{index}, only {} inserted", ids.len())
        })
}

/// Inserts every seed row on `conn`. Stops at the first failing insert.
pub async fn insert_all(conn: &mut PgConnection) -> anyhow::Result<SeedReport> {
    let mut report = SeedReport::default();

    for p in products() {
        report.products.push(repo::insert_product(conn, &p).await?);
    }
    for r in resources() {
        report.resources.push(repo::insert_resource(conn, &r).await?);
    }
    for l in locations() {
        report.locations.push(repo::insert_location(conn, &l).await?);
    }
    for s in sites() {
        let site = NewExtractionSite {
            site_name: s.site_name,
            location_id: Some(resolve(&report.locations, s.location, "location")?),
            capacity: Some(s.capacity),
            established_date: Some(s.established_date),
        };
        report.sites.push(repo::insert_site(conn, &site).await?);
    }
    for w in workers() {
        report.workers.push(repo::insert_worker(conn, &w).await?);
    }
    for l in logs() {
        let log = NewExtractionLog {
            resource_id: Some(resolve(&report.resources, l.resource, "resource")?),
            site_id: Some(resolve(&report.sites, l.site, "extraction_site")?),
            worker_id: Some(resolve(&report.workers, l.worker, "worker")?),
            extraction_date: l.extraction_date,
            quantity_extracted: l.quantity_extracted,
            notes: Some(l.notes),
        };
        report.logs.push(repo::insert_log(conn, &log).await?);
    }

    debug!(?report, "seed rows inserted");
    Ok(report)
}

/// Creates missing tables, then inserts the seed rows in a single transaction.
///
/// Nothing is committed if any insert fails.
pub async fn run(db: &PgPool) -> anyhow::Result<SeedReport> {
    crate::db::migrate(db).await?;

    let mut tx = db.begin().await.context("begin seed transaction")?;
    let report = insert_all(&mut tx).await?;
    tx.commit().await.context("commit seed transaction")?;

    for (table, n) in report.counts() {
        info!(table, rows = n, "seeded");
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_rows_per_table() {
        assert_eq!(products().len(), 3);
        assert_eq!(resources().len(), 3);
        assert_eq!(locations().len(), 3);
        assert_eq!(sites().len(), 3);
        assert_eq!(workers().len(), 3);
        assert_eq!(logs().len(), 3);
    }

    #[test]
    fn references_point_at_earlier_rows() {
        for s in sites() {
            assert!(s.location < locations().len());
        }
        for l in logs() {
            assert!(l.resource < resources().len());
            assert!(l.site < sites().len());
            assert!(l.worker < workers().len());
        }
    }

    #[test]
    fn decimals_fit_their_columns() {
        for l in locations() {
            let lat = l.latitude.unwrap();
            assert!(lat.scale() <= 6 && lat.abs() < Decimal::new(1000, 0));
        }
        assert_eq!(workers()[1].salary, Some(Decimal::new(7_500_000, 2)));
        assert_eq!(locations()[2].longitude.unwrap().to_string(), "67.890");
    }

    #[test]
    fn resolve_reports_missing_parent() {
        assert_eq!(resolve(&[7, 8, 9], 1, "worker").unwrap(), 8);
        let err = resolve(&[7], 2, "worker").unwrap_err();
        assert!(err.to_string().contains("worker #2"));
    }

    #[test]
    fn report_counts_follow_insert_order() {
        let report = SeedReport {
            products: vec![1, 2, 3],
            logs: vec![1],
            ..Default::default()
        };
        let counts = report.counts();
        assert_eq!(counts[0], ("products", 3));
        assert_eq!(counts[5], ("extraction_log", 1));
    }
}
