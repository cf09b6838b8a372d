//! Records of the extraction-tracking tables.
//!
//! These tables stand apart from `users`/`posts`; only the seed loader writes them.
//! `Product` has no purchases relation: that entity was never defined.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{postgres::PgRow, FromRow};
use time::Date;

/// A table that can be listed and counted generically.
pub trait Table: for<'r> FromRow<'r, PgRow> + Send + Unpin {
    const NAME: &'static str;
    const KEY: &'static str;
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    pub product_id: i32,
    pub manufacturer: String,
    pub units: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Resource {
    pub resource_id: i32,
    pub name: String,
    pub quantity: i32,
    pub unit_of_measure: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Location {
    pub location_id: i32,
    pub name: String,
    pub country: Option<String>,
    pub region: Option<String>,
    pub latitude: Option<Decimal>,  // NUMERIC(9,6)
    pub longitude: Option<Decimal>, // NUMERIC(9,6)
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ExtractionSite {
    pub site_id: i32,
    pub site_name: String,
    pub location_id: Option<i32>,
    pub capacity: Option<i32>,
    pub established_date: Option<Date>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Worker {
    pub worker_id: i32,
    pub name: String,
    pub position: String,
    pub hire_date: Option<Date>,
    pub salary: Option<Decimal>, // NUMERIC(10,2)
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ExtractionLog {
    pub log_id: i32,
    pub resource_id: Option<i32>,
    pub site_id: Option<i32>,
    pub worker_id: Option<i32>,
    pub extraction_date: Date,
    pub quantity_extracted: i32,
    pub notes: Option<String>,
}

impl Table for Product {
    const NAME: &'static str = "products";
    const KEY: &'static str = "product_id";
}

impl Table for Resource {
    const NAME: &'static str = "resource";
    const KEY: &'static str = "resource_id";
}

impl Table for Location {
    const NAME: &'static str = "location";
    const KEY: &'static str = "location_id";
}

impl Table for ExtractionSite {
    const NAME: &'static str = "extraction_site";
    const KEY: &'static str = "site_id";
}

impl Table for Worker {
    const NAME: &'static str = "worker";
    const KEY: &'static str = "worker_id";
}

impl Table for ExtractionLog {
    const NAME: &'static str = "extraction_log";
    const KEY: &'static str = "log_id";
}

// Insert payloads. Foreign keys are already resolved to database ids here.

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub manufacturer: &'static str,
    pub units: &'static str,
}

#[derive(Debug, Clone)]
pub struct NewResource {
    pub name: &'static str,
    pub quantity: i32,
    pub unit_of_measure: &'static str,
    pub description: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct NewLocation {
    pub name: &'static str,
    pub country: Option<&'static str>,
    pub region: Option<&'static str>,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
}

#[derive(Debug, Clone)]
pub struct NewExtractionSite {
    pub site_name: &'static str,
    pub location_id: Option<i32>,
    pub capacity: Option<i32>,
    pub established_date: Option<Date>,
}

#[derive(Debug, Clone)]
pub struct NewWorker {
    pub name: &'static str,
    pub position: &'static str,
    pub hire_date: Option<Date>,
    pub salary: Option<Decimal>,
}

#[derive(Debug, Clone)]
pub struct NewExtractionLog {
    pub resource_id: Option<i32>,
    pub site_id: Option<i32>,
    pub worker_id: Option<i32>,
    pub extraction_date: Date,
    pub quantity_extracted: i32,
    pub notes: Option<&'static str>,
}
