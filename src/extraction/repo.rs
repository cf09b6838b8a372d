use anyhow::Context;
use sqlx::{PgConnection, PgPool};

use super::models::{
    NewExtractionLog, NewExtractionSite, NewLocation, NewProduct, NewResource, NewWorker, Table,
};

pub async fn insert_product(conn: &mut PgConnection, p: &NewProduct) -> anyhow::Result<i32> {
    let id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO products (manufacturer, units) VALUES ($1, $2) RETURNING product_id",
    )
    .bind(p.manufacturer)
    .bind(p.units)
    .fetch_one(&mut *conn)
    .await
    .context("insert product")?;
    Ok(id)
}

pub async fn insert_resource(conn: &mut PgConnection, r: &NewResource) -> anyhow::Result<i32> {
    let id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO resource (name, quantity, unit_of_measure, description)
        VALUES ($1, $2, $3, $4)
        RETURNING resource_id
        "#,
    )
    .bind(r.name)
    .bind(r.quantity)
    .bind(r.unit_of_measure)
    .bind(r.description)
    .fetch_one(&mut *conn)
    .await
    .context("insert resource")?;
    Ok(id)
}

pub async fn insert_location(conn: &mut PgConnection, l: &NewLocation) -> anyhow::Result<i32> {
    let id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO location (name, country, region, latitude, longitude)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING location_id
        "#,
    )
    .bind(l.name)
    .bind(l.country)
    .bind(l.region)
    .bind(l.latitude)
    .bind(l.longitude)
    .fetch_one(&mut *conn)
    .await
    .context("insert location")?;
    Ok(id)
}

pub async fn insert_site(conn: &mut PgConnection, s: &NewExtractionSite) -> anyhow::Result<i32> {
    let id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO extraction_site (site_name, location_id, capacity, established_date)
        VALUES ($1, $2, $3, $4)
        RETURNING site_id
        "#,
    )
    .bind(s.site_name)
    .bind(s.location_id)
    .bind(s.capacity)
    .bind(s.established_date)
    .fetch_one(&mut *conn)
    .await
    .context("insert extraction_site")?;
    Ok(id)
}

pub async fn insert_worker(conn: &mut PgConnection, w: &NewWorker) -> anyhow::Result<i32> {
    let id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO worker (name, position, hire_date, salary)
        VALUES ($1, $2, $3, $4)
        RETURNING worker_id
        "#,
    )
    .bind(w.name)
    .bind(w.position)
    .bind(w.hire_date)
    .bind(w.salary)
    .fetch_one(&mut *conn)
    .await
    .context("insert worker")?;
    Ok(id)
}

pub async fn insert_log(conn: &mut PgConnection, l: &NewExtractionLog) -> anyhow::Result<i32> {
    let id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO extraction_log
            (resource_id, site_id, worker_id, extraction_date, quantity_extracted, notes)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING log_id
        "#,
    )
    .bind(l.resource_id)
    .bind(l.site_id)
    .bind(l.worker_id)
    .bind(l.extraction_date)
    .bind(l.quantity_extracted)
    .bind(l.notes)
    .fetch_one(&mut *conn)
    .await
    .context("insert extraction_log")?;
    Ok(id)
}

pub async fn fetch_all<T: Table>(db: &PgPool) -> anyhow::Result<Vec<T>> {
    let rows = sqlx::query_as::<_, T>(&format!("SELECT * FROM {} ORDER BY {}", T::NAME, T::KEY))
        .fetch_all(db)
        .await
        .with_context(|| format!("list {}", T::NAME))?;
    Ok(rows)
}

pub async fn count_rows<T: Table>(db: &PgPool) -> anyhow::Result<i64> {
    let n = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", T::NAME))
        .fetch_one(db)
        .await
        .with_context(|| format!("count {}", T::NAME))?;
    Ok(n)
}

/// Log rows whose resource, site or worker reference does not resolve.
pub async fn count_dangling_log_refs(db: &PgPool) -> anyhow::Result<i64> {
    let n = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
          FROM extraction_log l
          LEFT JOIN resource r        ON r.resource_id = l.resource_id
          LEFT JOIN extraction_site s ON s.site_id = l.site_id
          LEFT JOIN worker w          ON w.worker_id = l.worker_id
         WHERE r.resource_id IS NULL OR s.site_id IS NULL OR w.worker_id IS NULL
        "#,
    )
    .fetch_one(db)
    .await
    .context("count dangling extraction_log references")?;
    Ok(n)
}
