// jar_service/src/adapters/pg_store.rs

//! Postgres-backed [`JarStore`]. Descriptive attributes live in a JSONB column.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use clayjar::{Jar, JarAttributes, JarStore, StoreError};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::{info, instrument, warn};
use uuid::Uuid;

const JAR_COLUMNS: &str =
  "id, name, description, category, price, stock_qty, image_url, attributes, created_at, updated_at";

const SCHEMA_STATEMENTS: &[&str] = &[
  "CREATE TABLE IF NOT EXISTS jars (
     id UUID PRIMARY KEY,
     name TEXT NOT NULL,
     description TEXT NOT NULL DEFAULT '',
     category TEXT NOT NULL DEFAULT '',
     price DOUBLE PRECISION NOT NULL,
     stock_qty BIGINT NOT NULL,
     image_url TEXT NOT NULL DEFAULT '',
     attributes JSONB NOT NULL DEFAULT '{}'::jsonb,
     created_at TIMESTAMPTZ NOT NULL,
     updated_at TIMESTAMPTZ NOT NULL
   )",
  "CREATE INDEX IF NOT EXISTS jars_category_created_at_idx ON jars (category, created_at DESC)",
  "CREATE INDEX IF NOT EXISTS jars_price_idx ON jars (price)",
  "CREATE INDEX IF NOT EXISTS jars_clay_type_idx ON jars ((attributes->>'clay_type'))",
];

#[derive(Debug, FromRow)]
struct JarRow {
  id: Uuid,
  name: String,
  description: String,
  category: String,
  price: f64,
  stock_qty: i64,
  image_url: String,
  attributes: Json<JarAttributes>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl From<JarRow> for Jar {
  fn from(row: JarRow) -> Self {
    Jar {
      id: Some(row.id),
      name: row.name,
      description: row.description,
      category: row.category,
      price: row.price,
      stock_qty: row.stock_qty,
      image_url: row.image_url,
      attributes: row.attributes.0,
      created_at: row.created_at,
      updated_at: row.updated_at,
    }
  }
}

fn parse_id(id: &str) -> Result<Uuid, StoreError> {
  Uuid::parse_str(id).map_err(|_| StoreError::MalformedId(id.to_string()))
}

fn backend(err: sqlx::Error) -> StoreError {
  StoreError::Backend(anyhow::Error::new(err))
}

#[derive(Clone)]
pub struct PgJarStore {
  pool: PgPool,
}

impl PgJarStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  /// Creates the `jars` table and its lookup indexes if they are missing.
  pub async fn ensure_indexes(&self) -> Result<(), sqlx::Error> {
    for statement in SCHEMA_STATEMENTS {
      sqlx::query(statement).execute(&self.pool).await?;
    }
    info!("jars table and indexes are in place");
    Ok(())
  }
}

#[async_trait]
impl JarStore for PgJarStore {
  #[instrument(name = "pg_store::create", skip_all)]
  async fn create(&self, jar: &mut Jar) -> Result<(), StoreError> {
    jar.prepare_for_create();
    let id = jar.id.ok_or_else(|| StoreError::Backend(anyhow::anyhow!("jar has no id after preparation")))?;
    sqlx::query(
      "INSERT INTO jars (id, name, description, category, price, stock_qty, image_url, attributes, created_at, updated_at)
       VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
    )
    .bind(id)
    .bind(&jar.name)
    .bind(&jar.description)
    .bind(&jar.category)
    .bind(jar.price)
    .bind(jar.stock_qty)
    .bind(&jar.image_url)
    .bind(Json(jar.attributes.clone()))
    .bind(jar.created_at)
    .bind(jar.updated_at)
    .execute(&self.pool)
    .await
    .map_err(backend)?;
    Ok(())
  }

  #[instrument(name = "pg_store::find_by_id", skip(self))]
  async fn find_by_id(&self, id: &str) -> Result<Jar, StoreError> {
    let uuid = parse_id(id)?;
    let row: Option<JarRow> = sqlx::query_as(&format!("SELECT {} FROM jars WHERE id = $1", JAR_COLUMNS))
      .bind(uuid)
      .fetch_optional(&self.pool)
      .await
      .map_err(backend)?;
    row.map(Jar::from).ok_or(StoreError::NotFound)
  }

  #[instrument(name = "pg_store::find_all", skip(self))]
  async fn find_all(&self, limit: i64, offset: i64) -> Result<Vec<Jar>, StoreError> {
    let rows: Vec<JarRow> = sqlx::query_as(&format!(
      "SELECT {} FROM jars ORDER BY created_at DESC LIMIT $1 OFFSET $2",
      JAR_COLUMNS
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(&self.pool)
    .await
    .map_err(backend)?;
    Ok(rows.into_iter().map(Jar::from).collect())
  }

  #[instrument(name = "pg_store::update", skip(self, jar))]
  async fn update(&self, id: &str, jar: &mut Jar) -> Result<(), StoreError> {
    let uuid = parse_id(id)?;
    jar.prepare_for_update();
    let result = sqlx::query(
      "UPDATE jars SET name = $2, description = $3, category = $4, price = $5, stock_qty = $6,
              image_url = $7, attributes = $8, updated_at = $9
       WHERE id = $1",
    )
    .bind(uuid)
    .bind(&jar.name)
    .bind(&jar.description)
    .bind(&jar.category)
    .bind(jar.price)
    .bind(jar.stock_qty)
    .bind(&jar.image_url)
    .bind(Json(jar.attributes.clone()))
    .bind(jar.updated_at)
    .execute(&self.pool)
    .await
    .map_err(backend)?;

    if result.rows_affected() == 0 {
      warn!(jar_id = %uuid, "update matched no row");
    }
    Ok(())
  }

  #[instrument(name = "pg_store::delete", skip(self))]
  async fn delete(&self, id: &str) -> Result<(), StoreError> {
    let uuid = parse_id(id)?;
    sqlx::query("DELETE FROM jars WHERE id = $1")
      .bind(uuid)
      .execute(&self.pool)
      .await
      .map_err(backend)?;
    Ok(())
  }
}
