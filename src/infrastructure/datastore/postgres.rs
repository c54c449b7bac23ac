//! sqlx-backed datastore

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::postgres::{PgArguments, PgPool, PgRow};
use sqlx::{Column, Row, TypeInfo};

use crate::domain::{Datastore, DomainError, JsonRow, SqlValue};

/// PostgreSQL implementation of the store collaborator.
pub struct PostgresDatastore {
    pool: PgPool,
}

impl PostgresDatastore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Datastore for PostgresDatastore {
    async fn query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<JsonRow>, DomainError> {
        let rows = bind_params(sql, params)
            .fetch_all(&self.pool)
            .await
            .map_err(|err| DomainError::storage(err.to_string()))?;

        rows.iter().map(row_to_json).collect()
    }

    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<u64, DomainError> {
        let result = bind_params(sql, params)
            .execute(&self.pool)
            .await
            .map_err(|err| DomainError::storage(err.to_string()))?;

        Ok(result.rows_affected())
    }
}

fn bind_params<'q>(
    sql: &'q str,
    params: &'q [SqlValue],
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    let mut query = sqlx::query(sql);
    for param in params {
        query = match param {
            SqlValue::Text(value) => query.bind(value.clone()),
            SqlValue::Int(value) => query.bind(*value),
            SqlValue::Float(value) => query.bind(*value),
            SqlValue::Bool(value) => query.bind(*value),
            SqlValue::Json(value) => query.bind(value.clone()),
        };
    }
    query
}

/// Convert a row to loosely-typed JSON, driven by the declared column type.
fn row_to_json(row: &PgRow) -> Result<JsonRow, DomainError> {
    let mut out = Map::new();
    for column in row.columns() {
        let value = decode_column(row, column.ordinal(), column.type_info().name())?;
        out.insert(column.name().to_string(), value);
    }
    Ok(out)
}

fn decode_column(row: &PgRow, idx: usize, type_name: &str) -> Result<Value, DomainError> {
    fn storage(err: sqlx::Error) -> DomainError {
        DomainError::storage(err.to_string())
    }

    let value = match type_name {
        "BOOL" => row.try_get::<Option<bool>, _>(idx).map_err(storage)?.map(Value::from),
        "INT2" => row.try_get::<Option<i16>, _>(idx).map_err(storage)?.map(Value::from),
        "INT4" => row.try_get::<Option<i32>, _>(idx).map_err(storage)?.map(Value::from),
        "INT8" => row.try_get::<Option<i64>, _>(idx).map_err(storage)?.map(Value::from),
        "FLOAT4" => row.try_get::<Option<f32>, _>(idx).map_err(storage)?.map(Value::from),
        "FLOAT8" => row.try_get::<Option<f64>, _>(idx).map_err(storage)?.map(Value::from),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => row
            .try_get::<Option<String>, _>(idx)
            .map_err(storage)?
            .map(Value::from),
        "UUID" => row
            .try_get::<Option<uuid::Uuid>, _>(idx)
            .map_err(storage)?
            .map(|value| Value::from(value.to_string())),
        "DATE" => row
            .try_get::<Option<chrono::NaiveDate>, _>(idx)
            .map_err(storage)?
            .map(|value| Value::from(value.to_string())),
        "TIMESTAMP" => row
            .try_get::<Option<chrono::NaiveDateTime>, _>(idx)
            .map_err(storage)?
            .map(|value| Value::from(value.to_string())),
        "TIMESTAMPTZ" => row
            .try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(idx)
            .map_err(storage)?
            .map(|value| Value::from(value.to_rfc3339())),
        "JSON" | "JSONB" => row.try_get::<Option<Value>, _>(idx).map_err(storage)?,
        // Anything else: best-effort text, NULL when undecodable.
        _ => row
            .try_get::<Option<String>, _>(idx)
            .unwrap_or_default()
            .map(Value::from),
    };

    Ok(value.unwrap_or(Value::Null))
}
