//! Generic CRUD execution against SQLite.

use crate::error::AppError;
use crate::model::Entity;
use crate::sql::{count_all, delete, insert, select_all, select_by_id, update, QueryBuf};
use sqlx::SqlitePool;

pub struct CrudService;

impl CrudService {
    /// Every row, ordered by the table's order column ascending.
    pub async fn list_all<E: Entity>(pool: &SqlitePool) -> Result<Vec<E>, AppError> {
        let q = select_all(E::schema());
        Self::query_many(pool, &q).await
    }

    /// Number of stored rows. Fails when the table is missing or unreadable.
    pub async fn count<E: Entity>(pool: &SqlitePool) -> Result<i64, AppError> {
        let q = count_all(E::schema());
        tracing::debug!(sql = %q.sql, "query");
        Ok(sqlx::query_scalar::<_, i64>(&q.sql).fetch_one(pool).await?)
    }

    /// Fetch one row by primary key; NotFound when absent.
    pub async fn get<E: Entity>(pool: &SqlitePool, id: i64) -> Result<E, AppError> {
        let q = select_by_id(E::schema(), id);
        Self::query_one(pool, &q)
            .await?
            .ok_or_else(|| not_found::<E>(id))
    }

    /// Insert one row and return it with its assigned id.
    pub async fn create<E: Entity>(pool: &SqlitePool, fields: &E::Fields) -> Result<E, AppError> {
        let q = insert(E::schema(), &E::values(fields));
        Self::query_one(pool, &q)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    /// Replace the mutable fields of one row. Returns the updated row.
    pub async fn update<E: Entity>(pool: &SqlitePool, id: i64, fields: &E::Fields) -> Result<E, AppError> {
        let q = update(E::schema(), id, &E::values(fields));
        Self::query_one(pool, &q)
            .await?
            .ok_or_else(|| not_found::<E>(id))
    }

    /// Delete one row. Returns the removed row.
    pub async fn delete<E: Entity>(pool: &SqlitePool, id: i64) -> Result<E, AppError> {
        let q = delete(E::schema(), id);
        Self::query_one(pool, &q)
            .await?
            .ok_or_else(|| not_found::<E>(id))
    }

    async fn query_one<E: Entity>(pool: &SqlitePool, q: &QueryBuf) -> Result<Option<E>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, E>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_optional(pool).await?)
    }

    async fn query_many<E: Entity>(pool: &SqlitePool, q: &QueryBuf) -> Result<Vec<E>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, E>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_all(pool).await?)
    }
}

fn not_found<E: Entity>(id: i64) -> AppError {
    AppError::NotFound(format!("{} {}", E::schema(), id))
}
