//! Postgres backends: the plan document as a single JSONB row, and the
//! events table for the forms UI.

use async_trait::async_trait;
use planner_common::PlanDocument;
use sqlx::PgPool;

use crate::document::DocumentStore;
use crate::error::StoreResult;
use crate::rows::{EventRow, EventRowStore, NewEventRow};

/// The plan lives in exactly one row of `plan_data`.
const PLAN_ROW_ID: i16 = 1;

// ---------------------------------------------------------------------------
// PgDocumentStore
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS plan_data (
                id         SMALLINT     PRIMARY KEY CHECK (id = 1),
                data       JSONB        NOT NULL,
                updated_at TIMESTAMPTZ  NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn load(&self) -> StoreResult<Option<PlanDocument>> {
        let row = sqlx::query_as::<_, (serde_json::Value,)>(
            "SELECT data FROM plan_data WHERE id = $1",
        )
        .bind(PLAN_ROW_ID)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some((data,)) => Ok(Some(serde_json::from_value(data)?)),
            None => Ok(None),
        }
    }

    async fn replace(&self, doc: &PlanDocument) -> StoreResult<()> {
        let data = serde_json::to_value(doc)?;

        // Single statement: concurrent writers serialize on the row lock.
        sqlx::query(
            r#"
            INSERT INTO plan_data (id, data, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (id) DO UPDATE
            SET data = EXCLUDED.data, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(PLAN_ROW_ID)
        .bind(&data)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PgEventRowStore
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct PgEventRowStore {
    pool: PgPool,
}

impl PgEventRowStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS events (
                id          SERIAL  PRIMARY KEY,
                title       TEXT    NOT NULL,
                event_date  DATE    NOT NULL,
                event_time  TIME    NOT NULL,
                location    TEXT    NOT NULL,
                description TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl EventRowStore for PgEventRowStore {
    async fn list(&self) -> StoreResult<Vec<EventRow>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, title, event_date, event_time, location, description
            FROM events
            ORDER BY event_date ASC, event_time ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn get(&self, id: i32) -> StoreResult<Option<EventRow>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, title, event_date, event_time, location, description
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create(&self, row: &NewEventRow) -> StoreResult<EventRow> {
        let stored = sqlx::query_as::<_, EventRow>(
            r#"
            INSERT INTO events (title, event_date, event_time, location, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, event_date, event_time, location, description
            "#,
        )
        .bind(&row.title)
        .bind(row.date)
        .bind(row.time)
        .bind(&row.location)
        .bind(&row.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    async fn update(&self, id: i32, row: &NewEventRow) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE events
            SET title = $2, event_date = $3, event_time = $4, location = $5, description = $6
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&row.title)
        .bind(row.date)
        .bind(row.time)
        .bind(&row.location)
        .bind(&row.description)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i32) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// sqlx::FromRow for EventRow
// ---------------------------------------------------------------------------

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for EventRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> std::result::Result<Self, sqlx::Error> {
        use sqlx::Row;
        Ok(EventRow {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            date: row.try_get("event_date")?,
            time: row.try_get("event_time")?,
            location: row.try_get("location")?,
            description: row.try_get("description")?,
        })
    }
}
