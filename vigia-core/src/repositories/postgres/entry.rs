// src/repositories/postgres/entry.rs

use chrono::NaiveDate;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use vigia_common::models::entry::Entry;
use vigia_common::traits::repository_traits::EntryRepository;

use crate::db::Database;
use crate::Error;

pub struct PostgresEntryRepository {
    pool: Pool<Postgres>,
    service_pool: Pool<Postgres>,
}

impl PostgresEntryRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
            service_pool: db.service_pool().clone(),
        }
    }

    async fn sum(&self, sql: &str, binds: (Uuid, Option<NaiveDate>)) -> Result<f64, Error> {
        let mut query = sqlx::query(sql).bind(binds.0);
        if let Some(date) = binds.1 {
            query = query.bind(date);
        }
        let row = query.fetch_one(&self.pool).await?;
        // COALESCE keeps an empty ledger at 0 rather than NULL.
        let total: f64 = row.try_get("total")?;
        Ok(total)
    }
}

#[async_trait::async_trait]
impl EntryRepository for PostgresEntryRepository {
    async fn insert(&self, entry: &Entry) -> Result<(), Error> {
        if !(entry.amount.is_finite() && entry.amount > 0.0) {
            return Err(Error::Parse(format!(
                "entry amount must be positive and finite, got {}",
                entry.amount
            )));
        }
        sqlx::query(
            r#"
            INSERT INTO entries (
                entry_id, company_id, user_id, entry_type, amount,
                description, entry_date, source, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(entry.entry_id)
        .bind(entry.company_id)
        .bind(entry.user_id)
        .bind(entry.entry_type.to_string())
        .bind(entry.amount)
        .bind(&entry.description)
        .bind(entry.entry_date)
        .bind(entry.source.to_string())
        .bind(entry.created_at)
        .execute(&self.service_pool)
        .await?;
        Ok(())
    }

    async fn sum_expenses_since(&self, company_id: Uuid, since: NaiveDate) -> Result<f64, Error> {
        self.sum(
            r#"
            SELECT COALESCE(SUM(amount), 0)::DOUBLE PRECISION AS total
            FROM entries
            WHERE company_id = $1 AND entry_type = 'expense' AND entry_date >= $2
            "#,
            (company_id, Some(since)),
        )
        .await
    }

    async fn revenue_on(&self, company_id: Uuid, on: NaiveDate) -> Result<f64, Error> {
        self.sum(
            r#"
            SELECT COALESCE(SUM(amount), 0)::DOUBLE PRECISION AS total
            FROM entries
            WHERE company_id = $1 AND entry_type IN ('revenue', 'income') AND entry_date = $2
            "#,
            (company_id, Some(on)),
        )
        .await
    }

    async fn revenue_since(&self, company_id: Uuid, since: NaiveDate) -> Result<f64, Error> {
        self.sum(
            r#"
            SELECT COALESCE(SUM(amount), 0)::DOUBLE PRECISION AS total
            FROM entries
            WHERE company_id = $1 AND entry_type IN ('revenue', 'income') AND entry_date >= $2
            "#,
            (company_id, Some(since)),
        )
        .await
    }

    async fn cash_balance(&self, company_id: Uuid) -> Result<f64, Error> {
        self.sum(
            r#"
            SELECT COALESCE(SUM(
                CASE WHEN entry_type = 'expense' THEN -amount ELSE amount END
            ), 0)::DOUBLE PRECISION AS total
            FROM entries
            WHERE company_id = $1
            "#,
            (company_id, None),
        )
        .await
    }
}
