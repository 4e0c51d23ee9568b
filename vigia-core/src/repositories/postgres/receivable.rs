// src/repositories/postgres/receivable.rs

use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use vigia_common::traits::repository_traits::ReceivableRepository;

use crate::db::Database;
use crate::Error;

pub struct PostgresReceivableRepository {
    pool: Pool<Postgres>,
}

impl PostgresReceivableRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }
}

#[async_trait::async_trait]
impl ReceivableRepository for PostgresReceivableRepository {
    async fn outstanding_total(&self, company_id: Uuid) -> Result<f64, Error> {
        let row = sqlx::query(
            r#"
            SELECT COALESCE(SUM(amount), 0)::DOUBLE PRECISION AS total
            FROM receivables
            WHERE company_id = $1 AND status IN ('pending', 'overdue')
            "#,
        )
        .bind(company_id)
        .fetch_one(&self.pool)
        .await?;
        let total: f64 = row.try_get("total")?;
        Ok(total)
    }
}
