// src/repositories/postgres/company.rs

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, Row};
use tracing::warn;
use uuid::Uuid;

use vigia_common::models::company::{Company, CompanyStatus};
use vigia_common::traits::repository_traits::CompanyRepository;

use crate::db::Database;
use crate::Error;

pub struct PostgresCompanyRepository {
    pool: Pool<Postgres>,
    service_pool: Pool<Postgres>,
}

impl PostgresCompanyRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
            service_pool: db.service_pool().clone(),
        }
    }
}

fn row_to_company(r: &sqlx::postgres::PgRow) -> Result<Company, Error> {
    let company_id: Uuid = r.try_get("company_id")?;
    let status_raw: String = r.try_get("status")?;
    let status = status_raw.parse().unwrap_or_else(|_| {
        warn!("Company {} has unknown status '{}'; treating as trial", company_id, status_raw);
        CompanyStatus::Trial
    });
    Ok(Company {
        company_id,
        name: r.try_get("name")?,
        fixed_cost_avg: r.try_get("fixed_cost_avg")?,
        variable_cost_percent: r.try_get("variable_cost_percent")?,
        cash_minimum: r.try_get("cash_minimum")?,
        alert_days_threshold: r.try_get("alert_days_threshold")?,
        status,
        plan: r.try_get("plan")?,
        chat_id: r.try_get("chat_id")?,
        last_report_sent_at: r.try_get::<Option<DateTime<Utc>>, _>("last_report_sent_at")?,
        created_at: r.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: r.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}

const COMPANY_COLUMNS: &str = r#"
    company_id, name, fixed_cost_avg, variable_cost_percent, cash_minimum,
    alert_days_threshold, status, plan, chat_id, last_report_sent_at,
    created_at, updated_at
"#;

#[async_trait::async_trait]
impl CompanyRepository for PostgresCompanyRepository {
    async fn create(&self, company: &Company) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO companies (
                company_id, name, fixed_cost_avg, variable_cost_percent,
                cash_minimum, alert_days_threshold, status, plan, chat_id,
                last_report_sent_at, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(company.company_id)
        .bind(&company.name)
        .bind(company.fixed_cost_avg)
        .bind(company.variable_cost_percent)
        .bind(company.cash_minimum)
        .bind(company.alert_days_threshold)
        .bind(company.status.to_string())
        .bind(&company.plan)
        .bind(company.chat_id)
        .bind(company.last_report_sent_at)
        .bind(company.created_at)
        .bind(company.updated_at)
        .execute(&self.service_pool)
        .await?;
        Ok(())
    }

    async fn get(&self, company_id: Uuid) -> Result<Option<Company>, Error> {
        let sql = format!("SELECT {} FROM companies WHERE company_id = $1", COMPANY_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(company_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(r) => Ok(Some(row_to_company(&r)?)),
            None => Ok(None),
        }
    }

    async fn set_fixed_cost(&self, company_id: Uuid, fixed_cost_avg: f64) -> Result<(), Error> {
        sqlx::query(
            "UPDATE companies SET fixed_cost_avg = $1, updated_at = $2 WHERE company_id = $3",
        )
        .bind(fixed_cost_avg)
        .bind(Utc::now())
        .bind(company_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn set_variable_percent(
        &self,
        company_id: Uuid,
        variable_cost_percent: f64,
    ) -> Result<(), Error> {
        sqlx::query(
            "UPDATE companies SET variable_cost_percent = $1, updated_at = $2 WHERE company_id = $3",
        )
        .bind(variable_cost_percent)
        .bind(Utc::now())
        .bind(company_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn set_cash_minimum(&self, company_id: Uuid, cash_minimum: f64) -> Result<(), Error> {
        sqlx::query(
            "UPDATE companies SET cash_minimum = $1, updated_at = $2 WHERE company_id = $3",
        )
        .bind(cash_minimum)
        .bind(Utc::now())
        .bind(company_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_active(&self) -> Result<Vec<Company>, Error> {
        let sql = format!("SELECT {} FROM companies WHERE status = 'active'", COMPANY_COLUMNS);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        let mut companies = Vec::with_capacity(rows.len());
        for r in &rows {
            companies.push(row_to_company(r)?);
        }
        Ok(companies)
    }

    async fn mark_report_sent(&self, company_id: Uuid, at: DateTime<Utc>) -> Result<(), Error> {
        sqlx::query(
            "UPDATE companies SET last_report_sent_at = $1, updated_at = $1 WHERE company_id = $2",
        )
        .bind(at)
        .bind(company_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
