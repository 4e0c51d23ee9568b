// src/repositories/postgres/user.rs

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, Row};
use tracing::warn;
use uuid::Uuid;

use vigia_common::models::user::{User, UserState};
use vigia_common::traits::repository_traits::UserRepository;

use crate::db::Database;
use crate::Error;

pub struct PostgresUserRepository {
    pool: Pool<Postgres>,
    service_pool: Pool<Postgres>,
}

impl PostgresUserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
            service_pool: db.service_pool().clone(),
        }
    }
}

/// Stored state values outside the enumeration are normalized here,
/// at row-decode time, so handlers only ever see valid states.
fn decode_state(user_id: Uuid, raw: &str) -> UserState {
    raw.parse().unwrap_or_else(|_| {
        warn!("User {} has unknown state '{}'; treating as onboarding", user_id, raw);
        UserState::Onboarding
    })
}

fn row_to_user(r: &sqlx::postgres::PgRow) -> Result<User, Error> {
    let user_id: Uuid = r.try_get("user_id")?;
    let state_raw: String = r.try_get("state")?;
    Ok(User {
        user_id,
        chat_id: r.try_get("chat_id")?,
        telegram_id: r.try_get("telegram_id")?,
        first_name: r.try_get("first_name")?,
        last_name: r.try_get("last_name")?,
        username: r.try_get("username")?,
        state: decode_state(user_id, &state_raw),
        onboarding_step: r.try_get("onboarding_step")?,
        current_action: r.try_get("current_action")?,
        company_id: r.try_get("company_id")?,
        last_interaction_at: r.try_get::<Option<DateTime<Utc>>, _>("last_interaction_at")?,
        created_at: r.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: r.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}

#[async_trait::async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: &User) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id, chat_id, telegram_id, first_name, last_name, username,
                state, onboarding_step, current_action, company_id,
                last_interaction_at, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(user.user_id)
        .bind(user.chat_id)
        .bind(user.telegram_id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.username)
        .bind(user.state.to_string())
        .bind(user.onboarding_step)
        .bind(&user.current_action)
        .bind(user.company_id)
        .bind(user.last_interaction_at)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.service_pool)
        .await?;
        Ok(())
    }

    async fn get_by_chat_id(&self, chat_id: i64) -> Result<Option<User>, Error> {
        let row = sqlx::query(
            r#"
            SELECT user_id, chat_id, telegram_id, first_name, last_name, username,
                   state, onboarding_step, current_action, company_id,
                   last_interaction_at, created_at, updated_at
            FROM users
            WHERE chat_id = $1
            "#,
        )
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(row_to_user(&r)?)),
            None => Ok(None),
        }
    }

    async fn update_state(
        &self,
        user_id: Uuid,
        state: UserState,
        onboarding_step: i32,
    ) -> Result<(), Error> {
        // GREATEST keeps the stored step monotonic even on replays.
        sqlx::query(
            r#"
            UPDATE users
            SET state = $1,
                onboarding_step = GREATEST(onboarding_step, $2),
                updated_at = $3
            WHERE user_id = $4
            "#,
        )
        .bind(state.to_string())
        .bind(onboarding_step)
        .bind(Utc::now())
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn clear_current_action(&self, user_id: Uuid) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE users
            SET current_action = NULL, updated_at = $1
            WHERE user_id = $2
            "#,
        )
        .bind(Utc::now())
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn touch_last_interaction(&self, user_id: Uuid) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE users
            SET last_interaction_at = $1, updated_at = $1
            WHERE user_id = $2
            "#,
        )
        .bind(Utc::now())
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
