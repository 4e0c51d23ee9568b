// File: vigia-common/src/models/user.rs

use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Conversation lifecycle of a chat user. Stored as lowercase text.
///
/// `paused` and `blocked` are reachable only through administrative
/// action; the conversation core never writes them.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UserState {
    New,
    Onboarding,
    Active,
    Paused,
    Blocked,
}

impl fmt::Display for UserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserState::New => write!(f, "new"),
            UserState::Onboarding => write!(f, "onboarding"),
            UserState::Active => write!(f, "active"),
            UserState::Paused => write!(f, "paused"),
            UserState::Blocked => write!(f, "blocked"),
        }
    }
}

impl FromStr for UserState {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(UserState::New),
            "onboarding" => Ok(UserState::Onboarding),
            "active" => Ok(UserState::Active),
            // Legacy alias carried by older rows.
            "operation" => Ok(UserState::Active),
            "paused" => Ok(UserState::Paused),
            "blocked" => Ok(UserState::Blocked),
            _ => Err(format!("Unknown user state: {}", s)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    pub user_id: Uuid,
    pub chat_id: i64,
    pub telegram_id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub state: UserState,
    /// 0 = onboarding not started, 4 = all answers collected.
    pub onboarding_step: i32,
    pub current_action: Option<String>,
    pub company_id: Uuid,
    pub last_interaction_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Stub created on first contact from an unknown chat id.
    pub fn first_contact(
        chat_id: i64,
        telegram_id: Option<i64>,
        first_name: Option<&str>,
        last_name: Option<&str>,
        username: Option<&str>,
        company_id: Uuid,
    ) -> Self {
        let now = Utc::now();
        Self {
            user_id: Uuid::new_v4(),
            chat_id,
            telegram_id,
            first_name: first_name.map(String::from),
            last_name: last_name.map(String::from),
            username: username.map(String::from),
            state: UserState::New,
            onboarding_step: 0,
            current_action: None,
            company_id,
            last_interaction_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn display_name(&self) -> String {
        if let Some(first) = &self.first_name {
            first.clone()
        } else if let Some(username) = &self.username {
            username.clone()
        } else {
            self.chat_id.to_string()
        }
    }
}
