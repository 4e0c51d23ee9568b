// File: vigia-core/src/services/user_service.rs

use std::sync::Arc;
use tracing::info;

use vigia_common::models::company::Company;
use vigia_common::models::user::User;
use vigia_common::traits::repository_traits::{CompanyRepository, UserRepository};

use crate::Error;

/// Lookup-or-create of the User+Company pair for an inbound chat id.
pub struct UserService {
    users: Arc<dyn UserRepository>,
    companies: Arc<dyn CompanyRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, companies: Arc<dyn CompanyRepository>) -> Self {
        Self { users, companies }
    }

    /// Returns the user for `chat_id`, creating the Company stub and
    /// the User stub on first contact. The company is written first;
    /// if the user insert then fails, the orphan company row is
    /// unreachable and the next inbound message simply re-attempts the
    /// whole lookup-or-create.
    pub async fn get_or_create(
        &self,
        chat_id: i64,
        telegram_id: Option<i64>,
        first_name: Option<&str>,
        last_name: Option<&str>,
        username: Option<&str>,
    ) -> Result<User, Error> {
        if let Some(user) = self.users.get_by_chat_id(chat_id).await? {
            return Ok(user);
        }

        let company_name = match first_name {
            Some(first) => format!("Empresa de {}", first),
            None => "Minha Empresa".to_string(),
        };
        let company = Company::with_defaults(&company_name, chat_id);
        self.companies.create(&company).await?;

        let user = User::first_contact(
            chat_id,
            telegram_id,
            first_name,
            last_name,
            username,
            company.company_id,
        );
        self.users.create(&user).await?;

        info!(
            "Created user {} and company {} for chat {}",
            user.user_id, company.company_id, chat_id
        );
        Ok(user)
    }
}
