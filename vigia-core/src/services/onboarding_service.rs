// File: vigia-core/src/services/onboarding_service.rs

use std::sync::Arc;
use tracing::{info, warn};

use vigia_common::models::company::Company;
use vigia_common::models::user::{User, UserState};
use vigia_common::traits::repository_traits::{CompanyRepository, UserRepository};

use super::Reply;
use crate::formatters::texts;
use crate::utils::numbers::parse_money;
use crate::Error;

/// Guided setup: three numeric questions (fixed cost, variable cost
/// percentage, cash minimum) before the account goes active.
///
/// Validation rules are the strict set: `fixed_cost > 0`,
/// `0 <= pct <= 100`, `cash_minimum >= 0`.
pub struct OnboardingService {
    users: Arc<dyn UserRepository>,
    companies: Arc<dyn CompanyRepository>,
}

impl OnboardingService {
    pub fn new(users: Arc<dyn UserRepository>, companies: Arc<dyn CompanyRepository>) -> Self {
        Self { users, companies }
    }

    /// Starts the flow for a `new` user who sent the start command.
    pub async fn begin(&self, user: &User) -> Result<Vec<Reply>, Error> {
        self.users
            .update_state(user.user_id, UserState::Onboarding, 1)
            .await?;
        Ok(vec![
            Reply::plain(texts::onboarding_intro()),
            Reply::plain(texts::onboarding_question(1)),
        ])
    }

    pub async fn handle(
        &self,
        user: &User,
        company: &Company,
        text: &str,
    ) -> Result<Vec<Reply>, Error> {
        let step = self.effective_step(user, company);

        if step >= 4 {
            // Counter says every answer was collected but the state
            // never flipped; finish the transition now.
            self.users
                .update_state(user.user_id, UserState::Active, 4)
                .await?;
            self.users.clear_current_action(user.user_id).await?;
            return Ok(vec![Reply::plain(texts::onboarding_complete())]);
        }

        let trimmed = text.trim();
        // Empty input or a command is a request to see the current
        // question again, not an answer.
        if trimmed.is_empty() || trimmed.starts_with('/') {
            return Ok(vec![Reply::plain(texts::onboarding_question(step))]);
        }

        let value = match parse_money(trimmed) {
            Ok(v) => v,
            Err(_) => {
                return Ok(vec![
                    Reply::plain(texts::invalid_number()),
                    Reply::plain(texts::onboarding_question(step)),
                ]);
            }
        };

        match step {
            1 => {
                if value <= 0.0 {
                    return Ok(vec![
                        Reply::plain(texts::invalid_fixed_cost()),
                        Reply::plain(texts::onboarding_question(1)),
                    ]);
                }
                self.companies.set_fixed_cost(company.company_id, value).await?;
                self.users
                    .update_state(user.user_id, UserState::Onboarding, 2)
                    .await?;
                Ok(vec![Reply::plain(texts::onboarding_question(2))])
            }
            2 => {
                if !(0.0..=100.0).contains(&value) {
                    return Ok(vec![
                        Reply::plain(texts::invalid_percent()),
                        Reply::plain(texts::onboarding_question(2)),
                    ]);
                }
                self.companies
                    .set_variable_percent(company.company_id, value)
                    .await?;
                self.users
                    .update_state(user.user_id, UserState::Onboarding, 3)
                    .await?;
                Ok(vec![Reply::plain(texts::onboarding_question(3))])
            }
            _ => {
                if value < 0.0 {
                    return Ok(vec![
                        Reply::plain(texts::invalid_cash_minimum()),
                        Reply::plain(texts::onboarding_question(3)),
                    ]);
                }
                self.companies
                    .set_cash_minimum(company.company_id, value)
                    .await?;
                self.users
                    .update_state(user.user_id, UserState::Active, 4)
                    .await?;
                self.users.clear_current_action(user.user_id).await?;
                info!("User {} finished onboarding", user.user_id);
                Ok(vec![Reply::plain(texts::onboarding_complete())])
            }
        }
    }

    /// The stored counter is trusted inside [1,4]; anything else is
    /// re-derived from the first unanswered field. Only the fixed cost
    /// has a detectable unanswered value (0 is invalid), so a corrupt
    /// counter lands on step 1 or step 2. Combined with monotonic step
    /// writes this makes replayed answers idempotent.
    fn effective_step(&self, user: &User, company: &Company) -> i32 {
        if (1..=4).contains(&user.onboarding_step) {
            return user.onboarding_step;
        }
        warn!(
            "User {} has onboarding_step {} outside [1,4]; re-deriving",
            user.user_id, user.onboarding_step
        );
        if company.fixed_cost_avg <= 0.0 {
            1
        } else {
            2
        }
    }
}
