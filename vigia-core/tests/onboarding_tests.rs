// File: vigia-core/tests/onboarding_tests.rs

mod helpers;

use helpers::{harness, msg};
use vigia_common::models::user::{User, UserState};
use vigia_common::traits::repository_traits::{CompanyRepository, UserRepository};

#[tokio::test]
async fn start_from_unknown_chat_creates_stub_pair() {
    let h = harness();

    h.service.process_incoming(msg(100, "/start")).await.unwrap();

    let user = h.users.get_by_chat_id(100).await.unwrap().unwrap();
    assert_eq!(user.state, UserState::Onboarding);
    assert_eq!(user.onboarding_step, 1);

    let company = h.companies.get(user.company_id).await.unwrap().unwrap();
    assert_eq!(company.fixed_cost_avg, 0.0);
    assert_eq!(company.variable_cost_percent, 30.0);
    assert_eq!(company.cash_minimum, 5000.0);
    assert_eq!(company.chat_id, Some(100));

    let sent = h.transport.sent().await;
    assert!(sent.iter().any(|s| s.text.contains("custo fixo")));
}

#[tokio::test]
async fn message_without_start_gets_welcome_and_no_transition() {
    let h = harness();

    h.service.process_incoming(msg(100, "oi")).await.unwrap();

    let user = h.users.get_by_chat_id(100).await.unwrap().unwrap();
    assert_eq!(user.state, UserState::New);
    assert_eq!(user.onboarding_step, 0);

    let sent = h.transport.sent().await;
    assert_eq!(sent.len(), 1);
    assert!(sent[0].text.contains("/start"));
}

#[tokio::test]
async fn valid_fixed_cost_advances_to_step_two() {
    let h = harness();
    h.service.process_incoming(msg(100, "/start")).await.unwrap();

    h.service.process_incoming(msg(100, "5000")).await.unwrap();

    let user = h.users.get_by_chat_id(100).await.unwrap().unwrap();
    assert_eq!(user.onboarding_step, 2);
    let company = h.companies.get(user.company_id).await.unwrap().unwrap();
    assert_eq!(company.fixed_cost_avg, 5000.0);
}

#[tokio::test]
async fn replayed_step_one_answer_does_not_regress_the_step() {
    let h = harness();
    h.service.process_incoming(msg(100, "/start")).await.unwrap();
    h.service.process_incoming(msg(100, "5000")).await.unwrap();

    // The same answer again, after the step-2 prompt was issued. 5000
    // is out of range for a percentage, so nothing is written and the
    // step stays where it was.
    h.service.process_incoming(msg(100, "5000")).await.unwrap();

    let user = h.users.get_by_chat_id(100).await.unwrap().unwrap();
    assert_eq!(user.onboarding_step, 2);
    let company = h.companies.get(user.company_id).await.unwrap().unwrap();
    assert_eq!(company.fixed_cost_avg, 5000.0);
    assert_eq!(company.variable_cost_percent, 30.0);
}

#[tokio::test]
async fn non_numeric_answer_reprompts_same_step() {
    let h = harness();
    h.service.process_incoming(msg(100, "/start")).await.unwrap();

    h.service.process_incoming(msg(100, "muito caro")).await.unwrap();

    let user = h.users.get_by_chat_id(100).await.unwrap().unwrap();
    assert_eq!(user.onboarding_step, 1);

    let sent = h.transport.sent().await;
    let last_two = &sent[sent.len() - 2..];
    assert!(last_two[0].text.contains("Não entendi"));
    assert!(last_two[1].text.contains("custo fixo"));
}

#[tokio::test]
async fn zero_fixed_cost_is_rejected() {
    let h = harness();
    h.service.process_incoming(msg(100, "/start")).await.unwrap();

    h.service.process_incoming(msg(100, "0")).await.unwrap();

    let user = h.users.get_by_chat_id(100).await.unwrap().unwrap();
    assert_eq!(user.onboarding_step, 1);
    let company = h.companies.get(user.company_id).await.unwrap().unwrap();
    assert_eq!(company.fixed_cost_avg, 0.0);
}

#[tokio::test]
async fn percent_out_of_range_is_rejected() {
    let h = harness();
    h.service.process_incoming(msg(100, "/start")).await.unwrap();
    h.service.process_incoming(msg(100, "5000")).await.unwrap();

    h.service.process_incoming(msg(100, "120")).await.unwrap();

    let user = h.users.get_by_chat_id(100).await.unwrap().unwrap();
    assert_eq!(user.onboarding_step, 2);
    let company = h.companies.get(user.company_id).await.unwrap().unwrap();
    assert_eq!(company.variable_cost_percent, 30.0);
}

#[tokio::test]
async fn full_flow_ends_active_with_cleared_action() {
    let h = harness();
    h.service.process_incoming(msg(100, "/start")).await.unwrap();
    h.service.process_incoming(msg(100, "5000")).await.unwrap();
    h.service.process_incoming(msg(100, "25")).await.unwrap();
    h.service.process_incoming(msg(100, "R$ 10.000,00")).await.unwrap();

    let user = h.users.get_by_chat_id(100).await.unwrap().unwrap();
    assert_eq!(user.state, UserState::Active);
    assert_eq!(user.onboarding_step, 4);
    assert_eq!(user.current_action, None);

    let company = h.companies.get(user.company_id).await.unwrap().unwrap();
    assert_eq!(company.fixed_cost_avg, 5000.0);
    assert_eq!(company.variable_cost_percent, 25.0);
    assert_eq!(company.cash_minimum, 10000.0);

    let sent = h.transport.sent().await;
    assert!(sent.last().unwrap().text.contains("Cadastro concluído"));
}

#[tokio::test]
async fn command_during_onboarding_redisplays_question() {
    let h = harness();
    h.service.process_incoming(msg(100, "/start")).await.unwrap();

    h.service.process_incoming(msg(100, "/ajuda")).await.unwrap();

    let user = h.users.get_by_chat_id(100).await.unwrap().unwrap();
    assert_eq!(user.onboarding_step, 1);
    let sent = h.transport.sent().await;
    assert!(sent.last().unwrap().text.contains("custo fixo"));
}

#[tokio::test]
async fn corrupt_step_counter_is_rederived_from_unanswered_fields() {
    let h = harness();
    // A row with a counter far outside [1,4]; its fixed cost is still
    // the unanswered default, so the effective step is 1.
    let company = vigia_common::models::company::Company::with_defaults("Empresa", 200);
    h.companies.insert_existing(company.clone()).await;
    let mut user = User::first_contact(200, Some(200), Some("Ana"), None, None, company.company_id);
    user.state = UserState::Onboarding;
    user.onboarding_step = 9;
    h.users.create(&user).await.unwrap();

    h.service.process_incoming(msg(200, "4000")).await.unwrap();

    let company = h.companies.get(company.company_id).await.unwrap().unwrap();
    assert_eq!(company.fixed_cost_avg, 4000.0);
}

#[tokio::test]
async fn failed_secondary_create_is_retry_safe() {
    let h = harness();
    h.users.fail_next_create();

    // Without a user row there is nothing to converse with, so the
    // failure also surfaces to the delivery layer.
    let result = h.service.process_incoming(msg(300, "/start")).await;
    assert!(result.is_err());

    // Nothing visible otherwise: the user row was never written.
    assert_eq!(h.users.count().await, 0);
    let sent = h.transport.sent().await;
    assert!(sent.last().unwrap().text.contains("erro técnico"));

    // The next message simply re-attempts lookup-or-create.
    h.service.process_incoming(msg(300, "/start")).await.unwrap();
    let user = h.users.get_by_chat_id(300).await.unwrap().unwrap();
    assert_eq!(user.state, UserState::Onboarding);
    assert_eq!(user.onboarding_step, 1);
}
