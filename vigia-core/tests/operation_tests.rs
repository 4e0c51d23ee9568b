// File: vigia-core/tests/operation_tests.rs

mod helpers;

use chrono::Utc;
use helpers::{harness, msg, seed_active_user};
use vigia_common::models::entry::EntryType;
use vigia_common::models::user::UserState;
use vigia_common::traits::repository_traits::UserRepository;

#[tokio::test]
async fn despesa_appends_expense_dated_today() {
    let h = harness();
    let (_, company) = seed_active_user(&h, 100).await;

    h.service.process_incoming(msg(100, "despesa 500")).await.unwrap();

    let entries = h.entries.all().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].company_id, company.company_id);
    assert_eq!(entries[0].entry_type, EntryType::Expense);
    assert_eq!(entries[0].amount, 500.0);
    assert_eq!(entries[0].entry_date, Utc::now().date_naive());

    let sent = h.transport.sent().await;
    assert!(sent.last().unwrap().text.contains("R$ 500,00"));
}

#[tokio::test]
async fn entrada_accepts_comma_decimal() {
    let h = harness();
    seed_active_user(&h, 100).await;

    h.service.process_incoming(msg(100, "/entrada 1.234,56")).await.unwrap();

    let entries = h.entries.all().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].entry_type, EntryType::Revenue);
    assert_eq!(entries[0].amount, 1234.56);
}

#[tokio::test]
async fn missing_argument_yields_usage_hint() {
    let h = harness();
    seed_active_user(&h, 100).await;

    h.service.process_incoming(msg(100, "/entrada")).await.unwrap();

    assert!(h.entries.all().await.is_empty());
    let sent = h.transport.sent().await;
    assert!(sent.last().unwrap().text.contains("Uso: /entrada <valor>"));
}

#[tokio::test]
async fn non_positive_argument_yields_usage_hint() {
    let h = harness();
    seed_active_user(&h, 100).await;

    h.service.process_incoming(msg(100, "saida -300")).await.unwrap();
    h.service.process_incoming(msg(100, "saida 0")).await.unwrap();

    assert!(h.entries.all().await.is_empty());
    let sent = h.transport.sent().await;
    assert!(sent.iter().all(|s| s.text.contains("Uso: /saida <valor>")));
}

#[tokio::test]
async fn commands_are_case_insensitive() {
    let h = harness();
    seed_active_user(&h, 100).await;

    h.service.process_incoming(msg(100, "DESPESA 500")).await.unwrap();

    let entries = h.entries.all().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].entry_type, EntryType::Expense);
}

#[tokio::test]
async fn status_reports_ledger_derived_metrics() {
    let h = harness();
    let (_, _company) = seed_active_user(&h, 100).await;

    h.service.process_incoming(msg(100, "entrada 10000")).await.unwrap();
    h.service.process_incoming(msg(100, "saida 1000")).await.unwrap();
    h.service.process_incoming(msg(100, "/status")).await.unwrap();

    let sent = h.transport.sent().await;
    let status = sent.last().unwrap();
    assert!(status.markdown);
    assert!(status.text.contains("Padaria do João"));
    // cash 9000, entry-driven burn 1000 => 9 months of runway
    assert!(status.text.contains("R$ 9.000,00"));
    assert!(status.text.contains("R$ 1.000,00/mês"));
    assert!(status.text.contains("9.0 meses"));
}

#[tokio::test]
async fn status_with_empty_ledger_shows_infinite_runway() {
    let h = harness();
    seed_active_user(&h, 100).await;

    h.service.process_incoming(msg(100, "status")).await.unwrap();

    let sent = h.transport.sent().await;
    assert!(sent.last().unwrap().text.contains("∞ meses"));
}

#[tokio::test]
async fn unknown_command_falls_back_to_help() {
    let h = harness();
    seed_active_user(&h, 100).await;

    h.service.process_incoming(msg(100, "quanto tenho?")).await.unwrap();

    let sent = h.transport.sent().await;
    assert!(sent.last().unwrap().text.contains("Comandos disponíveis"));
}

#[tokio::test]
async fn paused_user_gets_suspended_notice_only() {
    let h = harness();
    let (user, _) = seed_active_user(&h, 100).await;
    h.users
        .update_state(user.user_id, UserState::Paused, 4)
        .await
        .unwrap();

    h.service.process_incoming(msg(100, "entrada 500")).await.unwrap();

    assert!(h.entries.all().await.is_empty());
    let sent = h.transport.sent().await;
    assert!(sent.last().unwrap().text.contains("suspensa"));
}

#[tokio::test]
async fn blocked_user_gets_cancelled_notice_only() {
    let h = harness();
    let (user, _) = seed_active_user(&h, 100).await;
    h.users
        .update_state(user.user_id, UserState::Blocked, 4)
        .await
        .unwrap();

    h.service.process_incoming(msg(100, "status")).await.unwrap();

    let sent = h.transport.sent().await;
    assert!(sent.last().unwrap().text.contains("cancelada"));
}
