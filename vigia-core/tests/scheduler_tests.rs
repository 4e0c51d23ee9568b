// File: vigia-core/tests/scheduler_tests.rs

mod helpers;

use std::sync::Arc;
use chrono::{Duration, Utc};
use helpers::{harness, seed_active_company, Harness};
use uuid::Uuid;

use vigia_common::models::entry::{Entry, EntryType};
use vigia_common::traits::repository_traits::CompanyRepository;
use vigia_core::tasks::{ReportConfig, ReportScheduler};

fn scheduler(h: &Harness) -> Arc<ReportScheduler> {
    // UTC keeps the seeded entry dates and the duplicate-day check on
    // the same calendar as Utc::now(), whatever the wall clock says.
    Arc::new(ReportScheduler::new(
        h.companies.clone(),
        h.entries.clone(),
        h.receivables.clone(),
        h.transport.clone(),
        ReportConfig {
            timezone: chrono_tz::UTC,
            ..ReportConfig::default()
        },
    ))
}

async fn seed_revenue(h: &Harness, company_id: Uuid, days_ago: i64, amount: f64) {
    let date = Utc::now().date_naive() - Duration::days(days_ago);
    h.entries
        .insert_existing(Entry {
            entry_id: Uuid::new_v4(),
            company_id,
            user_id: None,
            entry_type: EntryType::Revenue,
            amount,
            description: None,
            entry_date: date,
            source: vigia_common::models::entry::EntrySource::Automated,
            created_at: Utc::now(),
        })
        .await;
}

#[tokio::test]
async fn one_failing_company_does_not_abort_the_rest() {
    let h = harness();
    let c1 = seed_active_company(&h, "Primeira", Some(1)).await;
    let c2 = seed_active_company(&h, "Segunda", Some(2)).await;
    let c3 = seed_active_company(&h, "Terceira", Some(3)).await;
    h.transport.fail_for_chat(2).await;

    let result = scheduler(&h)
        .send_daily_reports(Utc::now().date_naive())
        .await;

    // The per-company failure never propagates out of the job.
    assert!(result.is_ok());

    let sent = h.transport.sent().await;
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].chat_id, 1);
    assert_eq!(sent[1].chat_id, 3);

    let c1 = h.companies.get(c1.company_id).await.unwrap().unwrap();
    let c2 = h.companies.get(c2.company_id).await.unwrap().unwrap();
    let c3 = h.companies.get(c3.company_id).await.unwrap().unwrap();
    assert!(c1.last_report_sent_at.is_some());
    assert!(c2.last_report_sent_at.is_none());
    assert!(c3.last_report_sent_at.is_some());
}

#[tokio::test]
async fn company_already_reported_today_is_skipped() {
    let h = harness();
    let company = seed_active_company(&h, "Empresa", Some(1)).await;
    h.companies
        .mark_report_sent(company.company_id, Utc::now())
        .await
        .unwrap();

    scheduler(&h)
        .send_daily_reports(Utc::now().date_naive())
        .await
        .unwrap();

    assert!(h.transport.sent().await.is_empty());
}

#[tokio::test]
async fn company_without_chat_destination_is_skipped() {
    let h = harness();
    seed_active_company(&h, "Sem Chat", None).await;

    scheduler(&h)
        .send_daily_reports(Utc::now().date_naive())
        .await
        .unwrap();

    assert!(h.transport.sent().await.is_empty());
}

#[tokio::test]
async fn trial_companies_are_not_reported() {
    let h = harness();
    let company = vigia_common::models::company::Company::with_defaults("Trial", 1);
    h.companies.insert_existing(company).await;

    scheduler(&h)
        .send_daily_reports(Utc::now().date_naive())
        .await
        .unwrap();

    assert!(h.transport.sent().await.is_empty());
}

#[tokio::test]
async fn zero_revenue_company_gets_the_no_revenue_branch() {
    let h = harness();
    seed_active_company(&h, "Parada", Some(1)).await;

    scheduler(&h)
        .send_daily_reports(Utc::now().date_naive())
        .await
        .unwrap();

    let sent = h.transport.sent().await;
    assert_eq!(sent.len(), 1);
    assert!(sent[0].markdown);
    assert!(sent[0].text.contains("Sem faturamento registrado"));
    assert!(!sent[0].text.contains("Variação"));
    // fixed_cost 3000 with zero cash: already critical
    assert!(sent[0].text.contains("🔴 Status: CRÍTICO"));
}

#[tokio::test]
async fn report_combines_revenue_cash_and_overdue() {
    let h = harness();
    let company = seed_active_company(&h, "Padaria", Some(1)).await;

    // 700 per day over the whole window: average equals yesterday.
    for days_ago in 0..7 {
        seed_revenue(&h, company.company_id, days_ago, 700.0).await;
    }
    h.receivables.set_outstanding(company.company_id, 2500.0).await;

    scheduler(&h)
        .send_daily_reports(Utc::now().date_naive())
        .await
        .unwrap();

    let sent = h.transport.sent().await;
    assert_eq!(sent.len(), 1);
    let text = &sent[0].text;
    assert!(text.contains("📊 *Relatório Diário - Padaria*"));
    assert!(text.contains("Ontem: R$ 700,00"));
    assert!(text.contains("Média (7d): R$ 700,00"));
    assert!(text.contains("➡️ Variação: +0.0%"));
    // cash = 7 * 700
    assert!(text.contains("💰 *Caixa Atual:* R$ 4.900,00"));
    assert!(text.contains("⚠️ *Clientes em Atraso:* R$ 2.500,00"));
}
