// File: vigia-core/src/formatters/mod.rs
//
// Chat-ready text rendering. Pure functions of their inputs; the daily
// report and currency strings are compatibility-sensitive and tested
// for literal equality.

pub mod texts;

use crate::metrics::AlertLevel;

/// Brazilian currency rendering: thousands separator `.`, decimal
/// separator `,`, always two decimals. `format_currency(1000.5)` is
/// `"R$ 1.000,50"`.
pub fn format_currency(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("R$ {}{},{:02}", sign, grouped, frac)
}

/// Days-of-cash rendering. Anything from 999 days up (including the
/// infinite-runway sentinel) collapses to `∞`.
pub fn format_days(days: f64) -> String {
    if days >= 999.0 {
        return "∞".to_string();
    }
    format!("{:.0}", days)
}

pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Runway in months for the `/status` reply.
pub fn format_runway_months(months: f64) -> String {
    if months.is_infinite() || months >= 999.0 {
        return "∞ meses".to_string();
    }
    format!("{:.1} meses", months)
}

/// The scheduled daily report. Line layout is load-bearing: existing
/// deployments compare these strings literally.
pub fn format_daily_report(
    company_name: &str,
    revenue_yesterday: f64,
    revenue_avg: f64,
    cash_balance: f64,
    days_of_cash: f64,
    overdue_total: f64,
    level: AlertLevel,
) -> String {
    let mut message = format!("📊 *Relatório Diário - {}*\n\n", company_name);

    message.push_str(&format!("{} Status: {}\n\n", level.emoji(), level.label()));

    message.push_str(&format!("💰 *Caixa Atual:* {}\n", format_currency(cash_balance)));
    message.push_str(&format!(
        "⏱️ *Dias de Caixa:* {} dias\n\n",
        format_days(days_of_cash)
    ));

    if revenue_yesterday == 0.0 && revenue_avg == 0.0 {
        message.push_str("📈 *Faturamento:* Sem faturamento registrado\n");
    } else {
        message.push_str("📈 *Faturamento:*\n");
        message.push_str(&format!("  Ontem: {}\n", format_currency(revenue_yesterday)));
        message.push_str(&format!("  Média (7d): {}\n", format_currency(revenue_avg)));

        if revenue_avg > 0.0 {
            let variation = ((revenue_yesterday - revenue_avg) / revenue_avg) * 100.0;
            let variation_emoji = if variation > 0.0 {
                "📈"
            } else if variation < 0.0 {
                "📉"
            } else {
                "➡️"
            };
            message.push_str(&format!("  {} Variação: {:+.1}%\n", variation_emoji, variation));
        } else {
            message.push_str("  ➡️ Variação: n/d\n");
        }
    }

    if overdue_total > 0.0 {
        message.push_str(&format!(
            "\n⚠️ *Clientes em Atraso:* {}\n",
            format_currency(overdue_total)
        ));
    }

    message
}

/// The `/status` command reply: derived cash, entry-driven monthly
/// burn, runway in months.
pub fn format_company_status(
    company_name: &str,
    cash_balance: f64,
    monthly_burn: f64,
    runway_months: f64,
) -> String {
    let mut message = format!("📊 *{}*\n\n", company_name);
    message.push_str(&format!("💰 Caixa: {}\n", format_currency(cash_balance)));
    message.push_str(&format!("🔥 Burn: {}/mês\n", format_currency(monthly_burn)));
    message.push_str(&format!("⏱️ Runway: {}", format_runway_months(runway_months)));
    message
}
