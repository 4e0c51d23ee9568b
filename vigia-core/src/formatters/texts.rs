// File: vigia-core/src/formatters/texts.rs
//
// Fixed conversation texts (Portuguese). Kept in one place so replies
// stay consistent between the onboarding and operation flows.

use super::format_currency;
use vigia_common::models::entry::EntryType;

pub fn welcome() -> String {
    "Olá! Eu sou o Vigia, seu assistente de monitoramento financeiro. 👋\n\n\
     Eu acompanho o caixa da sua empresa e te aviso quando o fôlego estiver \
     curto.\n\nEnvie /start para começar o cadastro."
        .to_string()
}

pub fn onboarding_intro() -> String {
    "Bem-vindo! Vou guiar você pelo cadastro. São só 3 perguntas rápidas.".to_string()
}

pub fn onboarding_question(step: i32) -> String {
    match step {
        1 => "1/3 — Qual é o custo fixo mensal médio da empresa? (ex: 5000)".to_string(),
        2 => "2/3 — Qual o percentual de custo variável sobre o faturamento? (0 a 100)".to_string(),
        _ => "3/3 — Qual o caixa mínimo que deve disparar um alerta? (ex: 5000)".to_string(),
    }
}

pub fn invalid_number() -> String {
    "Não entendi o valor. Envie apenas o número, ex: 5000 ou 5.000,50".to_string()
}

pub fn invalid_fixed_cost() -> String {
    "O custo fixo precisa ser maior que zero. Tente novamente.".to_string()
}

pub fn invalid_percent() -> String {
    "O percentual precisa estar entre 0 e 100. Tente novamente.".to_string()
}

pub fn invalid_cash_minimum() -> String {
    "O caixa mínimo não pode ser negativo. Tente novamente.".to_string()
}

pub fn onboarding_complete() -> String {
    "Cadastro concluído! ✅\n\nAgora você pode:\n\
     /entrada <valor> - Registrar faturamento\n\
     /saida <valor> - Registrar despesa\n\
     /status - Ver a saúde do caixa\n\n\
     Todo dia eu envio um relatório com o fôlego da empresa."
        .to_string()
}

pub fn help_text() -> String {
    "Comandos disponíveis:\n\
     /status - Ver status da empresa\n\
     /entrada <valor> - Adicionar entrada\n\
     /saida <valor> - Adicionar despesa\n\
     /ajuda - Mostrar esta mensagem"
        .to_string()
}

pub fn usage_hint(command: &str) -> String {
    format!("Uso: /{} <valor>", command)
}

pub fn entry_recorded(entry_type: EntryType, amount: f64) -> String {
    match entry_type {
        EntryType::Revenue => {
            format!("✅ Entrada de {} registrada!", format_currency(amount))
        }
        EntryType::Expense => {
            format!("✅ Saída de {} registrada!", format_currency(amount))
        }
    }
}

pub fn suspended_notice() -> String {
    "Sua conta está suspensa. Entre em contato com o suporte para reativá-la.".to_string()
}

pub fn cancelled_notice() -> String {
    "Sua conta foi cancelada. Entre em contato com o suporte se quiser voltar.".to_string()
}

pub fn company_not_found() -> String {
    "Empresa não encontrada.".to_string()
}

pub fn technical_error() -> String {
    "⚠️ Ocorreu um erro técnico. Tente novamente em instantes.".to_string()
}
