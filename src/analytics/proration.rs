// src/analytics/proration.rs

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::analytics::ReportWindow;
use crate::models::costs::{Expense, ExpenseCadence, ExpenseTransaction, WasteRecord};

/// Parte de uma despesa recorrente que cabe no período do relatório.
///
/// Dias e meses são contados em datas de calendário, inclusivos: um período de 1 dia
/// conta 1 dia, e qualquer sobreposição dentro de um mês conta o mês inteiro.
/// Sem sobreposição o resultado é zero.
pub fn expense_amount_in_window(expense: &Expense, window: &ReportWindow) -> Decimal {
    let effective_end = expense.end_date.unwrap_or(window.end);

    let start = expense.start_date.max(window.start);
    let end = effective_end.min(window.end);
    if start > end {
        return Decimal::ZERO;
    }

    let day_count = Decimal::from(day_span(start, end));
    let month_count = Decimal::from(month_span(start, end));

    match expense.cadence {
        ExpenseCadence::Daily => expense.amount * day_count,
        ExpenseCadence::Weekly => expense.amount * day_count / Decimal::from(7),
        ExpenseCadence::Monthly => expense.amount * month_count,
        ExpenseCadence::Annual => expense.amount * month_count / Decimal::from(12),
    }
}

/// Despesas operacionais do período: recorrentes rateadas + avulsas + desperdício.
pub fn operating_expenses_in_window(
    expenses: &[Expense],
    transactions: &[ExpenseTransaction],
    waste: &[WasteRecord],
    window: &ReportWindow,
) -> Decimal {
    let recurring: Decimal = expenses
        .iter()
        .map(|expense| expense_amount_in_window(expense, window))
        .sum();

    let one_off: Decimal = transactions
        .iter()
        .filter(|t| window.contains(t.occurred_on))
        .map(|t| t.amount)
        .sum();

    let wasted: Decimal = waste
        .iter()
        .filter(|w| window.contains(w.recorded_on))
        .map(|w| w.cost)
        .sum();

    recurring + one_off + wasted
}

fn day_span(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

fn month_span(start: NaiveDate, end: NaiveDate) -> i64 {
    let years = i64::from(end.year() - start.year());
    let months = i64::from(end.month()) - i64::from(start.month());
    years * 12 + months + 1
}
