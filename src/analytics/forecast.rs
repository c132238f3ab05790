// src/analytics/forecast.rs

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::models::analytics::{CostDriver, ForecastResult};

pub const COGS_LABEL: &str = "Cost of Goods Sold";
pub const PAYROLL_LABEL: &str = "Payroll";
pub const OPERATING_EXPENSES_LABEL: &str = "Operating Expenses";

/// Valores acumulados do mês até hoje.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthToDate {
    pub revenue: Decimal,
    /// Custo das vendas + insumos da produção.
    pub cogs: Decimal,
    /// Despesas rateadas + avulsas + desperdício.
    pub operating_expenses: Decimal,
    pub payroll: Decimal,
}

/// Projeta o fechamento do mês pela média diária até agora.
///
/// Extrapolação linear simples: não considera sazonalidade nem dia da semana, então um
/// início de mês fraco (ou um fim de semana forte) distorce a projeção.
pub fn forecast(month_to_date: &MonthToDate, today: NaiveDate) -> ForecastResult {
    let days_elapsed = today.day().max(1);
    let days_in_month = u32::from(today.num_days_in_month());

    let project = |value: Decimal| value / Decimal::from(days_elapsed) * Decimal::from(days_in_month);

    let projected_revenue = project(month_to_date.revenue);
    let projected_cogs = project(month_to_date.cogs);
    let projected_operating_expenses = project(month_to_date.operating_expenses);
    let projected_payroll = project(month_to_date.payroll);

    let projected_net_profit =
        projected_revenue - projected_cogs - projected_operating_expenses - projected_payroll;

    let mut drivers: Vec<CostDriver> = [
        (COGS_LABEL, projected_cogs),
        (PAYROLL_LABEL, projected_payroll),
        (OPERATING_EXPENSES_LABEL, projected_operating_expenses),
    ]
    .into_iter()
    .filter(|(_, amount)| *amount > Decimal::ZERO)
    .map(|(label, amount)| CostDriver {
        label: label.to_string(),
        amount,
    })
    .collect();
    drivers.sort_by(|a, b| b.amount.cmp(&a.amount));
    drivers.truncate(3);

    ForecastResult {
        projected_net_profit,
        is_loss: projected_net_profit < Decimal::ZERO,
        projected_revenue,
        projected_cogs,
        projected_operating_expenses,
        projected_payroll,
        days_elapsed,
        days_in_month,
        drivers,
    }
}
