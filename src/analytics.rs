// src/analytics.rs
//
// Motor de lucratividade: funções puras sobre registros históricos já carregados.
// Nada aqui faz I/O nem guarda estado entre chamadas.

pub mod window;
pub mod time_of_day;
pub mod proration;
pub mod rollup;
pub mod combos;
pub mod quadrant;
pub mod forecast;
pub mod report;

#[cfg(test)]
pub(crate) mod fixtures;

use rust_decimal::Decimal;

pub use window::ReportWindow;

/// Margem em %, definida como 0 quando não há receita.
pub fn margin_percent(profit: Decimal, revenue: Decimal) -> Decimal {
    if revenue.is_zero() {
        return Decimal::ZERO;
    }
    profit / revenue * Decimal::ONE_HUNDRED
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn margin_is_zero_without_revenue() {
        assert_eq!(margin_percent(dec!(-15), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(margin_percent(dec!(25), dec!(100)), dec!(25));
    }
}
