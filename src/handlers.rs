pub mod analytics;
pub mod dashboard;

use chrono::{Local, NaiveDate};

// As vendas são gravadas no horário local do restaurante.
pub(crate) fn business_today() -> NaiveDate {
    Local::now().date_naive()
}
