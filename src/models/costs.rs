// src/models/costs.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "expense_cadence", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseCadence {
    Daily,
    Weekly,
    Monthly,
    Annual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payroll_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayrollStatus {
    Pending,
    Paid,
}

// --- Despesas recorrentes (aluguel, luz, etc.) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,
    pub name: String,
    pub cadence: ExpenseCadence,
    pub amount: Decimal,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>, // Sem data = em aberto
}

// --- Despesa avulsa, já datada ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseTransaction {
    pub id: Uuid,
    pub description: Option<String>,
    pub amount: Decimal,
    pub occurred_on: NaiveDate,
}

// --- Desperdício (perda de insumo) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WasteRecord {
    pub id: Uuid,
    pub ingredient_id: Uuid,
    pub quantity: Decimal,
    pub cost: Decimal,
    pub recorded_on: NaiveDate,
}

// --- Folha de pagamento ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Payroll {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub total_paid: Decimal,
    pub status: PayrollStatus,
}

impl Payroll {
    pub fn is_paid(&self) -> bool {
        self.status == PayrollStatus::Paid
    }
}

// --- Produção (meal prep) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MealPrepSession {
    pub id: Uuid,
    pub prepared_on: NaiveDate,

    #[sqlx(skip)]
    #[serde(default)]
    pub usages: Vec<MealPrepUsage>,
}

// Diferente da venda: o custo aqui é o custo ATUAL do insumo.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MealPrepUsage {
    pub session_id: Uuid,
    pub ingredient_id: Uuid,
    pub quantity: Decimal,
    pub unit_cost: Decimal,
}

impl MealPrepSession {
    pub fn ingredient_cost(&self) -> Decimal {
        self.usages.iter().map(|u| u.quantity * u.unit_cost).sum()
    }
}
