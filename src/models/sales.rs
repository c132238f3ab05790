// src/models/sales.rs

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "sale_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaleStatus {
    Pending,
    Completed,
    Cancelled,
}

// --- Venda (pedido fechado) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,
    pub tenant_id: Uuid,
    /// Horário local do restaurante (wall-clock), não UTC.
    pub sold_at: NaiveDateTime,
    pub total: Decimal,
    pub status: SaleStatus,
    pub table_id: Option<Uuid>,
    pub waiter_id: Option<Uuid>,

    // Preenchido pelo repositório numa segunda query
    #[sqlx(skip)]
    #[serde(default)]
    pub items: Vec<SaleItem>,
}

impl Sale {
    pub fn is_completed(&self) -> bool {
        self.status == SaleStatus::Completed
    }

    /// Receita recalculada pelas linhas; `total` não é usado nas análises.
    pub fn line_revenue(&self) -> Decimal {
        self.items.iter().map(SaleItem::revenue).sum()
    }

    pub fn line_cost(&self) -> Decimal {
        self.items.iter().map(SaleItem::total_cost).sum()
    }

    pub fn line_profit(&self) -> Decimal {
        self.items.iter().map(SaleItem::profit).sum()
    }
}

// --- Linha da venda ---
// `price` e `cost` são o snapshot do momento da venda. Nunca recalcular pelo custo atual.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub id: Uuid,
    pub sale_id: Uuid,
    pub menu_item_id: Uuid,
    pub quantity: i32,
    pub price: Decimal,
    pub cost: Decimal,
}

impl SaleItem {
    pub fn revenue(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    pub fn total_cost(&self) -> Decimal {
        self.cost * Decimal::from(self.quantity)
    }

    pub fn profit(&self) -> Decimal {
        (self.price - self.cost) * Decimal::from(self.quantity)
    }
}
