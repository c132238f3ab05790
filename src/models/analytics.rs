// src/models/analytics.rs
//
// Contratos de saída consumidos pelo front (dashboard e relatório completo).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::analytics::{time_of_day::DayPart, ReportWindow};

// 1. Série diária (gráfico de receita x custo), sem buracos
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DaySeriesPoint {
    #[schema(value_type = String, format = Date, example = "2026-03-01")]
    pub date: NaiveDate,
    #[schema(example = "1520.40")]
    pub revenue: Decimal,
    #[schema(example = "610.00")]
    pub cost: Decimal,
}

// 2. Receita por categoria
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    #[schema(example = "Burgers")]
    pub name: String,
    pub revenue: Decimal,
}

// 3. Desempenho por item do cardápio
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemStat {
    pub id: Uuid,
    #[schema(example = "Smash Burger")]
    pub name: String,
    #[schema(example = "Burgers")]
    pub category: String,
    pub quantity: i64,
    pub revenue: Decimal,
    pub cost: Decimal,
    pub profit: Decimal,
    #[schema(example = "62.5")]
    pub margin: Decimal,
    pub top_time_of_day: DayPart,
    /// Nome do item mais vendido junto com este.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commonly_with: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopItemViews {
    pub by_revenue: Vec<ItemStat>,
    pub by_profit: Vec<ItemStat>,
    pub most_sold: Vec<ItemStat>,
    pub least_sold: Vec<ItemStat>,
    pub highest_margin: Vec<ItemStat>,
    pub lowest_margin: Vec<ItemStat>,
}

// 4. Combos (pares comprados juntos)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComboView {
    #[schema(example = json!(["Smash Burger", "Fries"]))]
    pub items: Vec<String>,
    pub count: u64,
    /// Receita da venda inteira somada a cada par (não rateada).
    pub revenue: Decimal,
    pub profit: Decimal,
    pub margin: Decimal,
    pub top_time_of_day: DayPart,
}

// 5. Engenharia de cardápio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Quadrant {
    Star,
    Puzzle,
    Workhorse,
    Dog,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct QuadrantCounts {
    #[serde(rename = "STAR")]
    pub star: u32,
    #[serde(rename = "PUZZLE")]
    pub puzzle: u32,
    #[serde(rename = "WORKHORSE")]
    pub workhorse: u32,
    #[serde(rename = "DOG")]
    pub dog: u32,
}

impl QuadrantCounts {
    pub fn increment(&mut self, quadrant: Quadrant) {
        match quadrant {
            Quadrant::Star => self.star += 1,
            Quadrant::Puzzle => self.puzzle += 1,
            Quadrant::Workhorse => self.workhorse += 1,
            Quadrant::Dog => self.dog += 1,
        }
    }

    pub fn get(&self, quadrant: Quadrant) -> u32 {
        match quadrant {
            Quadrant::Star => self.star,
            Quadrant::Puzzle => self.puzzle,
            Quadrant::Workhorse => self.workhorse,
            Quadrant::Dog => self.dog,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuadrantItem {
    pub menu_item_id: Uuid,
    pub name: String,
    pub category: String,
    pub quadrant: Quadrant,
    pub margin_percent: Decimal,
    pub units_sold: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuadrantReport {
    pub counts: QuadrantCounts,
    pub median_margin: Decimal,
    pub median_units: Decimal,
    pub items: Vec<QuadrantItem>,
}

// 6. Previsão de fechamento do mês
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CostDriver {
    #[schema(example = "Payroll")]
    pub label: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    pub projected_net_profit: Decimal,
    pub is_loss: bool,
    pub projected_revenue: Decimal,
    pub projected_cogs: Decimal,
    pub projected_operating_expenses: Decimal,
    pub projected_payroll: Decimal,
    pub days_elapsed: u32,
    pub days_in_month: u32,
    pub drivers: Vec<CostDriver>,
}

// 7. DRE simplificada do período
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfitAndLoss {
    pub revenue: Decimal,
    /// Custo das linhas vendidas (snapshot da venda).
    pub sales_cost: Decimal,
    /// Insumos da produção, a custo atual.
    pub meal_prep_cost: Decimal,
    pub cogs: Decimal,
    pub gross_profit: Decimal,
    pub operating_expenses: Decimal,
    pub payroll: Decimal,
    pub net_profit: Decimal,
    pub gross_margin: Decimal,
    pub net_margin: Decimal,
}

// --- Respostas completas ---

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub window: ReportWindow,
    pub profit_and_loss: ProfitAndLoss,
    pub day_series: Vec<DaySeriesPoint>,
    pub category_totals: Vec<CategoryTotal>,
    pub items: Vec<ItemStat>,
    pub top_items: TopItemViews,
    pub combos: Vec<ComboView>,
    pub quadrants: QuadrantReport,
    pub forecast: ForecastResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub window: ReportWindow,
    pub profit_and_loss: ProfitAndLoss,
    pub day_series: Vec<DaySeriesPoint>,
    pub top_items: Vec<ItemStat>,
    pub forecast: ForecastResult,
}
