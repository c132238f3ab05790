// src/analytics/report.rs
//
// Ponto único do motor: dashboard e relatório completo saem do mesmo cálculo,
// cada um escolhendo quais visões devolver.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeSet;

use crate::{
    analytics::{
        combos::mine_combos,
        forecast::{forecast, MonthToDate},
        margin_percent,
        proration::operating_expenses_in_window,
        quadrant::classify,
        rollup::{category_totals, day_series, item_performance, ItemMetric, ItemPerformance, SortOrder},
        time_of_day::DayPartBoundaries,
        ReportWindow,
    },
    models::{
        analytics::{AnalyticsReport, ComboView, DashboardSummary, ForecastResult, ItemStat, ProfitAndLoss, QuadrantReport, TopItemViews},
        costs::{Expense, ExpenseTransaction, MealPrepSession, Payroll, WasteRecord},
        menu::MenuCatalog,
        sales::Sale,
    },
};

/// Tudo o que foi lido do banco para um tenant e uma janela. Imutável durante o cálculo.
#[derive(Debug, Clone)]
pub struct ReportInput {
    pub window: ReportWindow,
    pub sales: Vec<Sale>,
    pub expenses: Vec<Expense>,
    pub expense_transactions: Vec<ExpenseTransaction>,
    pub waste: Vec<WasteRecord>,
    pub payroll: Vec<Payroll>,
    pub meal_preps: Vec<MealPrepSession>,
    pub catalog: MenuCatalog,
}

impl ReportInput {
    #[cfg(test)]
    pub fn empty(window: ReportWindow) -> Self {
        Self {
            window,
            sales: Vec::new(),
            expenses: Vec::new(),
            expense_transactions: Vec::new(),
            waste: Vec::new(),
            payroll: Vec::new(),
            meal_preps: Vec::new(),
            catalog: MenuCatalog::default(),
        }
    }

    /// Vendas concluídas dentro da janela.
    pub fn sales_in_window(&self) -> Vec<Sale> {
        self.sales
            .iter()
            .filter(|sale| sale.is_completed() && self.window.contains(sale.sold_at.date()))
            .cloned()
            .collect()
    }

    /// Ids de itens vendidos na janela que não existem mais no cardápio.
    pub fn unknown_menu_items(&self) -> BTreeSet<uuid::Uuid> {
        self.sales_in_window()
            .iter()
            .flat_map(|sale| sale.items.iter())
            .map(|item| item.menu_item_id)
            .filter(|id| !self.catalog.contains(id))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub combo_limit: usize,
    pub top_n: usize,
    pub day_parts: DayPartBoundaries,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            combo_limit: 10,
            top_n: 5,
            day_parts: DayPartBoundaries::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    config: EngineConfig,
}

impl AnalyticsEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    // =========================================================================
    //  Totais
    // =========================================================================

    pub fn profit_and_loss(&self, input: &ReportInput) -> ProfitAndLoss {
        let window = &input.window;
        let sales = input.sales_in_window();

        let revenue: Decimal = sales.iter().map(Sale::line_revenue).sum();
        let sales_cost: Decimal = sales.iter().map(Sale::line_cost).sum();
        let meal_prep_cost: Decimal = input
            .meal_preps
            .iter()
            .filter(|session| window.contains(session.prepared_on))
            .map(MealPrepSession::ingredient_cost)
            .sum();
        let operating_expenses = operating_expenses_in_window(
            &input.expenses,
            &input.expense_transactions,
            &input.waste,
            window,
        );
        let payroll: Decimal = input
            .payroll
            .iter()
            .filter(|p| p.is_paid() && window.contains(p.period_end))
            .map(|p| p.total_paid)
            .sum();

        let cogs = sales_cost + meal_prep_cost;
        let gross_profit = revenue - cogs;
        let net_profit = gross_profit - operating_expenses - payroll;

        ProfitAndLoss {
            revenue,
            sales_cost,
            meal_prep_cost,
            cogs,
            gross_profit,
            operating_expenses,
            payroll,
            net_profit,
            gross_margin: margin_percent(gross_profit, revenue),
            net_margin: margin_percent(net_profit, revenue),
        }
    }

    pub fn month_to_date(&self, input: &ReportInput) -> MonthToDate {
        let pnl = self.profit_and_loss(input);
        MonthToDate {
            revenue: pnl.revenue,
            cogs: pnl.cogs,
            operating_expenses: pnl.operating_expenses,
            payroll: pnl.payroll,
        }
    }

    /// `month_to_date` deve cobrir do dia 1 até `today`.
    pub fn forecast(&self, month_to_date: &ReportInput, today: NaiveDate) -> ForecastResult {
        forecast(&self.month_to_date(month_to_date), today)
    }

    // =========================================================================
    //  Visões
    // =========================================================================

    pub fn combos(&self, input: &ReportInput) -> Vec<ComboView> {
        self.warn_unknown_items(input);

        let sales = input.sales_in_window();
        mine_combos(&sales, &self.config.day_parts).top(&input.catalog, self.config.combo_limit)
    }

    pub fn quadrants(&self, input: &ReportInput) -> QuadrantReport {
        self.warn_unknown_items(input);

        let sales = input.sales_in_window();
        classify(item_performance(&sales, &input.catalog, &self.config.day_parts).records())
    }

    pub fn report(
        &self,
        input: &ReportInput,
        month_to_date: &ReportInput,
        today: NaiveDate,
    ) -> AnalyticsReport {
        self.warn_unknown_items(input);

        let sales = input.sales_in_window();
        let catalog = &input.catalog;
        let performance = item_performance(&sales, catalog, &self.config.day_parts);
        let mining = mine_combos(&sales, &self.config.day_parts);

        let items: Vec<ItemStat> = performance
            .records()
            .iter()
            .map(|record| record.to_stat(mining.commonly_with(&record.menu_item_id, catalog)))
            .collect();

        let top_items = {
            let view = |metric, order| self.top_view(&performance, &items, metric, order);
            TopItemViews {
                by_revenue: view(ItemMetric::Revenue, SortOrder::Descending),
                by_profit: view(ItemMetric::Profit, SortOrder::Descending),
                most_sold: view(ItemMetric::Quantity, SortOrder::Descending),
                least_sold: view(ItemMetric::Quantity, SortOrder::Ascending),
                highest_margin: view(ItemMetric::Margin, SortOrder::Descending),
                lowest_margin: view(ItemMetric::Margin, SortOrder::Ascending),
            }
        };

        AnalyticsReport {
            window: input.window,
            profit_and_loss: self.profit_and_loss(input),
            day_series: day_series(&sales, &input.window, catalog),
            category_totals: category_totals(&sales, catalog),
            top_items,
            combos: mining.top(catalog, self.config.combo_limit),
            quadrants: classify(performance.records()),
            forecast: self.forecast(month_to_date, today),
            items,
        }
    }

    pub fn dashboard(
        &self,
        input: &ReportInput,
        month_to_date: &ReportInput,
        today: NaiveDate,
    ) -> DashboardSummary {
        self.warn_unknown_items(input);

        let sales = input.sales_in_window();
        let catalog = &input.catalog;
        let performance = item_performance(&sales, catalog, &self.config.day_parts);
        let top_items = performance
            .top(ItemMetric::Revenue, SortOrder::Descending, self.config.top_n)
            .into_iter()
            .map(|record| record.to_stat(None))
            .collect();

        DashboardSummary {
            window: input.window,
            profit_and_loss: self.profit_and_loss(input),
            day_series: day_series(&sales, &input.window, catalog),
            top_items,
            forecast: self.forecast(month_to_date, today),
        }
    }

    // Reaproveita os ItemStat já montados; `items` está na mesma ordem de `records()`.
    fn top_view(
        &self,
        performance: &ItemPerformance,
        items: &[ItemStat],
        metric: ItemMetric,
        order: SortOrder,
    ) -> Vec<ItemStat> {
        performance
            .top(metric, order, self.config.top_n)
            .into_iter()
            .filter_map(|record| items.iter().find(|stat| stat.id == record.menu_item_id))
            .cloned()
            .collect()
    }

    fn warn_unknown_items(&self, input: &ReportInput) {
        let unknown = input.unknown_menu_items();
        if !unknown.is_empty() {
            tracing::warn!(
                count = unknown.len(),
                ids = ?unknown,
                "Itens vendidos fora do cardápio; rotulados como Unknown"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::{at, date, line, sale, Menu};
    use crate::models::{
        analytics::QuadrantCounts,
        costs::{ExpenseCadence, MealPrepUsage, PayrollStatus},
    };
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn march() -> ReportWindow {
        ReportWindow::new(date(2026, 3, 1), date(2026, 3, 10)).unwrap()
    }

    #[test]
    fn empty_input_degrades_to_zero_values() {
        let engine = AnalyticsEngine::default();
        let input = ReportInput::empty(march());

        let report = engine.report(&input, &input, date(2026, 3, 10));

        assert_eq!(report.profit_and_loss, ProfitAndLoss::default());
        assert_eq!(report.day_series.len(), 10);
        assert!(report.day_series.iter().all(|p| p.revenue.is_zero() && p.cost.is_zero()));
        assert!(report.items.is_empty());
        assert!(report.combos.is_empty());
        assert_eq!(report.quadrants.counts, QuadrantCounts::default());
        assert!(!report.forecast.is_loss);
        assert_eq!(report.forecast.projected_net_profit, Decimal::ZERO);
    }

    #[test]
    fn profit_and_loss_combines_every_cost_source() {
        let mut menu = Menu::new();
        let pasta = menu.item("Pasta", (Uuid::new_v4(), "Mains"));
        let window = march();

        let mut input = ReportInput::empty(window);
        input.catalog = menu.catalog();
        input.sales = vec![
            sale(at(2026, 3, 2, 19), vec![line(pasta, 10, dec!(20), dec!(6))]),
            // Fora da janela
            sale(at(2026, 3, 11, 19), vec![line(pasta, 50, dec!(20), dec!(6))]),
        ];
        input.expenses = vec![Expense {
            id: Uuid::new_v4(),
            name: "Rent".into(),
            cadence: ExpenseCadence::Monthly,
            amount: dec!(30),
            start_date: date(2025, 1, 1),
            end_date: None,
        }];
        input.expense_transactions = vec![ExpenseTransaction {
            id: Uuid::new_v4(),
            description: None,
            amount: dec!(5),
            occurred_on: date(2026, 3, 4),
        }];
        input.waste = vec![WasteRecord {
            id: Uuid::new_v4(),
            ingredient_id: Uuid::new_v4(),
            quantity: dec!(1),
            cost: dec!(3),
            recorded_on: date(2026, 3, 5),
        }];
        input.payroll = vec![
            Payroll {
                id: Uuid::new_v4(),
                employee_id: Uuid::new_v4(),
                period_start: date(2026, 3, 1),
                period_end: date(2026, 3, 7),
                total_paid: dec!(40),
                status: PayrollStatus::Paid,
            },
            Payroll {
                id: Uuid::new_v4(),
                employee_id: Uuid::new_v4(),
                period_start: date(2026, 3, 1),
                period_end: date(2026, 3, 7),
                total_paid: dec!(999),
                status: PayrollStatus::Pending,
            },
        ];
        let session = Uuid::new_v4();
        input.meal_preps = vec![MealPrepSession {
            id: session,
            prepared_on: date(2026, 3, 3),
            usages: vec![MealPrepUsage {
                session_id: session,
                ingredient_id: Uuid::new_v4(),
                quantity: dec!(2.5),
                unit_cost: dec!(4),
            }],
        }];

        let pnl = AnalyticsEngine::default().profit_and_loss(&input);

        assert_eq!(pnl.revenue, dec!(200));
        assert_eq!(pnl.sales_cost, dec!(60));
        assert_eq!(pnl.meal_prep_cost, dec!(10));
        assert_eq!(pnl.cogs, dec!(70));
        assert_eq!(pnl.gross_profit, dec!(130));
        assert_eq!(pnl.operating_expenses, dec!(38));
        assert_eq!(pnl.payroll, dec!(40));
        assert_eq!(pnl.net_profit, dec!(52));
        assert_eq!(pnl.net_margin, dec!(26));
    }

    #[test]
    fn report_annotates_items_with_their_best_partner() {
        let mut menu = Menu::new();
        let cat = (Uuid::new_v4(), "Mains");
        let burger = menu.item("Burger", cat);
        let fries = menu.item("Fries", cat);
        let ghost = Uuid::new_v4();

        let mut input = ReportInput::empty(march());
        input.catalog = menu.catalog();
        input.sales = vec![
            sale(at(2026, 3, 2, 12), vec![line(burger, 1, dec!(10), dec!(4)), line(fries, 2, dec!(3), dec!(1))]),
            sale(at(2026, 3, 3, 20), vec![line(ghost, 1, dec!(7), dec!(2))]),
        ];

        let report = AnalyticsEngine::default().report(&input, &input, date(2026, 3, 10));

        let burger_stat = report.items.iter().find(|s| s.id == burger).unwrap();
        assert_eq!(burger_stat.commonly_with.as_deref(), Some("Fries"));
        let ghost_stat = report.items.iter().find(|s| s.id == ghost).unwrap();
        assert_eq!(ghost_stat.name, "Unknown");
        assert_eq!(ghost_stat.commonly_with, None);
        assert_eq!(report.top_items.by_revenue[0].name, "Burger");
        assert_eq!(report.top_items.most_sold[0].name, "Fries");
        assert_eq!(report.combos.len(), 1);
        assert_eq!(report.quadrants.items.len(), 3);
    }

    #[test]
    fn dashboard_and_report_agree_on_shared_figures() {
        let mut menu = Menu::new();
        let soup = menu.item("Soup", (Uuid::new_v4(), "Starters"));

        let mut input = ReportInput::empty(march());
        input.catalog = menu.catalog();
        input.sales = vec![sale(at(2026, 3, 5, 12), vec![line(soup, 3, dec!(6), dec!(2))])];

        let engine = AnalyticsEngine::default();
        let today = date(2026, 3, 10);
        let report = engine.report(&input, &input, today);
        let dashboard = engine.dashboard(&input, &input, today);

        assert_eq!(report.profit_and_loss, dashboard.profit_and_loss);
        assert_eq!(report.day_series, dashboard.day_series);
        assert_eq!(report.forecast, dashboard.forecast);
        assert_eq!(dashboard.top_items[0].revenue, dec!(18));
    }

    #[test]
    fn forecast_uses_the_month_to_date_input() {
        let mut menu = Menu::new();
        let steak = menu.item("Steak", (Uuid::new_v4(), "Mains"));

        let mut mtd = ReportInput::empty(ReportWindow::month_to_date(date(2026, 9, 10)));
        mtd.catalog = menu.catalog();
        mtd.sales = vec![sale(at(2026, 9, 4, 20), vec![line(steak, 100, dec!(10000), dec!(4000))])];
        mtd.payroll = vec![Payroll {
            id: Uuid::new_v4(),
            employee_id: Uuid::new_v4(),
            period_start: date(2026, 9, 1),
            period_end: date(2026, 9, 7),
            total_paid: dec!(700000),
            status: PayrollStatus::Paid,
        }];

        let result = AnalyticsEngine::default().forecast(&mtd, date(2026, 9, 10));

        assert_eq!(result.projected_revenue, dec!(3000000));
        assert_eq!(result.projected_cogs, dec!(1200000));
        assert_eq!(result.projected_payroll, dec!(2100000));
        assert!(result.is_loss);
        assert_eq!(result.drivers[0].label, "Payroll");
    }

    #[test]
    fn unknown_items_are_only_reported_for_sales_in_the_window() {
        let mut menu = Menu::new();
        let tea = menu.item("Tea", (Uuid::new_v4(), "Drinks"));
        let retired = Uuid::new_v4();
        let retired_before = Uuid::new_v4();

        let mut input = ReportInput::empty(march());
        input.catalog = menu.catalog();
        input.sales = vec![
            sale(at(2026, 3, 4, 9), vec![line(tea, 1, dec!(3), dec!(1)), line(retired, 1, dec!(5), dec!(2))]),
            sale(at(2026, 2, 20, 9), vec![line(retired_before, 1, dec!(5), dec!(2))]),
        ];

        let unknown = input.unknown_menu_items();

        assert_eq!(unknown.len(), 1);
        assert!(unknown.contains(&retired));
    }
}
