// src/db/analytics_repo.rs
//
// Somente leitura. As tabelas pertencem aos módulos de PDV, estoque e RH; aqui só
// consultamos o histórico de um tenant dentro da janela (inclusiva).

use std::collections::HashMap;

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    analytics::ReportWindow,
    common::error::AppError,
    models::{
        costs::{Expense, ExpenseTransaction, MealPrepSession, MealPrepUsage, Payroll, WasteRecord},
        menu::MenuItemRef,
        sales::{Sale, SaleItem},
    },
};

#[derive(Clone, Default)]
pub struct AnalyticsRepository;

impl AnalyticsRepository {
    pub fn new() -> Self {
        Self
    }

    // =========================================================================
    //  VENDAS
    // =========================================================================

    pub async fn list_completed_sales<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        window: &ReportWindow,
    ) -> Result<Vec<Sale>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, tenant_id, sold_at, total, status, table_id, waiter_id
            FROM sales
            WHERE tenant_id = $1
              AND status = 'COMPLETED'
              AND sold_at::date BETWEEN $2 AND $3
            ORDER BY sold_at ASC
            "#,
        )
            .bind(tenant_id)
            .bind(window.start)
            .bind(window.end)
            .fetch_all(executor)
            .await?;

        Ok(sales)
    }

    pub async fn list_sale_items<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        window: &ReportWindow,
    ) -> Result<Vec<SaleItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // price/cost são os valores gravados na venda, não o custo atual do insumo
        let items = sqlx::query_as::<_, SaleItem>(
            r#"
            SELECT si.id, si.sale_id, si.menu_item_id, si.quantity, si.price, si.cost
            FROM sale_items si
            JOIN sales s ON s.id = si.sale_id
            WHERE s.tenant_id = $1
              AND s.status = 'COMPLETED'
              AND s.sold_at::date BETWEEN $2 AND $3
            ORDER BY si.sale_id, si.id
            "#,
        )
            .bind(tenant_id)
            .bind(window.start)
            .bind(window.end)
            .fetch_all(executor)
            .await?;

        Ok(items)
    }

    // =========================================================================
    //  CUSTOS
    // =========================================================================

    pub async fn list_expenses<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<Vec<Expense>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let expenses = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, name, cadence, amount, start_date, end_date
            FROM expenses
            WHERE tenant_id = $1
            ORDER BY start_date ASC
            "#,
        )
            .bind(tenant_id)
            .fetch_all(executor)
            .await?;

        Ok(expenses)
    }

    pub async fn list_expense_transactions<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        window: &ReportWindow,
    ) -> Result<Vec<ExpenseTransaction>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let transactions = sqlx::query_as::<_, ExpenseTransaction>(
            r#"
            SELECT id, description, amount, occurred_on
            FROM expense_transactions
            WHERE tenant_id = $1 AND occurred_on BETWEEN $2 AND $3
            "#,
        )
            .bind(tenant_id)
            .bind(window.start)
            .bind(window.end)
            .fetch_all(executor)
            .await?;

        Ok(transactions)
    }

    pub async fn list_waste<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        window: &ReportWindow,
    ) -> Result<Vec<WasteRecord>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let waste = sqlx::query_as::<_, WasteRecord>(
            r#"
            SELECT id, ingredient_id, quantity, cost, recorded_on
            FROM waste_records
            WHERE tenant_id = $1 AND recorded_on BETWEEN $2 AND $3
            "#,
        )
            .bind(tenant_id)
            .bind(window.start)
            .bind(window.end)
            .fetch_all(executor)
            .await?;

        Ok(waste)
    }

    pub async fn list_paid_payroll<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        window: &ReportWindow,
    ) -> Result<Vec<Payroll>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let payroll = sqlx::query_as::<_, Payroll>(
            r#"
            SELECT id, employee_id, period_start, period_end, total_paid, status
            FROM payrolls
            WHERE tenant_id = $1
              AND status = 'PAID'
              AND period_end BETWEEN $2 AND $3
            "#,
        )
            .bind(tenant_id)
            .bind(window.start)
            .bind(window.end)
            .fetch_all(executor)
            .await?;

        Ok(payroll)
    }

    pub async fn list_meal_prep_sessions<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        window: &ReportWindow,
    ) -> Result<Vec<MealPrepSession>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sessions = sqlx::query_as::<_, MealPrepSession>(
            r#"
            SELECT id, prepared_on
            FROM meal_prep_sessions
            WHERE tenant_id = $1 AND prepared_on BETWEEN $2 AND $3
            ORDER BY prepared_on ASC
            "#,
        )
            .bind(tenant_id)
            .bind(window.start)
            .bind(window.end)
            .fetch_all(executor)
            .await?;

        Ok(sessions)
    }

    pub async fn list_meal_prep_usages<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        window: &ReportWindow,
    ) -> Result<Vec<MealPrepUsage>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // Produção usa o custo ATUAL do insumo
        let usages = sqlx::query_as::<_, MealPrepUsage>(
            r#"
            SELECT u.session_id, u.ingredient_id, u.quantity, i.unit_cost
            FROM meal_prep_usages u
            JOIN meal_prep_sessions s ON s.id = u.session_id
            JOIN ingredients i ON i.id = u.ingredient_id
            WHERE s.tenant_id = $1 AND s.prepared_on BETWEEN $2 AND $3
            "#,
        )
            .bind(tenant_id)
            .bind(window.start)
            .bind(window.end)
            .fetch_all(executor)
            .await?;

        Ok(usages)
    }

    // =========================================================================
    //  CARDÁPIO (rótulos)
    // =========================================================================

    pub async fn list_menu_items<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<Vec<MenuItemRef>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, MenuItemRef>(
            r#"
            SELECT m.id, m.name, m.category_id, c.name AS category_name
            FROM menu_items m
            LEFT JOIN categories c ON c.id = m.category_id
            WHERE m.tenant_id = $1
            "#,
        )
            .bind(tenant_id)
            .fetch_all(executor)
            .await?;

        Ok(items)
    }
}

/// Pendura as linhas em cada venda, preservando a ordem das duas listas.
pub fn attach_sale_items(sales: &mut [Sale], items: Vec<SaleItem>) {
    let mut by_sale: HashMap<Uuid, Vec<SaleItem>> = HashMap::new();
    for item in items {
        by_sale.entry(item.sale_id).or_default().push(item);
    }
    for sale in sales.iter_mut() {
        sale.items = by_sale.remove(&sale.id).unwrap_or_default();
    }
}

pub fn attach_meal_prep_usages(sessions: &mut [MealPrepSession], usages: Vec<MealPrepUsage>) {
    let mut by_session: HashMap<Uuid, Vec<MealPrepUsage>> = HashMap::new();
    for usage in usages {
        by_session.entry(usage.session_id).or_default().push(usage);
    }
    for session in sessions.iter_mut() {
        session.usages = by_session.remove(&session.id).unwrap_or_default();
    }
}
