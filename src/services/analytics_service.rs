// src/services/analytics_service.rs

use chrono::NaiveDate;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
    analytics::{
        report::{AnalyticsEngine, ReportInput},
        ReportWindow,
    },
    common::error::AppError,
    db::{
        analytics_repo::{attach_meal_prep_usages, attach_sale_items},
        AnalyticsRepository,
    },
    models::{
        analytics::{AnalyticsReport, ComboView, DashboardSummary, ForecastResult, QuadrantReport},
        menu::MenuCatalog,
    },
};

#[derive(Clone)]
pub struct AnalyticsService {
    repo: AnalyticsRepository,
    engine: AnalyticsEngine,
}

impl AnalyticsService {
    pub fn new(repo: AnalyticsRepository, engine: AnalyticsEngine) -> Self {
        Self { repo, engine }
    }

    /// Lê tudo o que o motor precisa para uma janela. Espera uma conexão já dentro
    /// da transação do relatório, para todas as leituras verem o mesmo snapshot.
    pub async fn load_input(
        &self,
        conn: &mut PgConnection,
        tenant_id: Uuid,
        window: ReportWindow,
    ) -> Result<ReportInput, AppError> {
        let mut sales = self.repo.list_completed_sales(&mut *conn, tenant_id, &window).await?;
        let items = self.repo.list_sale_items(&mut *conn, tenant_id, &window).await?;
        attach_sale_items(&mut sales, items);

        let expenses = self.repo.list_expenses(&mut *conn, tenant_id).await?;
        let expense_transactions = self
            .repo
            .list_expense_transactions(&mut *conn, tenant_id, &window)
            .await?;
        let waste = self.repo.list_waste(&mut *conn, tenant_id, &window).await?;
        let payroll = self.repo.list_paid_payroll(&mut *conn, tenant_id, &window).await?;

        let mut meal_preps = self
            .repo
            .list_meal_prep_sessions(&mut *conn, tenant_id, &window)
            .await?;
        let usages = self
            .repo
            .list_meal_prep_usages(&mut *conn, tenant_id, &window)
            .await?;
        attach_meal_prep_usages(&mut meal_preps, usages);

        let catalog = MenuCatalog::new(self.repo.list_menu_items(&mut *conn, tenant_id).await?);

        tracing::debug!(
            %tenant_id,
            start = %window.start,
            end = %window.end,
            sales = sales.len(),
            expenses = expenses.len(),
            payroll = payroll.len(),
            meal_preps = meal_preps.len(),
            "Registros carregados para o relatório"
        );

        Ok(ReportInput {
            window,
            sales,
            expenses,
            expense_transactions,
            waste,
            payroll,
            meal_preps,
            catalog,
        })
    }

    pub async fn full_report(
        &self,
        conn: &mut PgConnection,
        tenant_id: Uuid,
        window: ReportWindow,
        today: NaiveDate,
    ) -> Result<AnalyticsReport, AppError> {
        let input = self.load_input(conn, tenant_id, window).await?;
        let month_to_date = self
            .load_input(conn, tenant_id, ReportWindow::month_to_date(today))
            .await?;

        Ok(self.engine.report(&input, &month_to_date, today))
    }

    pub async fn dashboard_summary(
        &self,
        conn: &mut PgConnection,
        tenant_id: Uuid,
        window: ReportWindow,
        today: NaiveDate,
    ) -> Result<DashboardSummary, AppError> {
        let input = self.load_input(conn, tenant_id, window).await?;
        let month_to_date = self
            .load_input(conn, tenant_id, ReportWindow::month_to_date(today))
            .await?;

        Ok(self.engine.dashboard(&input, &month_to_date, today))
    }

    pub async fn forecast(
        &self,
        conn: &mut PgConnection,
        tenant_id: Uuid,
        today: NaiveDate,
    ) -> Result<ForecastResult, AppError> {
        let month_to_date = self
            .load_input(conn, tenant_id, ReportWindow::month_to_date(today))
            .await?;

        Ok(self.engine.forecast(&month_to_date, today))
    }

    pub async fn combos(
        &self,
        conn: &mut PgConnection,
        tenant_id: Uuid,
        window: ReportWindow,
    ) -> Result<Vec<ComboView>, AppError> {
        let input = self.load_input(conn, tenant_id, window).await?;
        Ok(self.engine.combos(&input))
    }

    pub async fn quadrants(
        &self,
        conn: &mut PgConnection,
        tenant_id: Uuid,
        window: ReportWindow,
    ) -> Result<QuadrantReport, AppError> {
        let input = self.load_input(conn, tenant_id, window).await?;
        Ok(self.engine.quadrants(&input))
    }
}
