// src/handlers/dashboard.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, TimeDelta};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    analytics::ReportWindow,
    common::{
        db_utils::begin_tenant_snapshot,
        error::{ApiError, AppError},
    },
    config::AppState,
    handlers::business_today,
    middleware::tenancy::TenantContext,
    models::analytics::DashboardSummary,
};

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// Quantos dias para trás, contando hoje. Padrão: configuração do servidor.
    #[validate(range(min = 1, message = "O período deve ter pelo menos 1 dia."))]
    #[param(example = 7)]
    pub days: Option<i64>,
}

impl DashboardQuery {
    pub fn into_window(
        self,
        today: NaiveDate,
        default_days: i64,
        max_days: i64,
    ) -> Result<ReportWindow, AppError> {
        self.validate()?;

        let days = self.days.unwrap_or(default_days);
        if days > max_days {
            // `days` vem do cliente: não pode estourar o cálculo da data.
            let start = TimeDelta::try_days(days - 1)
                .and_then(|span| today.checked_sub_signed(span))
                .unwrap_or(NaiveDate::MIN);
            return Err(AppError::InvalidWindow {
                start,
                end: today,
                max_days,
            });
        }
        Ok(ReportWindow::last_days(today, days))
    }
}

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Resumo de receita, custos, top itens e projeção do mês", body = DashboardSummary),
        (status = 400, description = "Período inválido"),
        (status = 500, description = "Não foi possível carregar o relatório")
    ),
    params(
        DashboardQuery,
        ("x-tenant-id" = Uuid, Header, description = "ID do restaurante")
    )
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Query(query): Query<DashboardQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let today = business_today();
    let window = query.into_window(
        today,
        app_state.config.default_window_days,
        app_state.config.max_window_days,
    )?;

    let mut tx = begin_tenant_snapshot(&app_state, &tenant).await?;

    let summary = app_state
        .analytics_service
        .dashboard_summary(&mut *tx, tenant.0, window, today)
        .await?;

    tx.commit().await.map_err(AppError::from)?;

    Ok((StatusCode::OK, Json(summary)))
}
