// src/handlers/analytics.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;
use validator::{Validate, ValidationError};

use crate::{
    analytics::ReportWindow,
    common::{
        db_utils::begin_tenant_snapshot,
        error::{ApiError, AppError},
    },
    config::AppState,
    handlers::business_today,
    middleware::tenancy::TenantContext,
    models::analytics::{AnalyticsReport, ComboView, ForecastResult, QuadrantReport},
};

// ---
// Query: janela do relatório
// ---
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
#[validate(schema(function = "validate_window_order"))]
pub struct ReportWindowQuery {
    /// Primeiro dia (inclusivo)
    #[param(value_type = String, format = Date, example = "2026-03-01")]
    pub start: NaiveDate,
    /// Último dia (inclusivo)
    #[param(value_type = String, format = Date, example = "2026-03-31")]
    pub end: NaiveDate,
}

fn validate_window_order(query: &ReportWindowQuery) -> Result<(), ValidationError> {
    if query.start > query.end {
        let mut err = ValidationError::new("window_order");
        err.message = Some("A data inicial deve ser anterior ou igual à data final.".into());
        return Err(err);
    }
    Ok(())
}

impl ReportWindowQuery {
    pub fn into_window(self, max_days: i64) -> Result<ReportWindow, AppError> {
        self.validate()?;

        ReportWindow::new(self.start, self.end)
            .filter(|window| window.day_count() <= max_days)
            .ok_or(AppError::InvalidWindow {
                start: self.start,
                end: self.end,
                max_days,
            })
    }
}

// GET /api/analytics/report
#[utoipa::path(
    get,
    path = "/api/analytics/report",
    tag = "Analytics",
    responses(
        (status = 200, description = "Relatório completo de lucratividade do período", body = AnalyticsReport),
        (status = 400, description = "Período inválido"),
        (status = 500, description = "Não foi possível carregar o relatório")
    ),
    params(
        ReportWindowQuery,
        ("x-tenant-id" = Uuid, Header, description = "ID do restaurante")
    )
)]
pub async fn get_report(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Query(query): Query<ReportWindowQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let window = query.into_window(app_state.config.max_window_days)?;

    let mut tx = begin_tenant_snapshot(&app_state, &tenant).await?;

    let report = app_state
        .analytics_service
        .full_report(&mut *tx, tenant.0, window, business_today())
        .await?;

    tx.commit().await.map_err(AppError::from)?;

    Ok((StatusCode::OK, Json(report)))
}

// GET /api/analytics/forecast
#[utoipa::path(
    get,
    path = "/api/analytics/forecast",
    tag = "Analytics",
    responses(
        (status = 200, description = "Projeção de fechamento do mês corrente", body = ForecastResult),
        (status = 500, description = "Não foi possível carregar o relatório")
    ),
    params(
        ("x-tenant-id" = Uuid, Header, description = "ID do restaurante")
    )
)]
pub async fn get_forecast(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_snapshot(&app_state, &tenant).await?;

    let forecast = app_state
        .analytics_service
        .forecast(&mut *tx, tenant.0, business_today())
        .await?;

    tx.commit().await.map_err(AppError::from)?;

    Ok((StatusCode::OK, Json(forecast)))
}

// GET /api/analytics/combos
#[utoipa::path(
    get,
    path = "/api/analytics/combos",
    tag = "Analytics",
    responses(
        (status = 200, description = "Pares de itens mais comprados juntos", body = Vec<ComboView>),
        (status = 400, description = "Período inválido")
    ),
    params(
        ReportWindowQuery,
        ("x-tenant-id" = Uuid, Header, description = "ID do restaurante")
    )
)]
pub async fn get_combos(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Query(query): Query<ReportWindowQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let window = query.into_window(app_state.config.max_window_days)?;

    let mut tx = begin_tenant_snapshot(&app_state, &tenant).await?;

    let combos = app_state
        .analytics_service
        .combos(&mut *tx, tenant.0, window)
        .await?;

    tx.commit().await.map_err(AppError::from)?;

    Ok((StatusCode::OK, Json(combos)))
}

// GET /api/analytics/quadrants
#[utoipa::path(
    get,
    path = "/api/analytics/quadrants",
    tag = "Analytics",
    responses(
        (status = 200, description = "Engenharia de cardápio (Star, Puzzle, Workhorse, Dog)", body = QuadrantReport),
        (status = 400, description = "Período inválido")
    ),
    params(
        ReportWindowQuery,
        ("x-tenant-id" = Uuid, Header, description = "ID do restaurante")
    )
)]
pub async fn get_quadrants(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Query(query): Query<ReportWindowQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let window = query.into_window(app_state.config.max_window_days)?;

    let mut tx = begin_tenant_snapshot(&app_state, &tenant).await?;

    let quadrants = app_state
        .analytics_service
        .quadrants(&mut *tx, tenant.0, window)
        .await?;

    tx.commit().await.map_err(AppError::from)?;

    Ok((StatusCode::OK, Json(quadrants)))
}
