// src/docs.rs

use utoipa::OpenApi;
use crate::analytics;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Analytics ---
        handlers::analytics::get_report,
        handlers::analytics::get_forecast,
        handlers::analytics::get_combos,
        handlers::analytics::get_quadrants,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
    ),
    components(
        schemas(
            analytics::ReportWindow,
            analytics::time_of_day::DayPart,

            // --- Relatório ---
            models::analytics::AnalyticsReport,
            models::analytics::ProfitAndLoss,
            models::analytics::DaySeriesPoint,
            models::analytics::CategoryTotal,
            models::analytics::ItemStat,
            models::analytics::TopItemViews,
            models::analytics::ComboView,

            // --- Engenharia de cardápio ---
            models::analytics::Quadrant,
            models::analytics::QuadrantCounts,
            models::analytics::QuadrantItem,
            models::analytics::QuadrantReport,

            // --- Projeção ---
            models::analytics::ForecastResult,
            models::analytics::CostDriver,

            // --- Dashboard ---
            models::analytics::DashboardSummary,
        )
    ),
    tags(
        (name = "Analytics", description = "Lucratividade, combos, engenharia de cardápio e projeção"),
        (name = "Dashboard", description = "Indicadores e Gráficos Gerenciais")
    )
)]
pub struct ApiDoc;
