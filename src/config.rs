// src/config.rs

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, str::FromStr, time::Duration};

use crate::{
    analytics::report::{AnalyticsEngine, EngineConfig},
    db::AnalyticsRepository,
    services::analytics_service::AnalyticsService,
};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
    /// Quantos combos aparecem no relatório.
    pub combo_limit: usize,
    /// Tamanho das listas "Top N" de itens.
    pub top_n: usize,
    pub default_window_days: i64,
    pub max_window_days: i64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;

        Ok(Self {
            database_url,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 5)?,
            combo_limit: env_or("ANALYTICS_COMBO_LIMIT", 10)?,
            top_n: env_or("ANALYTICS_TOP_N", 5)?,
            default_window_days: env_or("ANALYTICS_DEFAULT_WINDOW_DAYS", 30)?,
            max_window_days: env_or("ANALYTICS_MAX_WINDOW_DAYS", 366)?,
        })
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            combo_limit: self.combo_limit,
            top_n: self.top_n,
            ..EngineConfig::default()
        }
    }
}

// Lê uma variável numérica; ausente = default, malformada = erro de inicialização.
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => parse_env_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_env_value<T>(key: &str, raw: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("{} contém um valor inválido: {:?}", key, raw))
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: AppConfig,
    pub analytics_service: AnalyticsService,
}

impl AppState {
    pub async fn new(config: AppConfig) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::from_pool(db_pool, config))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_pool(db_pool: PgPool, config: AppConfig) -> Self {
        let repo = AnalyticsRepository::new();
        let engine = AnalyticsEngine::new(config.engine_config());
        let analytics_service = AnalyticsService::new(repo, engine);

        Self {
            db_pool,
            config,
            analytics_service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_values_are_trimmed_before_parsing() {
        let limit: usize = parse_env_value("ANALYTICS_COMBO_LIMIT", " 12 ").unwrap();

        assert_eq!(limit, 12);
    }

    #[test]
    fn malformed_values_fail_naming_the_variable() {
        let err = parse_env_value::<usize>("ANALYTICS_TOP_N", "abc").unwrap_err();

        let message = err.to_string();
        assert!(message.contains("ANALYTICS_TOP_N"));
        assert!(message.contains("abc"));
    }

    #[test]
    fn negative_values_are_rejected_for_unsigned_settings() {
        assert!(parse_env_value::<u32>("DB_MAX_CONNECTIONS", "-1").is_err());
    }
}
