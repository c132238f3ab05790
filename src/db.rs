pub mod analytics_repo;
pub use analytics_repo::AnalyticsRepository;
