pub mod analytics;
pub mod costs;
pub mod menu;
pub mod sales;
