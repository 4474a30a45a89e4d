pub mod aggregate;
pub mod fairness;
pub mod models;
pub mod store;
pub mod totals;
pub mod ui;
