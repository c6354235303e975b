pub mod catalog_service;
pub mod chart_service;
pub mod dashboard;
pub mod filter_service;
pub mod history_service;
pub mod preference_service;
pub mod query_service;
pub mod search_service;
