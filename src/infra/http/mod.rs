pub mod backend;
pub mod cache;
pub mod client;
pub mod schema;
