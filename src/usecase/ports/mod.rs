pub mod backend;
pub mod repo;
