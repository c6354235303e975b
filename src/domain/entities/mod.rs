pub mod chart;
pub mod filter;
pub mod history;
pub mod job;
pub mod page;
pub mod session;
