pub mod chart;
pub mod dropdown;
pub mod paginator;
pub mod results;
pub mod styles;
