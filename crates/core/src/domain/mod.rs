pub mod deadline;
pub mod form;
pub mod maintenance;
pub mod theme;
pub mod thresholds;
pub mod vehicle;
