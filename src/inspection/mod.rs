//! Swappable inspection strategies for tabular datasets.

pub mod data_types;
pub mod inspector;
pub mod stats;
pub mod strategy;
pub mod style;
pub mod summary;

pub use data_types::DataTypesInspection;
pub use inspector::Inspector;
pub use strategy::InspectionStrategy;
pub use summary::SummaryStatisticsInspection;
