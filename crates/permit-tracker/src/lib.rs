//! Permit deadline tracking for Thurston County properties.

pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod deadlines;
pub mod error;
pub mod import;
pub mod properties;
pub mod telemetry;
