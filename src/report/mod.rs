// src/report/mod.rs

//! The in-memory report of one run, and how it is assembled.

pub mod builder;
pub mod model;

pub use builder::ReportBuilder;
pub use model::Report;
