//! Core data model for the DataScope profiling tool
//!
//! This crate provides the in-memory dataset representation shared by the
//! loaders, the profiling engine and the command line front end.

pub mod dataset;
pub mod pagination;

// Re-export commonly used types
pub use dataset::{Dataset, Record, Value, parse_number};
pub use pagination::{PageError, PageWindow, Pager, DEFAULT_ROWS_PER_PAGE};
