//! Reusable view configuration.

pub mod data_table;
