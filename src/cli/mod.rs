//! Command line interface for the catalog client.

pub mod args;
pub mod commands;
pub mod output;
