//! Command handlers for the apilint CLI.
//!
//! Each subcommand has its own module with a public handler function
//! that `main()` dispatches to.

pub mod check;
pub mod completions;
pub mod config;
pub mod probe;
pub mod schema;
pub mod server;
