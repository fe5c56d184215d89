//! CLI subcommand implementations.

pub mod delete;
pub mod get;
pub mod params;
pub mod post;
