//! CLI subcommand implementations.

pub mod disk;
pub mod raw;
pub mod resource;
