pub mod aliases;
pub mod config;
