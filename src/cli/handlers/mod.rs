pub mod aliases;
pub mod apply;
pub mod config;
pub mod parse;
pub mod serialize;
