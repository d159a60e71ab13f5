pub mod config;
pub mod launcher;
pub mod platform;
pub mod usage;
