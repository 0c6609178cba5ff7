//! NTFY-PUB: ntfy notification publisher
//!
//! A library for resolving layered publish settings (defaults, config
//! files, command line) and sending a single notification to an ntfy
//! server topic.

pub mod config;
pub mod input;
pub mod notify;
pub mod time;
