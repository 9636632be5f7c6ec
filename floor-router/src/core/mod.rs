//! Core - 配置

pub mod config;

pub use config::{Config, RoutingConfig};
