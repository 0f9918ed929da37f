//! Strategy driver and replay application.

pub mod app;
pub mod config;
pub mod driver;
pub mod error;
pub mod logging;

pub use config::{AppConfig, StrategyMode};
pub use driver::StrategyDriver;
pub use error::{BotError, BotResult};
