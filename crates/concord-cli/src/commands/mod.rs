//! Command implementations.

pub mod check;
pub mod config;

pub use self::check::execute_check;
pub use self::config::execute_config;
