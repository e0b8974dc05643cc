//! Command implementations.

pub mod check;
pub mod config;
pub mod export;
pub mod load;

pub use self::check::execute_check;
pub use self::config::execute_config;
pub use self::export::execute_export;
pub use self::load::execute_load;
