pub mod backend;
pub mod config;
pub mod context;
pub mod logging;
pub mod prompt;
pub mod providers;
pub mod session;
