//! Process initialization.
//!
//! Sets up the global logger before the server starts.

mod logger;

pub use logger::init_logger_with;
