//! System-level modules
//!
//! Process-wide concerns that sit outside the state layer:
//! - Logging initialisation

pub mod logging;

pub use logging::init_logging;
