//! Infrastructure layer - process-wide concerns around the domain

pub mod logging;

pub use logging::init_logging;
