//! Ports (interfaces) between the use cases and the outside world.

pub mod presenter;
pub mod session_logger;
