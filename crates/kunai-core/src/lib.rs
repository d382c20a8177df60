//! Dependency-light foundation for the kunai DAV sharing client:
//! error type, configuration, and shared constants.

pub mod config;
pub mod constants;
pub mod error;
