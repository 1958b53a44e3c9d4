pub mod config;
pub mod employment;
pub mod error;
pub mod telemetry;
