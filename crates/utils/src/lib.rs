pub mod config;
pub mod errors;
pub mod formatting;
pub mod grpc;
pub mod logging;
pub mod tracing;
