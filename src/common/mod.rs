pub mod cluster;
pub mod config;
pub mod endpoint;
pub mod error;
