#![allow(clippy::async_fn_in_trait)]
pub mod client;
pub mod common;
pub mod traits;
pub mod watcher;

pub use watcher::supervisor::Supervisor;
pub use watcher::watch::watch_start;
