pub mod leader;
pub mod loader;
pub mod polling;
pub mod registration;
pub mod supervisor;
pub mod watch;

#[cfg(test)]
pub(crate) mod scripted;
