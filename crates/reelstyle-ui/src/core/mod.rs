//! Core, DOM-free primitives and helpers for the Web UI.
pub mod auth;
pub mod client;
pub mod config;
pub mod console;
pub mod expiry;
pub mod guard;
pub mod logic;
pub mod request;
pub mod session;
pub mod storage;
pub mod store;
#[cfg(test)]
pub(crate) mod testing;
pub mod transport;
pub mod typewriter;
