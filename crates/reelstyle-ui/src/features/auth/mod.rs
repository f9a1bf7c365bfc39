//! Login and registration pages.
//!
//! # Design
//! - Validate locally before touching the network.
//! - Hand all session changes to the session controller.

pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
