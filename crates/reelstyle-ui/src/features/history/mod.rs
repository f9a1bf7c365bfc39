//! Analysis history page.

pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
