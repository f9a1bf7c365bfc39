//! Page features: DOM-free state plus wasm-only views.
pub mod analysis;
pub mod auth;
pub mod generator;
pub mod history;
#[cfg(target_arch = "wasm32")]
pub mod landing;
