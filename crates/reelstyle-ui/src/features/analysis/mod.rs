//! Video analysis page.
//!
//! # Design
//! - Analyze-by-URL and stored-video loading share a single result slot.
//! - The page remembers the analysed author for the generator.

pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
