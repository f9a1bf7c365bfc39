#![forbid(unsafe_code)]
#![warn(
    unused,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
//! Reelstyle web client.
//!
//! `core`, `i18n`, and the page state in `features` are DOM-free and tested
//! natively; views, routing, and browser services only build for wasm32.

pub mod core;
pub mod features;
pub mod i18n;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;
#[cfg(target_arch = "wasm32")]
mod services;

#[cfg(target_arch = "wasm32")]
pub use app::run_app;

#[cfg(test)]
mod tests {
    use crate::core::auth::Session;
    use crate::core::guard::{GuardDecision, guard_decision};
    use crate::i18n::{LocaleCode, TranslationBundle};

    #[test]
    fn translation_fallbacks_work() {
        let bundle = TranslationBundle::new(LocaleCode::Ru);
        assert_eq!(bundle.text("nav.missing_key", "Default"), "Default");
        assert_ne!(bundle.text("nav.analysis", ""), "");
    }

    #[test]
    fn fresh_session_holds_the_guard() {
        assert_eq!(guard_decision(&Session::default()), GuardDecision::Loading);
        assert_eq!(
            guard_decision(&Session::anonymous()),
            GuardDecision::RedirectToLogin
        );
    }
}
