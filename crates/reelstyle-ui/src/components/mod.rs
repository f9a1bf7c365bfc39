//! Shared presentation components.
pub(crate) mod atoms;
pub(crate) mod shell;
pub(crate) mod status_console;
pub(crate) mod typewriter;
