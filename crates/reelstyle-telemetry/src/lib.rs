#![forbid(unsafe_code)]
#![warn(
    unused,
    unreachable_pub,
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls
)]
#![allow(clippy::module_name_repetitions)]
//! Logging primitives shared across the Reelstyle workspace.
//!
//! The browser has no stdout and no wall clock usable by the formatter, so the
//! subscriber is installed without timestamps and with a caller-supplied
//! writer. The UI passes a console writer; tests pass an in-memory one.

pub mod error;
pub mod init;

pub use error::{Result, TelemetryError};
pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging};
