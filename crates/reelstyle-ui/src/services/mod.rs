//! Browser adapters for the core seams.
pub(crate) mod console;
pub(crate) mod storage;
pub(crate) mod transport;
