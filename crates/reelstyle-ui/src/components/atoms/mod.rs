//! Small reusable building blocks.
pub(crate) mod empty_state;
pub(crate) mod loading;

pub(crate) use empty_state::EmptyState;
pub(crate) use loading::{ErrorBanner, LoadingIndicator};
