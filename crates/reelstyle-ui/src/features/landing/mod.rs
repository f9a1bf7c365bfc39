//! Public landing page.

pub mod view;
