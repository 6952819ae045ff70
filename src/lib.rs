//! Terminal client for the GenBI Purwokerto community site.

pub mod api;
pub mod config;
pub mod internal;
pub mod tui;
pub mod utils;
