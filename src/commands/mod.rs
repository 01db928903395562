//! Command implementations for the pnp-vendorize CLI

pub mod completions;
mod helpers;
pub mod list;
pub mod run;
pub mod version;
