//! CLI command implementations.

pub mod backends;
pub mod common;
pub mod plot;
pub mod run;
pub mod version;
