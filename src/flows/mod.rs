//! Flows module - Operations spanning several targets
//!
//! Provides:
//! - rewrite: Format every configured target in order under an error policy

pub mod rewrite;
