//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Digit grouping (grouping)
//! - Token detection and substitution (formatter)
//! - Per-file outcomes and errors (model)
//! - Run configuration (config)
//! - Target path resolution (paths)
//! - Rendering functions for different output formats (render)

pub mod config;
pub mod formatter;
pub mod grouping;
pub mod model;
pub mod paths;
pub mod render;
