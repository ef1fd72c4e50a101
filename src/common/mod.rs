//! # Common Components
//!
//! Shared utilities for the library and the `steg` binary.
//!
//! ## Modules
//!
//! - [`config`]: Configuration parsing utilities

pub mod config;
