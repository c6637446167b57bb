//! Infoscope - media file inspection through the native MediaInfo library
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod probe;
