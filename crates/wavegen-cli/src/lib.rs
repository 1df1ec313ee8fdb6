//! wavegen CLI library.
//!
//! Render configuration, the built-in demo tone and the `generate` and
//! `inspect` command implementations.

pub mod commands;
pub mod config;
pub mod tone;
