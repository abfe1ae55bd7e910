//! Taskboard task service library.
//!
//! Exposes the board, HTTP router and startup helpers for the binary, for
//! tests, and for embedding the service in-process.

pub mod api;
pub mod board;
pub mod config;
pub mod sample;
