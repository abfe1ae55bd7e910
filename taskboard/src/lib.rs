//! Taskboard terminal client library: repository, store, board protocol,
//! view models and TUI.

pub mod app;
pub mod board;
pub mod config;
pub mod repository;
pub mod store;
pub mod ui;
pub mod views;
pub mod worker;
