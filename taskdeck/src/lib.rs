//! `TaskDeck` — terminal dashboard for a remote task-management API.

pub mod api;
pub mod app;
pub mod config;
pub mod session;
pub mod ui;
