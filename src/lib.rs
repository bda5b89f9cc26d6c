//! Serves one HTML page listing the issues of several Redmine instances,
//! grouped by assignee.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod providers;
pub mod render;
pub mod server;
