//! Use cases (application services)

pub mod run_session;
pub mod workflow_controller;
