//! HTTP surface of the EscrowReno signup verification service

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{configure, json_config, AppState};
