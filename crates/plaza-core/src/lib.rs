//! Core library for Plaza: configuration, API client, validation and session state.

pub mod api;
pub mod config;
pub mod logging;
pub mod models;
pub mod session;
pub mod validate;
