//! Proofread web application: configuration, service wiring, and the HTTP surface.
pub mod config;
pub mod services;
pub mod web;
