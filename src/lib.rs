//! Lantern - Static File Server
//!
//! Core library for request parsing, resource resolution and response framing.

pub mod config;
pub mod files;
pub mod http;
pub mod server;
