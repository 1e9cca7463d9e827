//! Accept loop and per-connection dispatch.

pub mod listener;
