//! HTTP protocol implementation.
//!
//! This module implements the wire side of a one-request-per-connection
//! static file server.
//!
//! # Architecture
//!
//! - **`connection`**: The per-connection state machine
//! - **`parser`**: Extracts method, resource and protocol from the request line
//! - **`request`**: The parsed request line
//! - **`response`**: Status codes, response representation and head framing
//! - **`writer`**: Writes the head and then the body to the client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Accumulate the request head
//!        └──────┬──────┘
//!               ├─ Empty / malformed → Closed (nothing written)
//!               ▼
//!        ┌──────────────────┐
//!        │     Parsed       │ ← Resolve content
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │   Responding     │ ← Write head, then body
//!        └──────┬───────────┘
//!               ▼
//!            Closed
//! ```
//!
//! There is no keep-alive: every connection carries exactly one response.

pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
