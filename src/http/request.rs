/// A parsed HTTP request line.
///
/// Only the request line is consumed; headers and body are never read.
/// The value is immutable once parsed and lives for a single connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The method token as sent by the client (e.g. "GET")
    pub method: String,
    /// The resource path before filesystem mapping (e.g. "/index.html")
    pub path: String,
    /// Full protocol token (e.g. "HTTP/1.1")
    pub version: String,
}
