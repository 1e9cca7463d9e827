use bytes::Bytes;

/// Value of the fixed `Server` header.
pub const SERVER_NAME: &str = "Simple Http Server 1.0";

/// Protocol token used when no request version is available.
pub const DEFAULT_VERSION: &str = "HTTP/1.1";

/// HTTP status codes the server can produce.
///
/// - `Ok` (200): File served
/// - `NotFound` (404): No regular file at the resolved path
/// - `UnsupportedMediaType` (415): File exists but its extension is unregistered
/// - `InternalServerError` (500): File exists but could not be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 404 Not Found
    NotFound,
    /// 415 Unsupported Media Type
    UnsupportedMediaType,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use lantern::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::UnsupportedMediaType.as_u16(), 415);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NotFound => 404,
            StatusCode::UnsupportedMediaType => 415,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotFound => "Not Found",
            StatusCode::UnsupportedMediaType => "Unsupported Media Type",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

/// A complete response: framing fields plus the body that follows the head.
///
/// The head always carries, in order: status line, `Server`, `Content-Type`,
/// `Content-Length` and a blank line, each terminated by CRLF.
#[derive(Debug, Clone)]
pub struct Response {
    /// Protocol token echoed from the request
    pub version: String,
    /// The HTTP status code
    pub status: StatusCode,
    /// Value of the `Content-Type` header
    pub content_type: String,
    /// Response body as bytes
    pub body: Bytes,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// # use lantern::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .version("HTTP/1.0")
///     .content_type("text/css")
///     .body("p {}")
///     .build();
/// assert_eq!(response.content_length(), 4);
/// ```
pub struct ResponseBuilder {
    version: String,
    status: StatusCode,
    content_type: String,
    body: Bytes,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            status,
            content_type: "text/html;charset=utf-8".to_string(),
            body: Bytes::new(),
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Response {
        Response {
            version: self.version,
            status: self.status,
            content_type: self.content_type,
            body: self.body,
        }
    }
}

impl Response {
    /// `Content-Length` is always derived from the body, never set separately.
    pub fn content_length(&self) -> usize {
        self.body.len()
    }

    /// Serializes the response head (everything before the body).
    pub fn head_bytes(&self) -> Vec<u8> {
        build_head(
            &self.version,
            self.status,
            &self.content_type,
            self.content_length(),
        )
    }
}

/// Composes the status line and fixed headers for a body of `content_length` bytes.
pub fn build_head(
    version: &str,
    status: StatusCode,
    content_type: &str,
    content_length: usize,
) -> Vec<u8> {
    format!(
        "{} {} {}\r\nServer: {}\r\nContent-Type: {}\r\nContent-Length: {}\r\n\r\n",
        version,
        status.as_u16(),
        status.reason_phrase(),
        SERVER_NAME,
        content_type,
        content_length,
    )
    .into_bytes()
}
