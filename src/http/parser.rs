use crate::http::request::Request;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing but NUL padding or whitespace was received
    Empty,
    /// The first line does not look like `METHOD RESOURCE HTTP/d.d`
    Malformed,
}

/// Parses the request line at the start of `buf`.
///
/// The bytes are decoded lossily, stripped of NUL padding and surrounding
/// whitespace, and only the first line is examined. Anything after the
/// protocol token on that line is ignored.
pub fn parse_request_line(buf: &[u8]) -> Result<Request, ParseError> {
    let text = String::from_utf8_lossy(buf);
    let text = text.trim_matches(|c: char| c == '\0' || c.is_whitespace());

    if text.is_empty() {
        return Err(ParseError::Empty);
    }

    let line = text.lines().next().ok_or(ParseError::Empty)?;
    let mut parts = line.split_whitespace();

    let method = parts.next().ok_or(ParseError::Malformed)?;
    let path = parts.next().ok_or(ParseError::Malformed)?;
    let version = parts.next().ok_or(ParseError::Malformed)?;

    if !is_method_token(method) || !is_version_token(version) {
        return Err(ParseError::Malformed);
    }

    Ok(Request {
        method: method.to_string(),
        path: path.to_string(),
        version: version.to_ascii_uppercase(),
    })
}

/// Position of the `\r\n\r\n` head terminator, if present.
pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|w| w == b"\r\n\r\n")
}

fn is_method_token(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphabetic())
}

// HTTP/d.d, prefix matched case-insensitively like the method
fn is_version_token(s: &str) -> bool {
    match s.as_bytes() {
        [prefix @ .., major, b'.', minor] if prefix.len() == 5 => {
            prefix.eq_ignore_ascii_case(b"HTTP/")
                && major.is_ascii_digit()
                && minor.is_ascii_digit()
        }
        _ => false,
    }
}
