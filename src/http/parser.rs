use crate::http::request::{Method, Request};

/// Reasons a request line could not be parsed.
///
/// All of these are malformed requests: the connection is dropped without a
/// response and the server carries on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("peer closed before sending a request")]
    Empty,
    #[error("request is not valid UTF-8")]
    InvalidUtf8,
    #[error("request line has no target")]
    MissingTarget,
    #[error("request target {0:?} does not start with '/'")]
    InvalidTarget(String),
    #[error("request line exceeds {0} bytes")]
    TooLarge(usize),
}

/// Parses the request line out of the first block read from a connection.
///
/// The whole block must decode as UTF-8, headers included. Tokens on the first
/// line are separated by any whitespace; the second token is the target and
/// the third, if present, the version. The remaining lines are ignored.
pub fn parse_request_line(buf: &[u8]) -> Result<Request, ParseError> {
    if buf.is_empty() {
        return Err(ParseError::Empty);
    }

    let text = std::str::from_utf8(buf).map_err(|_| ParseError::InvalidUtf8)?;
    let line = text.split(['\r', '\n']).next().unwrap_or_default();

    let mut parts = line.split_whitespace();
    let method = parts.next().ok_or(ParseError::MissingTarget)?;
    let target = parts.next().ok_or(ParseError::MissingTarget)?;
    let version = parts.next().unwrap_or_default();

    if !target.starts_with('/') {
        return Err(ParseError::InvalidTarget(target.to_string()));
    }

    Ok(Request::new(Method::parse(method), target, version))
}

/// True once `buf` holds a complete request line.
pub fn has_request_line(buf: &[u8]) -> bool {
    find_line_end(buf).is_some()
}

fn find_line_end(buf: &[u8]) -> Option<usize> {
    buf.iter().position(|&b| b == b'\n' || b == b'\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let parsed = parse_request_line(req).unwrap();

        assert_eq!(parsed.method, Method::GET);
        assert_eq!(parsed.target, "/index.html");
        assert_eq!(parsed.version, "HTTP/1.1");
    }

    #[test]
    fn unterminated_line_is_still_parsed() {
        let parsed = parse_request_line(b"GET /a.txt HTTP/1.1").unwrap();
        assert_eq!(parsed.target, "/a.txt");
        assert!(!has_request_line(b"GET /a.txt HTTP/1.1"));
    }

    #[test]
    fn invalid_utf8_in_headers_is_malformed() {
        let result = parse_request_line(b"GET / HTTP/1.1\r\nX-Bad: \xff\xfe\r\n\r\n");
        assert_eq!(result, Err(ParseError::InvalidUtf8));
    }

    #[test]
    fn bare_carriage_return_ends_the_line() {
        let parsed = parse_request_line(b"GET /a.txt HTTP/1.1\rHost: x").unwrap();
        assert_eq!(parsed.target, "/a.txt");
        assert_eq!(parsed.version, "HTTP/1.1");
    }
}
