/// HTTP request methods.
///
/// Only GET is served. Any other token is kept verbatim for logging and the
/// connection handler treats it like GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// Anything else, kept verbatim
    Other(String),
}

/// A parsed HTTP request line.
///
/// Created per accepted connection and discarded once the response is sent.
/// `target` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The HTTP method
    pub method: Method,
    /// The raw request-target as received (e.g., "/index.html")
    pub target: String,
    /// HTTP version, empty when the client omitted it
    pub version: String,
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// Matching is case-sensitive; unknown tokens become [`Method::Other`].
    ///
    /// # Example
    ///
    /// ```
    /// # use docserve::http::request::Method;
    /// assert_eq!(Method::parse("GET"), Method::GET);
    /// assert_eq!(Method::parse("get"), Method::Other("get".to_string()));
    /// ```
    pub fn parse(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::Other(s) => s,
        }
    }
}

impl Request {
    pub fn new(method: Method, target: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            method,
            target: target.into(),
            version: version.into(),
        }
    }
}
