use docserve::http::response::{NOT_FOUND_BODY, Response, ResponseBuilder, StatusCode};
use docserve::http::writer::serialize_response;

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
}

#[test]
fn test_response_builder_basic() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .body(b"Hello, World!".to_vec())
        .build();

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.body, b"Hello, World!".to_vec());
    assert_eq!(response.header("Content-Length"), Some("13"));
    assert_eq!(response.header("Connection"), Some("close"));
}

#[test]
fn test_response_header_lookup_is_case_insensitive() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/html")
        .build();

    assert_eq!(response.header("content-type"), Some("text/html"));
    assert_eq!(response.header("CONTENT-TYPE"), Some("text/html"));
    assert_eq!(response.header("X-Missing"), None);
}

#[test]
fn test_response_builder_replaces_header_ignoring_case() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("content-type", "text/plain")
        .header("Content-Type", "text/html")
        .build();

    let content_types = response
        .headers
        .iter()
        .filter(|(k, _)| k.eq_ignore_ascii_case("content-type"))
        .count();
    assert_eq!(content_types, 1);
    assert_eq!(response.header("Content-Type"), Some("text/html"));
}

#[test]
fn test_response_builder_content_length_matches_body() {
    // A stale Content-Length is overwritten with the real body length
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Length", "999")
        .body(b"test".to_vec())
        .build();

    assert_eq!(response.header("Content-Length"), Some("4"));
}

#[test]
fn test_response_builder_empty_body() {
    let response = ResponseBuilder::new(StatusCode::Ok).build();

    assert_eq!(response.body.len(), 0);
    assert_eq!(response.header("Content-Length"), Some("0"));
}

#[test]
fn test_response_ok_helper() {
    let response = Response::ok("text/html", b"<h1>hi</h1>".to_vec());

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.header("Content-Type"), Some("text/html"));
    assert_eq!(response.body, b"<h1>hi</h1>".to_vec());
}

#[test]
fn test_response_not_found_helper() {
    let response = Response::not_found();

    assert_eq!(response.status, StatusCode::NotFound);
    assert_eq!(response.header("Content-Type"), Some("text/html"));
    assert_eq!(response.body, NOT_FOUND_BODY.to_vec());
    assert!(!response.body.is_empty());
}

#[test]
fn test_response_status_line() {
    assert_eq!(Response::ok("text/html", Vec::new()).status_line(), "HTTP/1.1 200 OK");
    assert_eq!(Response::not_found().status_line(), "HTTP/1.1 404 Not Found");
}

#[test]
fn test_serialized_not_found() {
    let bytes = serialize_response(&Response::not_found());
    let text = String::from_utf8(bytes).unwrap();

    assert!(text.starts_with("HTTP/1.1 404 Not Found\r\n"));
    assert!(text.contains("Content-Type: text/html\r\n"));
    assert!(text.ends_with("\r\n\r\n<html><body><h1>404 Not Found</h1></body></html>"));
}
