//! One-shot HTTP/1.1 GET client.
//!
//! Sends a single request with `Connection: close` and reads until the peer
//! hangs up. No response parsing is needed to collect the bytes; the helpers
//! at the bottom pick the result apart afterwards.

use std::net::SocketAddr;

use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

const BUFFER_SIZE: usize = 1024;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("unable to resolve hostname {host}: {reason}")]
    Resolve { host: String, reason: String },
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fetches `target` from `host:port` and returns the raw response bytes.
///
/// Every resolved address is tried in turn until one accepts the connection.
pub async fn fetch(host: &str, port: u16, target: &str) -> Result<Vec<u8>, ClientError> {
    let addrs: Vec<SocketAddr> = tokio::net::lookup_host((host, port))
        .await
        .map_err(|e| ClientError::Resolve {
            host: host.to_string(),
            reason: e.to_string(),
        })?
        .collect();

    let mut stream = connect_any(host, &addrs).await?;
    tracing::debug!(host, port, peer = ?stream.peer_addr().ok(), "Connected");

    let request = build_request(host, target);
    stream.write_all(&request).await?;
    stream.flush().await?;

    let mut buffer = BytesMut::with_capacity(BUFFER_SIZE);
    loop {
        let n = stream.read_buf(&mut buffer).await?;
        if n == 0 {
            break;
        }
    }

    tracing::debug!(bytes = buffer.len(), "Response received");
    Ok(buffer.to_vec())
}

async fn connect_any(host: &str, addrs: &[SocketAddr]) -> Result<TcpStream, ClientError> {
    let mut last_error = None;

    for &addr in addrs {
        match TcpStream::connect(addr).await {
            Ok(stream) => return Ok(stream),
            Err(source) => {
                tracing::debug!(%addr, error = %source, "Connect attempt failed");
                last_error = Some(ClientError::Connect { addr, source });
            }
        }
    }

    Err(last_error.unwrap_or_else(|| ClientError::Resolve {
        host: host.to_string(),
        reason: "no addresses found".to_string(),
    }))
}

/// Makes `target` start with exactly one `/`. An empty target becomes `/`.
///
/// # Example
///
/// ```
/// # use docserve::client::normalize_target;
/// assert_eq!(normalize_target(""), "/");
/// assert_eq!(normalize_target("index.html"), "/index.html");
/// assert_eq!(normalize_target("//a/b"), "/a/b");
/// ```
pub fn normalize_target(target: &str) -> String {
    format!("/{}", target.trim_start_matches('/'))
}

/// Builds the request bytes: request line, `Host`, `Connection: close`.
pub fn build_request(host: &str, target: &str) -> Vec<u8> {
    format!(
        "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        normalize_target(target),
        host
    )
    .into_bytes()
}

/// Splits a raw response into head and body at the first blank line.
pub fn split_response(raw: &[u8]) -> Option<(&[u8], &[u8])> {
    raw.windows(4)
        .position(|window| window == b"\r\n\r\n")
        .map(|end| (&raw[..end], &raw[end + 4..]))
}

/// Reads the numeric status code from the status line.
pub fn status_code(raw: &[u8]) -> Option<u16> {
    let line_end = raw.iter().position(|&b| b == b'\r' || b == b'\n')?;
    let line = std::str::from_utf8(&raw[..line_end]).ok()?;
    line.split_whitespace().nth(1)?.parse().ok()
}
