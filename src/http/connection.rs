use std::sync::Arc;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::config::{Config, ReadMode};
use crate::files::{Resolved, Resolver, serve_file};
use crate::http::parser::{ParseError, has_request_line, parse_request_line};
use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};
use crate::http::writer::ResponseWriter;

/// Why a worker gave up on its connection without completing a response.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// Nothing usable arrived; the connection is dropped with no reply.
    #[error("malformed request: {0}")]
    Malformed(#[from] ParseError),
    /// The transport failed mid-request.
    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),
}

/// Settings every worker needs, shared read-only across connections.
#[derive(Debug, Clone)]
pub struct Handler {
    pub resolver: Resolver,
    pub read_mode: ReadMode,
    pub max_request_bytes: usize,
}

impl Handler {
    pub fn new(cfg: &Config) -> Self {
        Self {
            resolver: Resolver::new(&cfg.static_files),
            read_mode: cfg.server.read_mode,
            max_request_bytes: cfg.server.max_request_bytes.max(1),
        }
    }
}

/// Summary of a completed exchange, for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Served {
    pub target: String,
    pub status: StatusCode,
    pub bytes: usize,
}

/// One accepted connection, serviced end to end by a single worker.
///
/// The stream is owned here and dropped exactly once when the connection
/// goes out of scope, whichever way `run` ends.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    state: ConnectionState,
    handler: Arc<Handler>,
}

pub enum ConnectionState {
    Reading,
    Resolving(Request),
    Writing(Request, Response),
    Closed(Served),
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, handler: Arc<Handler>) -> Self {
        let cap = handler.max_request_bytes;
        Self {
            stream,
            buffer: BytesMut::with_capacity(cap),
            state: ConnectionState::Reading,
            handler,
        }
    }

    pub async fn run(mut self) -> Result<Served, ConnectionError> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Reading) {
                ConnectionState::Reading => {
                    let request = self.read_request().await?;
                    tracing::debug!(
                        method = request.method.as_str(),
                        request_target = %request.target,
                        "Request line received"
                    );
                    self.state = ConnectionState::Resolving(request);
                }

                ConnectionState::Resolving(request) => {
                    let response = match self.handler.resolver.resolve(&request.target) {
                        Resolved::File(path) => serve_file(&path).await,
                        Resolved::Outside => {
                            tracing::warn!(request_target = %request.target, "Target escapes server root");
                            Response::not_found()
                        }
                    };
                    self.state = ConnectionState::Writing(request, response);
                }

                ConnectionState::Writing(request, response) => {
                    let mut writer = ResponseWriter::new(&response);
                    writer.write_to_stream(&mut self.stream).await?;
                    // Every byte is already flushed; a peer that resets now
                    // still got its response.
                    if let Err(e) = self.stream.shutdown().await {
                        tracing::debug!(error = %e, "Shutdown after complete response failed");
                    }

                    self.state = ConnectionState::Closed(Served {
                        target: request.target,
                        status: response.status,
                        bytes: writer.len(),
                    });
                }

                ConnectionState::Closed(served) => return Ok(served),
            }
        }
    }

    /// Collects the request line according to the configured read mode.
    async fn read_request(&mut self) -> Result<Request, ConnectionError> {
        let cap = self.handler.max_request_bytes;

        loop {
            let n = self.read_chunk(cap).await?;

            match self.handler.read_mode {
                ReadMode::Single => break,
                ReadMode::Line => {
                    if n == 0 || has_request_line(&self.buffer) {
                        break;
                    }
                    if self.buffer.len() >= cap {
                        return Err(ParseError::TooLarge(cap).into());
                    }
                }
            }
        }

        Ok(parse_request_line(&self.buffer)?)
    }

    /// One read of at most `cap - buffered` bytes. Returns 0 on peer close.
    async fn read_chunk(&mut self, cap: usize) -> std::io::Result<usize> {
        let start = self.buffer.len();
        self.buffer.resize(cap, 0);
        let result = self.stream.read(&mut self.buffer[start..]).await;
        let n = *result.as_ref().unwrap_or(&0);
        self.buffer.truncate(start + n);
        result
    }
}
