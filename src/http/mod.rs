//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.1 subset: one request line in, one response
//! out, then the connection closes.
//!
//! # Architecture
//!
//! - **`connection`**: The per-connection worker implementing the request-response state machine
//! - **`parser`**: Extracts the request line from the first bytes read
//! - **`request`**: HTTP request-line representation
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`mime`**: Content-Type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Read the request line (malformed → drop, no reply)
//!        └──────┬──────┘
//!               │ Request parsed
//!               ▼
//!        ┌──────────────────┐
//!        │    Resolving     │ ← Map target to a file, read it (200 or 404)
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │     Writing      │ ← Send every byte, then shut down
//!        └──────┬───────────┘
//!               ▼
//!             Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use docserve::config::Config;
//! use docserve::http::connection::{Connection, Handler};
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let handler = Arc::new(Handler::new(&Config::default()));
//!     let listener = TcpListener::bind("127.0.0.1:6789").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let handler = handler.clone();
//!         tokio::spawn(async move {
//!             if let Err(e) = Connection::new(socket, handler).run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
