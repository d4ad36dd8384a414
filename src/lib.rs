//! Docserve - minimal HTTP/1.1 file server and client
//!
//! Core library for request handling, file serving and the fetch client.

pub mod client;
pub mod config;
pub mod files;
pub mod http;
pub mod server;
