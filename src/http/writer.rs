use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

/// Serializes a response: status line, headers in order, blank line, body.
pub fn serialize_response(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::with_capacity(128 + resp.body.len());

    buf.extend_from_slice(resp.status_line().as_bytes());
    buf.extend_from_slice(b"\r\n");

    for (k, v) in &resp.headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    buf.extend_from_slice(&resp.body);

    buf
}

/// Writes one serialized response, retrying short writes until every byte
/// has been accepted by the transport.
pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::WriteZero,
                    "connection closed while writing",
                ));
            }

            self.written += n;
        }

        stream.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_then_headers_then_body() {
        let resp = Response::ok("text/html", b"<h1>hi</h1>".to_vec());
        let bytes = serialize_response(&resp);

        assert_eq!(
            bytes,
            b"HTTP/1.1 200 OK\r\n\
              Content-Type: text/html\r\n\
              Content-Length: 11\r\n\
              Connection: close\r\n\
              \r\n\
              <h1>hi</h1>"
                .to_vec()
        );
    }

    #[tokio::test]
    async fn writes_everything_into_a_small_pipe() {
        let resp = Response::ok("application/octet-stream", vec![7u8; 64 * 1024]);
        let mut writer = ResponseWriter::new(&resp);
        let expected = writer.len();

        // A 512-byte duplex forces many short writes.
        let (mut tx, mut rx) = tokio::io::duplex(512);
        let reader = tokio::spawn(async move {
            let mut out = Vec::new();
            tokio::io::AsyncReadExt::read_to_end(&mut rx, &mut out)
                .await
                .unwrap();
            out
        });

        writer.write_to_stream(&mut tx).await.unwrap();
        drop(tx);

        let out = reader.await.unwrap();
        assert_eq!(out.len(), expected);
        assert!(out.ends_with(&[7u8; 16]));
    }
}
