use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::{JoinError, JoinSet};
use tracing::{Instrument, error, info, info_span, warn};

use crate::config::Config;
use crate::http::connection::{Connection, ConnectionError, Handler};

/// A bound listening socket plus everything its workers share.
pub struct Server {
    listener: TcpListener,
    handler: Arc<Handler>,
    limit: Option<Arc<Semaphore>>,
}

impl Server {
    /// Binds the configured address with the configured backlog.
    pub async fn bind(cfg: &Config) -> anyhow::Result<Self> {
        let addr = tokio::net::lookup_host(&cfg.server.listen_addr)
            .await
            .with_context(|| format!("invalid listen address {}", cfg.server.listen_addr))?
            .next()
            .with_context(|| format!("no address for {}", cfg.server.listen_addr))?;

        let socket = if addr.is_ipv4() {
            TcpSocket::new_v4()?
        } else {
            TcpSocket::new_v6()?
        };
        socket.set_reuseaddr(true)?;
        socket
            .bind(addr)
            .with_context(|| format!("failed to bind {}", addr))?;
        let listener = socket.listen(cfg.backlog())?;

        Ok(Self {
            listener,
            handler: Arc::new(Handler::new(cfg)),
            limit: cfg
                .server
                .max_connections
                .map(|n| Arc::new(Semaphore::new(n))),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections until the listening socket fails.
    ///
    /// Each connection gets its own task in a `JoinSet`; finished tasks are
    /// reaped as the loop goes. On an accept error the listener is released
    /// and the remaining workers are aborted rather than drained.
    pub async fn run(self) -> anyhow::Result<()> {
        let Server {
            listener,
            handler,
            limit,
        } = self;
        let mut workers = JoinSet::new();

        info!(
            addr = %listener.local_addr()?,
            root = %handler.resolver.root().display(),
            "Listening"
        );

        loop {
            let permit = match &limit {
                Some(sem) => Some(sem.clone().acquire_owned().await?),
                None => None,
            };

            tokio::select! {
                accepted = listener.accept() => {
                    let (socket, peer) = match accepted {
                        Ok(pair) => pair,
                        Err(e) => {
                            error!(error = %e, live_workers = workers.len(), "Accept failed, shutting down");
                            workers.abort_all();
                            return Err(e).context("accept failed");
                        }
                    };
                    info!("Accepted connection from {}", peer);
                    workers.spawn(
                        serve(socket, handler.clone(), permit)
                            .instrument(info_span!("conn", %peer)),
                    );
                }

                Some(joined) = workers.join_next(), if !workers.is_empty() => {
                    reap(joined);
                }
            }
        }
    }
}

/// Binds per `cfg` and serves until the listener fails.
pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    Server::bind(cfg).await?.run().await
}

/// Worker body. Every outcome ends here; nothing propagates to the accept loop.
async fn serve(socket: TcpStream, handler: Arc<Handler>, _permit: Option<OwnedSemaphorePermit>) {
    match Connection::new(socket, handler).run().await {
        Ok(served) => info!(
            status = served.status.as_u16(),
            request_target = %served.target,
            bytes = served.bytes,
            "Request served"
        ),
        Err(ConnectionError::Malformed(e)) => warn!(error = %e, "Dropping malformed request"),
        Err(ConnectionError::Io(e)) => error!(error = %e, "Connection error"),
    }
}

fn reap(joined: Result<(), JoinError>) {
    match joined {
        Err(e) if e.is_panic() => error!(error = %e, "Worker panicked"),
        _ => {}
    }
}
