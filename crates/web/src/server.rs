//! The accept loop.
//!
//! A [`Server`] owns the [`Router`] and hands it to one task per accepted connection.
//! The loop keeps accepting until [`Server::close`] is called; connections already
//! accepted at that point are served to the end.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use relay_http::codec::DEFAULT_MAX_MESSAGE_BYTES;
use relay_http::connection::HttpConnection;
use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::router::Router;

#[derive(Debug)]
pub struct ServerBuilder {
    router: Option<Router>,
    host: IpAddr,
    max_message_bytes: usize,
}

impl ServerBuilder {
    fn new() -> Self {
        Self { router: None, host: IpAddr::V4(Ipv4Addr::UNSPECIFIED), max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES }
    }

    #[must_use]
    pub fn router(mut self, router: Router) -> Self {
        self.router = Some(router);
        self
    }

    /// Address [`Server::listen`] binds to, `0.0.0.0` by default.
    #[must_use]
    pub fn host(mut self, host: impl Into<IpAddr>) -> Self {
        self.host = host.into();
        self
    }

    /// Upper bound of a single request message, 64 KiB by default.
    #[must_use]
    pub fn max_message_bytes(mut self, max_message_bytes: usize) -> Self {
        self.max_message_bytes = max_message_bytes;
        self
    }

    /// # Errors
    ///
    /// Returns [`ServerBuildError::MissingRouter`] if no router was set.
    pub fn build(self) -> Result<Server, ServerBuildError> {
        let router = self.router.ok_or(ServerBuildError::MissingRouter)?;
        Ok(Server {
            router: Arc::new(router),
            host: self.host,
            max_message_bytes: self.max_message_bytes,
            shutdown: CancellationToken::new(),
        })
    }
}

#[derive(Error, Debug)]
pub enum ServerBuildError {
    #[error("router must be set")]
    MissingRouter,
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("can't bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug)]
pub struct Server {
    router: Arc<Router>,
    host: IpAddr,
    max_message_bytes: usize,
    shutdown: CancellationToken,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    /// Binds the configured host on `port` and serves until the server is closed.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Bind`] if the address can't be bound.
    pub async fn listen(&self, port: u16) -> Result<(), ServerError> {
        let address = SocketAddr::new(self.host, port);
        let listener = TcpListener::bind(address).await.map_err(|source| ServerError::Bind { address, source })?;
        self.serve(listener).await;
        Ok(())
    }

    /// Accepts connections from `listener` until the server is closed.
    ///
    /// Accept failures are logged and the loop goes on.
    pub async fn serve(&self, listener: TcpListener) {
        match listener.local_addr() {
            Ok(address) => info!(%address, "start listening"),
            Err(e) => warn!(cause = %e, "start listening at unknown address"),
        }

        loop {
            let accepted = tokio::select! {
                biased;
                () = self.shutdown.cancelled() => break,
                accepted = listener.accept() => accepted,
            };

            match accepted {
                Ok((tcp_stream, remote_addr)) => {
                    debug!(%remote_addr, "accept connection");
                    self.spawn_connection(tcp_stream);
                }
                Err(e) => warn!(cause = %e, "failed to accept"),
            }
        }

        info!("server closed, stop accepting connections");
    }

    fn spawn_connection(&self, tcp_stream: TcpStream) {
        let router = Arc::clone(&self.router);
        let max_message_bytes = self.max_message_bytes;

        tokio::spawn(async move {
            let (reader, writer) = tcp_stream.into_split();
            let connection = HttpConnection::new(reader, writer).with_max_message_bytes(max_message_bytes);
            match connection.process(router).await {
                Ok(()) => debug!("finished process, connection shutdown"),
                Err(e) => error!(cause = %e, "service has error, connection shutdown"),
            }
        });
    }

    /// Stops the accept loop. Once closed a server stays closed, a later
    /// [`Server::listen`] returns right after binding.
    pub fn close(&self) {
        self.shutdown.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    pub fn router(&self) -> &Router {
        &self.router
    }
}
