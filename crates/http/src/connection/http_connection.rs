use std::sync::Arc;

use futures::SinkExt;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio_util::codec::FramedWrite;
use tracing::{debug, error, info, warn};

use crate::codec::{decode_request, read_message, ResponseEncoder, DEFAULT_MAX_MESSAGE_BYTES};
use crate::handler::{ErrorStatus, Handler};
use crate::protocol::{HttpError, ParseError, Request, Response};

/// An HTTP connection that serves exactly one request
///
/// `HttpConnection` walks a connection through its whole life:
///
/// `Accepted -> Reading -> Decoding -> Dispatching -> Writing -> Closed`
///
/// - a read failure closes the connection without writing anything
/// - a decoding or handler failure is answered with an error response
/// - the write half is shut down once, whichever path was taken; the connection is
///   never reused for a second request
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
/// * `W`: The async writable stream type
///
#[derive(Debug)]
pub struct HttpConnection<R, W> {
    reader: R,
    framed_write: FramedWrite<W, ResponseEncoder>,
    max_message_bytes: usize,
}

impl<R, W> HttpConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            framed_write: FramedWrite::new(writer, ResponseEncoder::new()),
            max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES,
        }
    }

    /// Limits the size of the request message, see [`read_message`].
    #[must_use]
    pub fn with_max_message_bytes(mut self, max_message_bytes: usize) -> Self {
        self.max_message_bytes = max_message_bytes;
        self
    }

    /// Reads, handles and answers a single request, then closes the connection.
    ///
    /// # Errors
    ///
    /// Returns the read or decoding error of the request, or the error writing the
    /// response. Handler errors are answered with an error response and are not
    /// returned.
    pub async fn process<H>(mut self, handler: Arc<H>) -> Result<(), HttpError>
    where
        H: Handler,
    {
        let result = self.do_process(handler.as_ref()).await;

        if let Err(e) = self.framed_write.get_mut().shutdown().await {
            debug!(cause = %e, "shutdown connection failed");
        }

        result
    }

    async fn do_process<H>(&mut self, handler: &H) -> Result<(), HttpError>
    where
        H: Handler,
    {
        let request = match self.read_request().await {
            Ok(request) => request,
            Err(e @ ParseError::Io { .. }) => {
                error!(cause = %e, "can't read request, close connection");
                return Err(e.into());
            }
            Err(e) => {
                warn!(cause = %e, "can't decode request");
                let mut response = Response::new();
                response.fail(e.status(), e.message());
                self.send_response(response).await?;
                return Err(e.into());
            }
        };

        let mut response = Response::new();
        if let Err(e) = handler.call(&request, &mut response).await {
            error!(method = %request.method(), path = request.path(), cause = %e, "handle request error");
            response.fail(e.status(), e.message());
        }

        info!(method = %request.method(), path = request.path(), status = response.status().as_u16(), "request handled");
        self.send_response(response).await
    }

    async fn read_request(&mut self) -> Result<Request, ParseError> {
        let text = read_message(&mut self.reader, self.max_message_bytes).await?;
        decode_request(&text)
    }

    async fn send_response(&mut self, response: Response) -> Result<(), HttpError> {
        // `send` flushes, the response is the last thing written on this connection
        self.framed_write.send(response).await?;
        Ok(())
    }
}
