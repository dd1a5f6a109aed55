//! Drains a connection into a single request text.
//!
//! Bytes are read in fixed-size chunks until a short read (fewer bytes than the chunk
//! size) or end-of-stream. The accumulated bytes are decoded as utf-8 once at the end,
//! so a multi-byte character split across two chunks is kept intact; invalid sequences
//! are replaced rather than rejected.

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::trace;

use crate::ensure;
use crate::protocol::ParseError;

/// Size of a single read from the connection
pub const READ_CHUNK_SIZE: usize = 1024;

/// Default upper bound for a whole request message
pub const DEFAULT_MAX_MESSAGE_BYTES: usize = 64 * 1024;

/// Reads one request message from `reader`.
///
/// # Errors
///
/// - [`ParseError::Io`] if a read fails, the read is not retried
/// - [`ParseError::TooLargeMessage`] if more than `max_message_bytes` arrive before
///   the message ends
pub async fn read_message<R>(reader: &mut R, max_message_bytes: usize) -> Result<String, ParseError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = BytesMut::with_capacity(READ_CHUNK_SIZE);
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    loop {
        let n = reader.read(&mut chunk).await?;
        trace!(read_size = n, "read chunk from connection");

        buf.extend_from_slice(&chunk[..n]);
        ensure!(buf.len() <= max_message_bytes, ParseError::too_large_message(buf.len(), max_message_bytes));

        // zero means end of stream, anything short of a full chunk means the peer is done sending
        if n < READ_CHUNK_SIZE {
            break;
        }
    }

    Ok(String::from_utf8_lossy(&buf).into_owned())
}
