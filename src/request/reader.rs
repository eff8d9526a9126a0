//! Pull-based driver feeding transport bytes into the request parser.

use tokio::io::{AsyncRead, AsyncReadExt};

use super::{Request, RequestError};

/// Initial staging buffer size; it doubles whenever the residue fills it.
pub const DEFAULT_BUFFER_SIZE: usize = 8;

/// Read one request from `reader` using the default staging buffer.
pub async fn request_from_reader<R>(reader: &mut R) -> Result<Request, RequestError>
where
    R: AsyncRead + Unpin,
{
    request_from_reader_with_capacity(reader, DEFAULT_BUFFER_SIZE).await
}

/// Read one request from `reader`, starting with a `capacity`-byte buffer.
///
/// End-of-stream before the request is complete is not an error: the
/// request is marked done with whatever was parsed so far.
pub async fn request_from_reader_with_capacity<R>(
    reader: &mut R,
    capacity: usize,
) -> Result<Request, RequestError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; capacity.max(1)];
    let mut filled = 0;
    let mut request = Request::new();

    while !request.is_done() {
        if filled >= buf.len() {
            let grown = buf.len() * 2;
            buf.resize(grown, 0);
            tracing::trace!(capacity = grown, "Staging buffer grown");
        }

        let read = reader.read(&mut buf[filled..]).await?;
        filled += read;

        let parsed = request.parse(&buf[..filled])?;
        buf.copy_within(parsed..filled, 0);
        filled -= parsed;

        // Bytes from the final read are parsed above before EOF is honoured.
        if read == 0 {
            if !request.is_done() {
                tracing::debug!(
                    state = ?request.state(),
                    body_len = request.body.len(),
                    "End of stream before request completed"
                );
            }
            request.finish();
        }
    }

    Ok(request)
}
