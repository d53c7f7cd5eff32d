use crate::error::frame::FrameError;
use crate::native_messaging::codec::encode_frame;

use log::debug;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Writes length-prefixed frames to an async byte stream.
pub struct FrameWriter<W> {
    inner: W,
}

impl<W: AsyncWrite + Unpin> FrameWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Encode `payload`, write it and flush, so the browser sees the whole
    /// frame before the next one is produced.
    pub async fn write_frame(&mut self, payload: &[u8]) -> Result<(), FrameError> {
        let frame = encode_frame(payload)?;
        self.inner.write_all(&frame).await?;
        self.inner.flush().await?;
        debug!("Wrote frame of {} bytes", payload.len());
        Ok(())
    }
}
