use crate::error::frame::FrameError;
use crate::native_messaging::codec::{LENGTH_PREFIX_LEN, MAX_INBOUND_FRAME_LEN, decode_length};

use common::ErrorLocation;

use std::io::ErrorKind;
use std::panic::Location;

use log::{debug, warn};
use tokio::io::{AsyncRead, AsyncReadExt};

/// Reads length-prefixed frames from an async byte stream.
pub struct FrameReader<R> {
    inner: R,
}

impl<R: AsyncRead + Unpin> FrameReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Read the next frame payload, blocking until one is available.
    ///
    /// The full 4-byte little-endian prefix sizes the read. For every length
    /// up to 255 this is the same as reading only the first prefix byte.
    ///
    /// A zero-length frame yields an empty payload.
    ///
    /// # Errors
    ///
    /// - [`FrameError::NotReady`] when the stream is at end-of-input before a
    ///   prefix starts; no bytes were consumed
    /// - [`FrameError::TooLarge`] when the prefix exceeds
    ///   [`MAX_INBOUND_FRAME_LEN`]; the payload is drained so the next call
    ///   starts on a frame boundary
    /// - [`FrameError::Malformed`] when the stream ends inside a frame
    pub async fn next_frame(&mut self) -> Result<Vec<u8>, FrameError> {
        let prefix = self.read_prefix().await?;
        let len = decode_length(prefix);

        if len > MAX_INBOUND_FRAME_LEN {
            warn!("Discarding oversized frame of {len} bytes");
            self.discard(len as u64).await?;
            return Err(FrameError::TooLarge {
                len: len as u64,
                max: MAX_INBOUND_FRAME_LEN as u64,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let mut payload = vec![0u8; len];
        match self.inner.read_exact(&mut payload).await {
            Ok(_) => {
                debug!("Read frame of {len} bytes");
                Ok(payload)
            }
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(FrameError::Malformed {
                message: format!("stream ended inside a {len} byte frame"),
                location: ErrorLocation::from(Location::caller()),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn read_prefix(&mut self) -> Result<[u8; LENGTH_PREFIX_LEN], FrameError> {
        let mut prefix = [0u8; LENGTH_PREFIX_LEN];
        let mut filled = 0;

        while filled < LENGTH_PREFIX_LEN {
            let read = self.inner.read(&mut prefix[filled..]).await?;
            if read == 0 {
                if filled == 0 {
                    return Err(FrameError::NotReady {
                        message: "end of input before next frame".to_string(),
                        location: ErrorLocation::from(Location::caller()),
                    });
                }
                return Err(FrameError::Malformed {
                    message: format!("stream ended after {filled} length prefix bytes"),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            filled += read;
        }

        Ok(prefix)
    }

    async fn discard(&mut self, len: u64) -> Result<(), FrameError> {
        let mut limited = (&mut self.inner).take(len);
        let drained = tokio::io::copy(&mut limited, &mut tokio::io::sink()).await?;
        if drained < len {
            return Err(FrameError::Malformed {
                message: format!("stream ended after {drained} of {len} discarded bytes"),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }
}
