use crate::error::frame::FrameError;

use common::ErrorLocation;

use std::panic::Location;

/// Size of the little-endian length prefix.
pub const LENGTH_PREFIX_LEN: usize = 4;

/// Largest message the browser accepts from a native host (1 MiB).
pub const MAX_OUTBOUND_FRAME_LEN: usize = 1024 * 1024;

/// Largest message the browser will send to a native host (64 MiB).
pub const MAX_INBOUND_FRAME_LEN: usize = 64 * 1024 * 1024;

/// Prefix `payload` with its length as a 4-byte little-endian integer.
///
/// # Errors
///
/// Returns [`FrameError::TooLarge`] when the payload exceeds
/// [`MAX_OUTBOUND_FRAME_LEN`]. The length is never truncated.
#[track_caller]
pub fn encode_frame(payload: &[u8]) -> Result<Vec<u8>, FrameError> {
    if payload.len() > MAX_OUTBOUND_FRAME_LEN {
        return Err(FrameError::TooLarge {
            len: payload.len() as u64,
            max: MAX_OUTBOUND_FRAME_LEN as u64,
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let len = u32::try_from(payload.len()).map_err(|_| FrameError::TooLarge {
        len: payload.len() as u64,
        max: u64::from(u32::MAX),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let mut frame = Vec::with_capacity(LENGTH_PREFIX_LEN + payload.len());
    frame.extend_from_slice(&len.to_le_bytes());
    frame.extend_from_slice(payload);
    Ok(frame)
}

/// Read the declared payload length out of a length prefix.
pub fn decode_length(prefix: [u8; LENGTH_PREFIX_LEN]) -> usize {
    u32::from_le_bytes(prefix) as usize
}

/// Decode one complete frame held in memory.
///
/// # Errors
///
/// Returns [`FrameError::Malformed`] when the buffer is shorter than its
/// prefix declares or carries trailing bytes.
#[track_caller]
pub fn decode_frame(frame: &[u8]) -> Result<Vec<u8>, FrameError> {
    let Some((prefix, payload)) = frame.split_first_chunk::<LENGTH_PREFIX_LEN>() else {
        return Err(FrameError::Malformed {
            message: format!("frame of {} bytes has no length prefix", frame.len()),
            location: ErrorLocation::from(Location::caller()),
        });
    };

    let declared = decode_length(*prefix);
    if payload.len() != declared {
        return Err(FrameError::Malformed {
            message: format!(
                "frame declares {declared} payload bytes but carries {}",
                payload.len()
            ),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(payload.to_vec())
}

/// Drop the outer delimiter pair (the quotes of the JSON string literal).
///
/// # Errors
///
/// Returns [`FrameError::Malformed`] for payloads shorter than two bytes.
#[track_caller]
pub fn strip_delimiters(payload: &[u8]) -> Result<&[u8], FrameError> {
    if payload.len() < 2 {
        return Err(FrameError::Malformed {
            message: format!(
                "payload of {} bytes cannot hold a delimiter pair",
                payload.len()
            ),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(&payload[1..payload.len() - 1])
}
