//! Native-messaging framing over stdio.
//!
//! Every message exchanged with the browser is a 4-byte little-endian length
//! followed by that many payload bytes. Messages from the extension carry a
//! JSON string literal (the command object stringified once more), so the
//! payload starts and ends with a quote character.
//!
//! - [`codec`]: pure encode/decode of a single frame
//! - [`FrameReader`]: pulls frames off an async byte stream
//! - [`FrameWriter`]: pushes frames onto an async byte stream

pub mod codec;
mod reader;
mod writer;

pub use codec::{
    LENGTH_PREFIX_LEN, MAX_INBOUND_FRAME_LEN, MAX_OUTBOUND_FRAME_LEN, decode_frame, encode_frame,
    strip_delimiters,
};
pub use reader::FrameReader;
pub use writer::FrameWriter;
