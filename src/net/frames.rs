//! src/net/frames.rs
//!
//! Inbound frame codec: one frame is exactly N little-endian 32-bit floats,
//! no header. Anything else is transient noise and decodes to `None`.

use std::io::{self, Read};

/// Bytes per frame for an N-dimensional stream.
pub fn frame_len(dims: usize) -> usize {
    dims * 4
}

/// Decode one frame. A buffer whose length is not exactly `4 * dims` is
/// malformed and dropped (`None`), never an error.
pub fn decode(buf: &[u8], dims: usize) -> Option<Vec<f64>> {
    if buf.len() != frame_len(dims) {
        return None;
    }
    Some(
        buf.chunks_exact(4)
            .map(|c| f64::from(f32::from_le_bytes([c[0], c[1], c[2], c[3]])))
            .collect(),
    )
}

/// Read one fixed-size frame from a byte stream. `Ok(None)` on a clean EOF
/// at a frame boundary; an EOF mid-frame is an error (the peer vanished).
pub fn read_frame(reader: &mut impl Read, dims: usize) -> io::Result<Option<Vec<f64>>> {
    let mut buf = vec![0u8; frame_len(dims)];
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) if filled == 0 => return Ok(None),
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "eof mid-frame",
                ));
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(decode(&buf, dims))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(values: &[f32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn decodes_little_endian_floats() {
        let buf = encode(&[0.0, 1.5, -2.25]);
        assert_eq!(decode(&buf, 3), Some(vec![0.0, 1.5, -2.25]));
    }

    #[test]
    fn wrong_length_is_dropped() {
        let buf = encode(&[1.0, 2.0]);
        assert_eq!(decode(&buf, 3), None);
        assert_eq!(decode(&buf[..7], 2), None);
        assert_eq!(decode(&[], 1), None);
    }

    #[test]
    fn reads_consecutive_frames_from_a_stream() {
        let mut bytes = encode(&[1.0, 2.0]);
        bytes.extend(encode(&[3.0, 4.0]));
        let mut cursor = std::io::Cursor::new(bytes);
        assert_eq!(read_frame(&mut cursor, 2).unwrap(), Some(vec![1.0, 2.0]));
        assert_eq!(read_frame(&mut cursor, 2).unwrap(), Some(vec![3.0, 4.0]));
        assert_eq!(read_frame(&mut cursor, 2).unwrap(), None);
    }

    #[test]
    fn eof_mid_frame_is_an_error() {
        let bytes = encode(&[1.0, 2.0]);
        let mut cursor = std::io::Cursor::new(&bytes[..6]);
        assert!(read_frame(&mut cursor, 2).is_err());
    }
}
