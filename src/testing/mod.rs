// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Helpers for exercising views and the wire format in tests.

use crate::{
    stream::{padding_len, SliceStream, SliceStreamMut, ALIGNMENT},
    view::{ByteView, ByteViewMut, ViewResult},
};

/// Returns the serialized size of a payload of `len` bytes, padding included
pub fn encoded_len(len: usize) -> usize {
    let unpadded = ALIGNMENT + len;
    unpadded + padding_len(unpadded, ALIGNMENT)
}

/// Serializes a view into a fresh buffer in the wire format
pub fn encode(view: &ByteView) -> ViewResult<Vec<u8>> {
    let mut bytes = vec![0; encoded_len(view.len())];
    let mut stream = SliceStreamMut::new(&mut bytes);
    view.write(&mut stream)?;
    assert_eq!(stream.remaining(), 0);
    Ok(bytes)
}

/// Deserializes `wire` into a view over `storage` and checks that the stream
/// was left on an alignment boundary
pub fn decode_into<'a>(wire: &[u8], storage: &'a mut [u8]) -> ViewResult<ByteViewMut<'a>> {
    let mut stream = SliceStream::new(wire);
    let mut view = ByteViewMut::new(storage);
    view.read(&mut stream)?;
    assert_eq!(
        stream.position() % ALIGNMENT,
        0,
        "stream cursor not aligned after read"
    );
    Ok(view)
}

/// Builds a buffer of `len` cycling bytes starting at `seed`
pub fn pattern(len: usize, seed: u8) -> Vec<u8> {
    (0..len).map(|i| (seed as usize + i) as u8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let payload = pattern(5, 1);
        let view = ByteView::new(&payload);
        let wire = encode(&view).unwrap();
        assert_eq!(wire.len(), 12);
        assert_eq!(wire, [0, 0, 0, 5, 1, 2, 3, 4, 5, 0, 0, 0]);

        let mut storage = [0u8; 5];
        let decoded = decode_into(&wire, &mut storage).unwrap();
        assert_eq!(decoded.as_slice(), &payload[..]);
    }

    #[test]
    fn encoded_len_is_padded() {
        assert_eq!(encoded_len(0), 4);
        assert_eq!(encoded_len(1), 8);
        assert_eq!(encoded_len(4), 8);
        assert_eq!(encoded_len(5), 12);
    }
}
