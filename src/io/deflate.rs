//! Output stage: zlib-framed deflate of the serialized tile.

use std::io::{Read, Write};

use anyhow::{Context, Result};
use flate2::read::ZlibDecoder;
use flate2::{Compress, Compression, FlushCompress, Status};

/// Compress `input` into a zlib stream, growing the output until the stream ends.
pub fn compress(input: &[u8], level: Compression) -> Result<Vec<u8>> {
    let mut deflate = Compress::new(level, true);
    let mut output = Vec::new();

    loop {
        output.reserve(input.len() / 2 + 1024);
        let consumed = deflate.total_in() as usize;
        let status = deflate.compress_vec(&input[consumed..], &mut output, FlushCompress::Finish)
            .context("[io::deflate] Failed to compress tile")?;
        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError => continue,
        }
    }

    log::debug!("[io::deflate] compressed {} bytes to {}", input.len(), output.len());
    Ok(output)
}

/// Inflate a zlib stream produced by [`compress`].
pub fn inflate(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(bytes);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)
        .context("[io::deflate] Failed to inflate tile")?;
    Ok(out)
}

/// Write compressed tile bytes to the sink, unframed.
pub fn write_tile<W: Write>(sink: &mut W, bytes: &[u8]) -> Result<()> {
    sink.write_all(bytes)
        .context("[io::deflate] Failed to write tile")?;
    sink.flush()
        .context("[io::deflate] Failed to flush tile sink")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_round_trips() {
        let compressed = compress(&[], Compression::default()).unwrap();
        assert!(!compressed.is_empty());
        assert!(inflate(&compressed).unwrap().is_empty());
    }

    #[test]
    fn repetitive_input_shrinks() {
        let input: Vec<u8> = (0..100_000u32).map(|i| (i % 7) as u8).collect();
        let compressed = compress(&input, Compression::best()).unwrap();
        assert!(compressed.len() < input.len() / 10);
        assert_eq!(inflate(&compressed).unwrap(), input);
    }

    #[test]
    fn incompressible_input_needs_several_rounds() {
        // xorshift noise: output ends up larger than the first reservation
        let mut state = 0x2545_f491u32;
        let input: Vec<u8> = (0..50_000)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                state as u8
            })
            .collect();
        let compressed = compress(&input, Compression::fast()).unwrap();
        assert_eq!(inflate(&compressed).unwrap(), input);
    }

    #[test]
    fn zlib_header_is_present() {
        let compressed = compress(b"tile", Compression::default()).unwrap();
        assert_eq!(compressed[0], 0x78);
    }

    #[test]
    fn garbage_fails_to_inflate() {
        assert!(inflate(b"not a zlib stream").is_err());
    }

    #[test]
    fn write_tile_writes_bytes_verbatim() {
        let mut sink = Vec::new();
        write_tile(&mut sink, &[1, 2, 3]).unwrap();
        assert_eq!(sink, vec![1, 2, 3]);
    }
}
