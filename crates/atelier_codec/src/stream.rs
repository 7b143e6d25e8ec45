//! Byte-level helpers: base64 text and deflate streams.

use atelier_error::{CodecError, CodecErrorKind};
use base64::Engine as _;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use flate2::{Compression, Decompress, FlushDecompress, Status};
use std::io::Read;

/// Standard alphabet, padding optional on decode.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Minimum spare output capacity handed to the inflater per step.
const MIN_SPARE: usize = 16 * 1024;

/// Decode base64 text, ignoring embedded ASCII whitespace.
pub(crate) fn decode_base64(text: &str) -> Result<Vec<u8>, CodecError> {
    let compact: Vec<u8> = text
        .bytes()
        .filter(|byte| !byte.is_ascii_whitespace())
        .collect();
    LENIENT
        .decode(&compact)
        .map_err(|e| CodecError::new(CodecErrorKind::InvalidEncoding(e.to_string())))
}

/// Encode bytes as base64, converting `chunk_size` bytes per step.
///
/// The step is rounded down to a multiple of 3 so that no block but the
/// last needs padding and the concatenation equals a one-shot encode.
pub(crate) fn encode_base64_chunked(raw: &[u8], chunk_size: usize) -> String {
    let step = (chunk_size / 3).max(1) * 3;
    let mut text = String::with_capacity(raw.len().div_ceil(3) * 4);
    for block in raw.chunks(step) {
        STANDARD.encode_string(block, &mut text);
    }
    text
}

/// Inflate a compressed stream.
///
/// Accepts a zlib stream, a gzip member, or a bare deflate stream, picked by
/// inspecting the header. A stream that ends before its final block is an
/// error, not a short image.
pub(crate) fn inflate(compressed: &[u8]) -> Result<Vec<u8>, CodecError> {
    if compressed.starts_with(&GZIP_MAGIC) {
        let mut raw = Vec::new();
        flate2::read::GzDecoder::new(compressed)
            .read_to_end(&mut raw)
            .map_err(|e| CodecError::new(CodecErrorKind::Decompression(e.to_string())))?;
        return Ok(raw);
    }
    inflate_with(compressed, has_zlib_header(compressed))
}

fn has_zlib_header(bytes: &[u8]) -> bool {
    match bytes {
        [cmf, flg, ..] => (cmf & 0x0f) == 8 && ((u16::from(*cmf) << 8) | u16::from(*flg)) % 31 == 0,
        _ => false,
    }
}

fn inflate_with(compressed: &[u8], zlib_header: bool) -> Result<Vec<u8>, CodecError> {
    let mut inflater = Decompress::new(zlib_header);
    let mut raw = Vec::with_capacity(compressed.len().saturating_mul(2).max(MIN_SPARE));

    loop {
        if raw.capacity() - raw.len() < MIN_SPARE {
            raw.reserve(raw.capacity().max(MIN_SPARE));
        }
        let consumed = inflater.total_in() as usize;
        let produced = inflater.total_out();

        let status = inflater
            .decompress_vec(&compressed[consumed..], &mut raw, FlushDecompress::None)
            .map_err(|e| CodecError::new(CodecErrorKind::Decompression(e.to_string())))?;

        if matches!(status, Status::StreamEnd) {
            return Ok(raw);
        }
        if inflater.total_in() as usize == consumed && inflater.total_out() == produced {
            return Err(CodecError::new(CodecErrorKind::Decompression(format!(
                "stream truncated after {} of {} bytes",
                consumed,
                compressed.len()
            ))));
        }
    }
}

/// Compress bytes into a zlib stream.
pub(crate) fn deflate(raw: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut compressed = Vec::new();
    flate2::bufread::ZlibEncoder::new(raw, Compression::default())
        .read_to_end(&mut compressed)
        .map_err(|e| CodecError::new(CodecErrorKind::Compression(e.to_string())))?;
    Ok(compressed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunked_encoding_matches_one_shot() {
        let raw: Vec<u8> = (0..100_000u32).map(|i| (i % 251) as u8).collect();
        let one_shot = STANDARD.encode(&raw);

        for chunk_size in [1, 2, 3, 4, 1000, 32 * 1024, 1 << 20] {
            assert_eq!(encode_base64_chunked(&raw, chunk_size), one_shot, "chunk {}", chunk_size);
        }
    }

    #[test]
    fn chunked_encoding_of_empty_input() {
        assert_eq!(encode_base64_chunked(&[], 32 * 1024), "");
    }

    #[test]
    fn decode_ignores_whitespace_and_padding() {
        assert_eq!(decode_base64("aGVs\nbG8=").unwrap(), b"hello");
        assert_eq!(decode_base64("aGVsbG8").unwrap(), b"hello");
    }

    #[test]
    fn inflate_detects_container() {
        let raw = b"container detection".repeat(20);
        let zlib = deflate(&raw).unwrap();
        assert!(has_zlib_header(&zlib));
        assert_eq!(inflate(&zlib).unwrap(), raw);

        let mut bare = Vec::new();
        flate2::bufread::DeflateEncoder::new(&raw[..], Compression::fast())
            .read_to_end(&mut bare)
            .unwrap();
        assert_eq!(inflate(&bare).unwrap(), raw);

        let mut gzip = Vec::new();
        flate2::bufread::GzEncoder::new(&raw[..], Compression::fast())
            .read_to_end(&mut gzip)
            .unwrap();
        assert_eq!(inflate(&gzip).unwrap(), raw);
    }

    #[test]
    fn inflate_rejects_truncated_stream() {
        let raw: Vec<u8> = (0..50_000u32).map(|i| (i.wrapping_mul(2_654_435_761) >> 13) as u8).collect();
        let zlib = deflate(&raw).unwrap();
        let truncated = &zlib[..zlib.len() / 2];

        let err = inflate(truncated).unwrap_err();
        assert!(matches!(err.kind(), CodecErrorKind::Decompression(_)));
    }

    #[test]
    fn inflate_large_output_grows_buffer() {
        let raw = vec![7u8; 5 * 1024 * 1024];
        let zlib = deflate(&raw).unwrap();
        assert!(zlib.len() < raw.len() / 100);
        assert_eq!(inflate(&zlib).unwrap(), raw);
    }
}
