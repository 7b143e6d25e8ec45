//! Round-trip tests: server payload -> display image -> upload file.

use atelier_codec::{Codec, CodecConfig, DecodeOutcome, DisplayImage, decode, encode_payload, reencode};
use atelier_core::EncodedImage;

fn sample_jpeg(len: usize) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
    bytes.extend((0..len as u32).map(|i| (i.wrapping_mul(31).wrapping_add(i >> 7)) as u8));
    bytes.extend([0xFF, 0xD9]);
    bytes
}

#[test]
fn test_round_trip_recovers_raw_bytes() {
    let raw = sample_jpeg(4_000);
    let payload = encode_payload(&raw).unwrap();

    let display = decode(&payload).into_image().unwrap();
    let file = reencode(&display, "banner").unwrap();

    assert_eq!(file.bytes(), &raw);
    assert_eq!(file.mime_type(), "image/jpeg");
    assert_eq!(file.name(), "banner.jpg");
}

#[test]
fn test_round_trip_large_payload_crosses_chunk_boundaries() {
    let raw = sample_jpeg(300_000);
    let payload = encode_payload(&raw).unwrap();

    for chunk_size in [3, 1024, 32 * 1024, 100_001] {
        let codec = Codec::new(CodecConfig::default().with_chunk_size(chunk_size));
        let display = codec.decode(&payload).into_image().unwrap();
        let file = codec.reencode(&display, "large").unwrap();
        assert_eq!(file.bytes(), &raw, "chunk size {}", chunk_size);
    }
}

#[test]
fn test_decode_is_pure() {
    let payload = encode_payload(&sample_jpeg(512)).unwrap();
    let codec = Codec::default();

    let first = codec.decode(&payload);
    let second = codec.decode(&payload);

    assert_eq!(first, second);
    let (a, b) = (first.image().unwrap(), second.image().unwrap());
    assert_eq!(a.mime_type(), b.mime_type());
    assert_eq!(a.base64(), b.base64());
}

#[test]
fn test_decode_uses_configured_mime_type() {
    let codec = Codec::new(CodecConfig::default().with_mime_type("image/png"));
    let payload = encode_payload(b"\x89PNG\r\n\x1a\n").unwrap();

    let display = codec.decode(&payload).into_image().unwrap();
    assert_eq!(display.mime_type(), "image/png");
    assert!(display.data_uri().starts_with("data:image/png;base64,"));

    let file = codec.reencode(&display, "logo").unwrap();
    assert_eq!(file.name(), "logo.png");
}

#[test]
fn test_data_uri_round_trip() {
    let raw = sample_jpeg(64);
    let payload = encode_payload(&raw).unwrap();
    let display = decode(&payload).into_image().unwrap();

    let parsed = DisplayImage::from_data_uri(&display.data_uri()).unwrap();
    assert_eq!(&parsed, display.as_ref());

    let file = Codec::default()
        .reencode_data_uri(&display.data_uri(), "from-uri")
        .unwrap();
    assert_eq!(file.bytes(), &raw);
}

#[test]
fn test_payload_with_line_breaks_decodes() {
    let raw = sample_jpeg(2_000);
    let payload = encode_payload(&raw).unwrap();
    let wrapped: String = payload
        .as_str()
        .as_bytes()
        .chunks(76)
        .map(|line| std::str::from_utf8(line).unwrap())
        .collect::<Vec<_>>()
        .join("\r\n");

    let outcome = decode(&EncodedImage::from(wrapped));
    let file = reencode(outcome.image().unwrap(), "wrapped").unwrap();
    assert_eq!(file.bytes(), &raw);
}

#[test]
fn test_empty_outcome_is_not_malformed() {
    let outcome = decode(&EncodedImage::from("   "));
    assert_eq!(outcome, DecodeOutcome::Empty);
    assert!(!outcome.is_malformed());
    assert!(outcome.error().is_none());
}
