//! Malformed payloads degrade to "no image" instead of failing.

use atelier_codec::{Codec, CodecErrorKind, DecodeOutcome, DisplayImage, decode, encode_payload};
use atelier_core::EncodedImage;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

#[test]
fn test_invalid_base64_is_malformed() {
    let outcome = decode(&EncodedImage::from("not-valid-base64!!"));

    assert!(outcome.image().is_none());
    assert!(matches!(
        outcome.error().map(|e| e.kind()),
        Some(CodecErrorKind::InvalidEncoding(_))
    ));
}

#[test]
fn test_empty_payload_is_empty() {
    assert_eq!(decode(&EncodedImage::from("")), DecodeOutcome::Empty);
}

#[test]
fn test_valid_base64_but_not_compressed_is_malformed() {
    let payload = EncodedImage::from(STANDARD.encode(b"plain bytes, never deflated"));
    let outcome = decode(&payload);

    assert!(outcome.is_malformed());
    assert!(matches!(
        outcome.error().map(|e| e.kind()),
        Some(CodecErrorKind::Decompression(_))
    ));
}

#[test]
fn test_truncated_stream_is_malformed() {
    let raw: Vec<u8> = (0..20_000u32).map(|i| (i.wrapping_mul(2_246_822_519) >> 11) as u8).collect();
    let payload = encode_payload(&raw).unwrap();
    let compressed = STANDARD.decode(payload.as_str()).unwrap();
    let truncated = EncodedImage::from(STANDARD.encode(&compressed[..compressed.len() - 8]));

    assert!(decode(&truncated).is_malformed());
}

#[test]
fn test_stream_of_nothing_is_malformed() {
    let payload = encode_payload(&[]).unwrap();
    let outcome = decode(&payload);

    assert!(matches!(
        outcome.error().map(|e| e.kind()),
        Some(CodecErrorKind::EmptyImage)
    ));
}

#[test]
fn test_reencode_rejects_bad_data_uris() {
    let codec = Codec::default();

    assert!(codec.reencode_data_uri("", "x").is_err());
    assert!(codec.reencode_data_uri("data:image/png,raw", "x").is_err());
    assert!(codec.reencode_data_uri("data:;base64,AAAA", "x").is_err());
    assert!(codec.reencode_data_uri("data:image/png;base64,@@@", "x").is_err());

    let empty_body = DisplayImage::from_data_uri("data:image/png;base64,").unwrap();
    let err = codec.reencode(&empty_body, "x").unwrap_err();
    assert_eq!(err.kind(), &CodecErrorKind::Empty);
}

#[test]
fn test_data_uri_errors_point_at_the_calling_line() {
    for uri in ["https://example.com/a.png", "data:image/png,raw"] {
        let err = DisplayImage::from_data_uri(uri).unwrap_err();
        assert!(err.to_string().contains("codec_malformed_test.rs"), "{}", err);
    }
}
