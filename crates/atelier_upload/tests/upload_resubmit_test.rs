//! Tests for re-deriving files from stored payloads.

use atelier_cache::DecodeCache;
use atelier_codec::{Codec, encode_payload};
use atelier_core::{ContentKind, ContentRecord, ImageAttachment};
use atelier_upload::{PlaceholderPolicy, UploadAssembler, resubmission_files};
use serde_json::json;

fn attachment(raw: &[u8]) -> ImageAttachment {
    ImageAttachment::new(encode_payload(raw).unwrap())
}

#[test]
fn test_resubmission_recovers_raw_bytes_in_order() {
    let record = ContentRecord::new(ContentKind::Product)
        .with_id(5)
        .with_image(attachment(b"first image"))
        .with_image(attachment(b"second image").with_name("side.jpg"));
    let cache = DecodeCache::default();

    let files = resubmission_files(&record, &cache, &Codec::default());

    assert_eq!(files.len(), 2);
    assert_eq!(files[0].bytes(), b"first image");
    assert_eq!(files[0].name(), "product-1.jpg");
    assert_eq!(files[1].bytes(), b"second image");
    assert_eq!(files[1].name(), "side.jpg");
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_resubmission_skips_broken_images() {
    let record = ContentRecord::new(ContentKind::Project)
        .with_image(attachment(b"good"))
        .with_image(ImageAttachment::new("not-valid-base64!!"))
        .with_image(ImageAttachment::new(""))
        .with_image(attachment(b"also good"));

    let files = resubmission_files(&record, &DecodeCache::default(), &Codec::default());

    let contents: Vec<&[u8]> = files.iter().map(|f| f.bytes().as_slice()).collect();
    assert_eq!(contents, vec![b"good".as_slice(), b"also good".as_slice()]);
}

#[test]
fn test_resubmission_keeps_recorded_mime_type() {
    let record = ContentRecord::new(ContentKind::Brand)
        .with_image(attachment(b"\x89PNG").with_mime_type("image/png").with_name("logo.png"));

    let files = resubmission_files(&record, &DecodeCache::default(), &Codec::default());

    assert_eq!(files[0].mime_type(), "image/png");
    assert_eq!(files[0].name(), "logo.png");
}

#[test]
fn test_resubmit_request_sends_toggled_fields_with_images() {
    let mut record = ContentRecord::new(ContentKind::Banner)
        .with_id(9)
        .with_field("title", "Spring")
        .with_field("active", true)
        .with_image(attachment(b"banner bytes"));
    record.toggle_flag("active").unwrap();

    let body = UploadAssembler::default()
        .resubmit_request(&record, &DecodeCache::default(), &Codec::default(), PlaceholderPolicy::Omit)
        .unwrap();

    assert_eq!(body.metadata().json(), &json!({"id": 9, "title": "Spring", "active": false}));
    assert_eq!(body.files().len(), 1);
    assert_eq!(body.files()[0].file().bytes(), b"banner bytes");
}

#[test]
fn test_resubmit_request_without_images_honours_policy() {
    let record = ContentRecord::new(ContentKind::Reference).with_id(1).with_field("active", true);

    let body = UploadAssembler::default()
        .resubmit_request(&record, &DecodeCache::default(), &Codec::default(), PlaceholderPolicy::EmptyPart)
        .unwrap();

    assert_eq!(body.files().len(), 1);
    assert!(body.files()[0].is_placeholder());
}
