//! Tests for multipart body assembly.

use atelier_core::UploadFile;
use atelier_upload::{
    MultipartRequestBody, PLACEHOLDER_FILE_NAME, PlaceholderPolicy, UploadAssembler, UploadConfig,
    UploadErrorKind, build_request,
};
use serde::Serialize;
use serde_json::json;

fn file(name: &str, bytes: &[u8]) -> UploadFile {
    UploadFile::new(name, "image/jpeg", bytes.to_vec())
}

#[test]
fn test_one_metadata_part_then_files_in_order() {
    let file1 = file("file1.jpg", b"first");
    let file2 = file("file2.jpg", b"second");

    let body = build_request(&json!({"title": "x"}), vec![file1.clone(), file2.clone()]).unwrap();

    assert_eq!(body.metadata().name(), "data");
    assert_eq!(body.metadata().json(), &json!({"title": "x"}));
    assert_eq!(body.files().len(), 2);
    assert_eq!(body.files()[0].file(), &file1);
    assert_eq!(body.files()[1].file(), &file2);
    assert!(body.files().iter().all(|part| part.name() == "images"));
}

#[tokio::test]
async fn test_rendered_body_parses_back() {
    let body = build_request(
        &json!({"title": "x"}),
        vec![file("file1.jpg", b"\x00\x01\r\n--"), file("file2.jpg", b"two")],
    )
    .unwrap();

    let (boundary, bytes) = body.render_with_random_boundary();
    let parsed = MultipartRequestBody::parse(&bytes, &boundary).await.unwrap();

    assert_eq!(parsed, body);
    let json: serde_json::Value = parsed.metadata().json().clone();
    assert_eq!(json, json!({"title": "x"}));
}

#[tokio::test]
async fn test_awkward_file_names_survive_parsing() {
    let names = ["a;b.jpg", "100%22off.jpg", "say \"cheese\".jpg", "50%.jpg", "x=\"y\".jpg"];
    let files = names.iter().map(|name| file(name, b"img")).collect();
    let body = build_request(&json!({"title": "x"}), files).unwrap();

    let (boundary, bytes) = body.render_with_random_boundary();
    let parsed = MultipartRequestBody::parse(&bytes, &boundary).await.unwrap();

    let parsed_names: Vec<&str> = parsed.files().iter().map(|part| part.file().name().as_str()).collect();
    assert_eq!(parsed_names, names);
    assert_eq!(parsed, body);
}

#[tokio::test]
async fn test_placeholder_part_parses_back() {
    let body = UploadAssembler::default()
        .build_request(&json!({"title": "x"}), Vec::new(), PlaceholderPolicy::EmptyPart)
        .unwrap();

    let (boundary, bytes) = body.render_with_random_boundary();
    let parsed = MultipartRequestBody::parse(&bytes, &boundary).await.unwrap();

    assert_eq!(parsed.files().len(), 1);
    assert_eq!(parsed.files()[0].file().name(), PLACEHOLDER_FILE_NAME);
    assert!(parsed.files()[0].is_placeholder());
}

#[test]
fn test_struct_fields_serialize_as_metadata() {
    #[derive(Serialize)]
    struct BrandFields<'a> {
        name: &'a str,
        active: bool,
    }

    let body = build_request(&BrandFields { name: "ACME", active: true }, Vec::new()).unwrap();
    assert_eq!(body.metadata().json(), &json!({"name": "ACME", "active": true}));
    assert!(body.files().is_empty());
}

#[test]
fn test_metadata_must_be_object() {
    let err = build_request(&json!(["not", "an", "object"]), Vec::new()).unwrap_err();
    assert_eq!(
        err.kind,
        UploadErrorKind::MetadataNotObject("array".to_string())
    );
}

#[test]
fn test_empty_part_policy_appends_placeholder() {
    let assembler = UploadAssembler::default();

    let omitted = assembler
        .build_request(&json!({"id": 1}), Vec::new(), PlaceholderPolicy::Omit)
        .unwrap();
    assert!(omitted.files().is_empty());

    let padded = assembler
        .build_request(&json!({"id": 1}), Vec::new(), PlaceholderPolicy::EmptyPart)
        .unwrap();
    assert_eq!(padded.files().len(), 1);
    assert!(padded.files()[0].is_placeholder());
    assert_eq!(padded.files()[0].file().name(), PLACEHOLDER_FILE_NAME);
    assert_eq!(padded.files()[0].file().mime_type(), "image/jpeg");
}

#[test]
fn test_placeholder_only_when_images_empty() {
    let body = UploadAssembler::default()
        .build_request(&json!({}), vec![file("a.jpg", b"a")], PlaceholderPolicy::EmptyPart)
        .unwrap();

    assert_eq!(body.files().len(), 1);
    assert!(!body.files()[0].is_placeholder());
}

#[test]
fn test_custom_part_names_and_default_mime() {
    let config = UploadConfig::default()
        .with_metadata_part("payload")
        .with_file_part("files[]")
        .with_default_mime("image/png");
    let assembler = UploadAssembler::new(config);

    let body = assembler
        .build_request(
            &json!({"title": "y"}),
            vec![UploadFile::new("picked", "", vec![1])],
            PlaceholderPolicy::Omit,
        )
        .unwrap();

    assert_eq!(body.metadata().name(), "payload");
    assert_eq!(body.files()[0].name(), "files[]");
    assert_eq!(body.files()[0].file().mime_type(), "image/png");
}

#[test]
fn test_into_form_accepts_assembled_body() {
    let body = build_request(&json!({"title": "x"}), vec![file("a.jpg", b"a")]).unwrap();
    assert!(body.into_form().is_ok());
}

#[test]
fn test_into_form_rejects_bad_mime() {
    let body = build_request(
        &json!({"title": "x"}),
        vec![UploadFile::new("a", "not a mime", vec![1])],
    )
    .unwrap();

    let err = body.into_form().unwrap_err();
    assert!(matches!(err.kind, UploadErrorKind::InvalidMime(_)));
}

#[test]
fn test_content_type_header() {
    assert_eq!(
        MultipartRequestBody::content_type("abc"),
        "multipart/form-data; boundary=abc"
    );
}
