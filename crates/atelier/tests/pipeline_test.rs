//! End-to-end wiring: list, render, toggle through one shared cache.

use atelier::{
    Atelier, AtelierConfig, AtelierResult, AutoConfirm, ContentKind, ContentTransport,
    LoadingFlag, RequestBody, encode_payload,
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

struct FixtureTransport {
    listing: Value,
    sent: Mutex<Vec<(String, RequestBody)>>,
}

#[async_trait::async_trait]
impl ContentTransport for FixtureTransport {
    async fn get(&self, _path: &str) -> AtelierResult<Value> {
        Ok(self.listing.clone())
    }

    async fn post(&self, path: &str, body: RequestBody) -> AtelierResult<Value> {
        self.sent.lock().unwrap().push((path.to_string(), body));
        Ok(Value::Null)
    }

    async fn put(&self, path: &str, body: RequestBody) -> AtelierResult<Value> {
        self.sent.lock().unwrap().push((path.to_string(), body));
        Ok(Value::Null)
    }

    async fn delete(&self, _path: &str) -> AtelierResult<Value> {
        Ok(Value::Null)
    }
}

#[tokio::test]
async fn test_rendered_images_are_reused_on_toggle() {
    let payload = encode_payload(b"banner artwork").unwrap();
    let transport = Arc::new(FixtureTransport {
        listing: json!({"data": [
            {"id": 1, "title": "Spring", "active": true, "image": [{"data": payload.as_str()}]}
        ]}),
        sent: Mutex::new(Vec::new()),
    });
    let loading = Arc::new(LoadingFlag::default());
    let atelier = Atelier::new(
        AtelierConfig::bundled().unwrap(),
        transport.clone(),
        Arc::new(AutoConfirm),
        loading.clone(),
    );

    let banners = atelier.service().list(ContentKind::Banner).await.unwrap();
    let thumbnail = atelier.presenter().thumbnail(&banners[0]);
    assert!(!thumbnail.is_placeholder());

    let toggled = atelier
        .service()
        .toggle(&banners[0], "active")
        .await
        .unwrap()
        .completed()
        .unwrap();

    assert_eq!(toggled.flag("active"), Some(false));
    assert_eq!(atelier.cache().stats().misses, 1);
    assert_eq!(atelier.cache().stats().hits, 1);
    assert!(!loading.is_visible());

    let sent = transport.sent.lock().unwrap();
    let (path, body) = &sent[0];
    assert_eq!(path, "banners/1");
    match body {
        RequestBody::Multipart(body) => {
            assert_eq!(body.files().len(), 1);
            assert_eq!(body.files()[0].file().bytes(), b"banner artwork");
        }
        other => panic!("expected multipart body, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_without_images_follows_bundled_endpoint_policy() {
    let transport = Arc::new(FixtureTransport {
        listing: Value::Null,
        sent: Mutex::new(Vec::new()),
    });
    let atelier = Atelier::new(
        AtelierConfig::bundled().unwrap(),
        transport.clone(),
        Arc::new(AutoConfirm),
        Arc::new(LoadingFlag::default()),
    );

    atelier
        .service()
        .create(ContentKind::Banner, &json!({"title": "Empty"}), Vec::new())
        .await
        .unwrap();
    atelier
        .service()
        .create(ContentKind::Brand, &json!({"name": "ACME"}), Vec::new())
        .await
        .unwrap();

    let sent = transport.sent.lock().unwrap();
    let file_counts: Vec<usize> = sent
        .iter()
        .map(|(_, body)| match body {
            RequestBody::Multipart(body) => body.files().len(),
            RequestBody::Json(_) => 0,
        })
        .collect();
    assert_eq!(file_counts, vec![1, 0]);
}
