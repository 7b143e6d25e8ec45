//! `multipart/form-data` wire encoding (RFC 7578).
//!
//! Sending goes through `reqwest`; this rendering exists so bodies can be
//! inspected byte for byte in logs and tests. Parsing back goes through
//! `multer`.

use crate::body::JSON_MIME;
use crate::{FilePart, MetadataPart, MultipartRequestBody, PLACEHOLDER_FILE_NAME};
use atelier_core::UploadFile;
use atelier_error::{UploadError, UploadErrorKind};
use futures_util::{future, stream};
use std::convert::Infallible;

const CRLF: &[u8] = b"\r\n";
const DEFAULT_FILE_MIME: &str = "application/octet-stream";

impl MultipartRequestBody {
    /// Render the body with the given boundary.
    pub fn render(&self, boundary: &str) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.file_bytes() + 256 * (self.files().len() + 1));

        let json = self.metadata().json().to_string();
        write_part_head(&mut out, boundary, self.metadata().name(), None, JSON_MIME);
        out.extend_from_slice(json.as_bytes());
        out.extend_from_slice(CRLF);

        for part in self.files() {
            let file = part.file();
            write_part_head(&mut out, boundary, part.name(), Some(file.name()), file.mime_type());
            out.extend_from_slice(file.bytes());
            out.extend_from_slice(CRLF);
        }

        out.extend_from_slice(b"--");
        out.extend_from_slice(boundary.as_bytes());
        out.extend_from_slice(b"--");
        out.extend_from_slice(CRLF);
        out
    }

    /// Render with a fresh random boundary, returning `(boundary, bytes)`.
    pub fn render_with_random_boundary(&self) -> (String, Vec<u8>) {
        let boundary = format!("atelier-{}", uuid::Uuid::new_v4().simple());
        let bytes = self.render(&boundary);
        (boundary, bytes)
    }

    /// Parse a body produced by [`render`](Self::render).
    ///
    /// The first part must be the JSON metadata part; every later part is a
    /// file part.
    ///
    /// # Errors
    ///
    /// Fails when the body is not valid `multipart/form-data` for
    /// `boundary`, a part has no name, the metadata part is not JSON, or
    /// there is no part at all.
    pub async fn parse(bytes: &[u8], boundary: &str) -> Result<Self, UploadError> {
        let stream = stream::once(future::ready(Ok::<_, Infallible>(bytes.to_vec())));
        let mut multipart = multer::Multipart::new(stream, boundary);

        let mut metadata = None;
        let mut files = Vec::new();
        while let Some(field) = multipart.next_field().await.map_err(|e| {
            malformed(format!("Failed to parse multipart field: {}", e))
        })? {
            let name = match field.name() {
                Some(name) => unescape_quoted(name),
                None => return Err(malformed("part has no name")),
            };
            let file_name = field.file_name().map(unescape_quoted);
            let content_type = field.content_type().map(|mime| mime.to_string());
            let content = field
                .bytes()
                .await
                .map_err(|e| malformed(format!("Failed reading part {}: {}", name, e)))?;

            if metadata.is_none() {
                if file_name.is_some() {
                    return Err(malformed("first part is a file, expected JSON metadata"));
                }
                let json = serde_json::from_slice(&content)
                    .map_err(|e| malformed(format!("metadata part is not JSON: {}", e)))?;
                metadata = Some(MetadataPart::new(name, json));
                continue;
            }

            let file = UploadFile::new(
                file_name.unwrap_or_else(|| PLACEHOLDER_FILE_NAME.to_string()),
                content_type.unwrap_or_else(|| DEFAULT_FILE_MIME.to_string()),
                content.to_vec(),
            );
            files.push(FilePart::new(name, file));
        }

        let metadata = metadata.ok_or_else(|| malformed("body has no parts"))?;
        Ok(MultipartRequestBody::new(metadata, files))
    }
}

fn write_part_head(
    out: &mut Vec<u8>,
    boundary: &str,
    name: &str,
    filename: Option<&str>,
    content_type: &str,
) {
    out.extend_from_slice(b"--");
    out.extend_from_slice(boundary.as_bytes());
    out.extend_from_slice(CRLF);
    out.extend_from_slice(b"Content-Disposition: form-data; name=\"");
    out.extend_from_slice(escape_quoted(name).as_bytes());
    out.push(b'"');
    if let Some(filename) = filename {
        out.extend_from_slice(b"; filename=\"");
        out.extend_from_slice(escape_quoted(filename).as_bytes());
        out.push(b'"');
    }
    out.extend_from_slice(CRLF);
    out.extend_from_slice(b"Content-Type: ");
    out.extend_from_slice(content_type.as_bytes());
    out.extend_from_slice(CRLF);
    out.extend_from_slice(CRLF);
}

/// Percent-encode the characters that would break a quoted header value.
///
/// `%` itself is encoded so that [`unescape_quoted`] is an exact inverse.
fn escape_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '%' => out.push_str("%25"),
            '"' => out.push_str("%22"),
            '\r' => out.push_str("%0D"),
            '\n' => out.push_str("%0A"),
            other => out.push(other),
        }
    }
    out
}

/// Single left-to-right pass, so `%2522` decodes to `%22` and no further.
fn unescape_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let escape = rest.get(pos..pos + 3);
        let decoded = match escape {
            Some("%25") => Some('%'),
            Some("%22") => Some('"'),
            Some("%0D") => Some('\r'),
            Some("%0A") => Some('\n'),
            _ => None,
        };
        match decoded {
            Some(c) => {
                out.push(c);
                rest = &rest[pos + 3..];
            }
            None => {
                out.push('%');
                rest = &rest[pos + 1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn malformed(reason: impl Into<String>) -> UploadError {
    UploadError::new(UploadErrorKind::MalformedBody(reason.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body() -> MultipartRequestBody {
        MultipartRequestBody::new(
            MetadataPart::new("data", json!({"title": "x"})),
            vec![FilePart::new(
                "images",
                UploadFile::new("a.png", "image/png", vec![0, 1, 2]),
            )],
        )
    }

    #[test]
    fn render_matches_rfc_7578_layout() {
        let rendered = body().render("XyZ");
        let pieces: [&[u8]; 9] = [
            b"--XyZ\r\n",
            b"Content-Disposition: form-data; name=\"data\"\r\n",
            b"Content-Type: application/json\r\n\r\n",
            b"{\"title\":\"x\"}\r\n",
            b"--XyZ\r\n",
            b"Content-Disposition: form-data; name=\"images\"; filename=\"a.png\"\r\n",
            b"Content-Type: image/png\r\n\r\n",
            &[0, 1, 2],
            b"\r\n--XyZ--\r\n",
        ];
        let expected = pieces.concat();
        assert_eq!(rendered, expected);
    }

    #[test]
    fn quoted_values_are_escaped() {
        assert_eq!(escape_quoted("a\"b\r\n"), "a%22b%0D%0A");
        assert_eq!(unescape_quoted("a%22b%0D%0A"), "a\"b\r\n");
    }

    #[test]
    fn escaping_round_trips_literal_percent_sequences() {
        for name in ["100%22off.jpg", "%25", "50%", "%0A%0D", "a%zz"] {
            assert_eq!(unescape_quoted(&escape_quoted(name)), name);
        }
        assert_eq!(escape_quoted("100%22off"), "100%2522off");
    }

    #[test]
    fn unknown_escapes_pass_through() {
        assert_eq!(unescape_quoted("50%"), "50%");
        assert_eq!(unescape_quoted("%41"), "%41");
    }

    #[tokio::test]
    async fn parse_rejects_garbage() {
        assert!(MultipartRequestBody::parse(b"hello", "XyZ").await.is_err());
        assert!(MultipartRequestBody::parse(b"--XyZ--\r\n", "XyZ").await.is_err());
    }

    #[tokio::test]
    async fn parse_rejects_file_before_metadata() {
        let only_files = MultipartRequestBody::new(
            MetadataPart::new("data", json!({})),
            Vec::new(),
        )
        .render("XyZ");
        let swapped = String::from_utf8(only_files)
            .unwrap()
            .replace("name=\"data\"", "name=\"data\"; filename=\"x.json\"");

        assert!(MultipartRequestBody::parse(swapped.as_bytes(), "XyZ").await.is_err());
    }
}
