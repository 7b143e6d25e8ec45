//! Re-deriving upload files from a record's stored payloads.

use atelier_cache::DecodeCache;
use atelier_codec::{Codec, DecodeOutcome, ImageDecoder};
use atelier_core::{ContentRecord, UploadFile};
use tracing::{debug, warn};

/// Turn a record's stored images back into upload files.
///
/// Each payload goes through the cache (decode) and the codec (reencode).
/// Order is preserved. Images that are missing or fail to decode or
/// reencode are left out rather than failing the whole request.
#[tracing::instrument(skip_all, fields(kind = %record.kind(), images = record.images().len()))]
pub fn resubmission_files<D>(
    record: &ContentRecord,
    cache: &DecodeCache<D>,
    codec: &Codec,
) -> Vec<UploadFile>
where
    D: ImageDecoder,
{
    let mut files = Vec::with_capacity(record.images().len());

    for (index, attachment) in record.images().iter().enumerate() {
        let display = match cache.get(attachment.data()) {
            DecodeOutcome::Decoded(display) => display,
            DecodeOutcome::Empty => {
                debug!(index, "Skipping empty image");
                continue;
            }
            DecodeOutcome::Malformed(err) => {
                warn!(index, error = %err, "Skipping malformed image");
                continue;
            }
        };

        let name = attachment
            .name()
            .clone()
            .unwrap_or_else(|| format!("{}-{}", record.kind(), index + 1));

        match codec.reencode(&display, &name) {
            Ok(file) => files.push(match attachment.mime_type() {
                Some(mime) if mime != file.mime_type() => {
                    let name = file.name().clone();
                    UploadFile::new(name, mime.clone(), file.into_bytes())
                }
                _ => file,
            }),
            Err(err) => warn!(index, error = %err, "Skipping image that failed to reencode"),
        }
    }

    debug!(files = files.len(), "Re-derived upload files");
    files
}
