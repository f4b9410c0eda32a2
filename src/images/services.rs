use std::path::Path;

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::storage::StorageClient;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";
const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// What the client declared about an uploaded file.
#[derive(Debug, Clone)]
pub struct UploadMeta {
    pub filename: String,
    pub size: u64,
}

/// Reads the upload (up to its declared size), stores it under
/// `{path}/{unique-id}{ext}` and returns the public URL.
#[instrument(skip(storage, file), fields(filename = %meta.filename, size = meta.size))]
pub async fn upload_profile_picture<R>(
    storage: &dyn StorageClient,
    path: &str,
    file: R,
    meta: &UploadMeta,
) -> UserResult<String>
where
    R: AsyncRead + Unpin,
{
    // The declared size only caps the read; the buffer grows with what arrives.
    let mut buf = Vec::new();
    file.take(meta.size).read_to_end(&mut buf).await?;
    let body = Bytes::from(buf);

    let content_type = sniff_content_type(&body);
    let key = object_key(path, &meta.filename);

    storage
        .put_public_object(&key, body, content_type)
        .await
        .map_err(|e| {
            error!(error = %e, %key, "profile picture upload failed");
            UserError::Upload(e)
        })?;

    info!(%key, content_type, "profile picture uploaded");
    Ok(storage.public_url(&key))
}

fn object_key(path: &str, filename: &str) -> String {
    format!("{}/{}{}", path, Uuid::new_v4().simple(), extension(filename))
}

/// Extension including the leading dot, or empty.
fn extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default()
}

fn sniff_content_type(body: &[u8]) -> &'static str {
    if let Some(kind) = infer::get(body) {
        return kind.mime_type();
    }
    if looks_like_text(body) {
        TEXT_CONTENT_TYPE
    } else {
        FALLBACK_CONTENT_TYPE
    }
}

/// Valid UTF-8 without the control bytes that mark binary data.
fn looks_like_text(body: &[u8]) -> bool {
    let binary = |b: &u8| matches!(b, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F);
    std::str::from_utf8(body).is_ok() && !body.iter().any(binary)
}
