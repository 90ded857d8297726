/// Media upload API routes
use crate::{
    error::{Result, ServerError},
    services::FileStorage,
    state::AppState,
};
use axum::{
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
    pub content_type: String,
}

/// POST /files
///
/// Accepts a multipart form with a single `file` field. The part's own
/// content type decides whether the upload is accepted and which
/// extension it is stored under.
pub async fn upload_file(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<UploadResponse>> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ServerError::BadRequest("Missing Content-Type".to_string()))?;

    if !content_type.starts_with("multipart/form-data") {
        return Err(ServerError::BadRequest(
            "Expected multipart/form-data".to_string(),
        ));
    }

    let boundary = multer::parse_boundary(content_type)
        .map_err(|_| ServerError::BadRequest("Missing boundary".to_string()))?;

    // Convert Bytes to a stream for multer
    let stream = futures_util::stream::once(async move { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut upload: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Failed to parse multipart: {}", e)))?
    {
        if field.name() != Some("file") {
            tracing::debug!("Ignoring multipart field {:?}", field.name());
            continue;
        }

        let part_type = field
            .content_type()
            .map(|mime| mime.essence_str().to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let data = field
            .bytes()
            .await
            .map_err(|e| ServerError::BadRequest(format!("Failed to read file: {}", e)))?;

        upload = Some((part_type, data));
    }

    let (part_type, data) =
        upload.ok_or_else(|| ServerError::BadRequest("Missing file".to_string()))?;

    let stored = app_state.file_storage.store_upload(&part_type, &data).await?;
    tracing::info!("Uploaded {} ({} bytes)", stored.filename, data.len());

    let base_url = match &app_state.public_url {
        Some(url) => url.clone(),
        None => {
            let host = headers
                .get(header::HOST)
                .and_then(|h| h.to_str().ok())
                .unwrap_or("localhost");
            format!("http://{}", host)
        }
    };

    Ok(Json(UploadResponse {
        url: FileStorage::public_url(&base_url, &stored.filename),
        content_type: stored.content_type,
    }))
}
