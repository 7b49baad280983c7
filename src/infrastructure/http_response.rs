// HTTP response utilities for optionally Brotli-encoded bodies
use async_compression::tokio::bufread::BrotliEncoder;
use axum::{
    body::Body,
    http::{header, HeaderValue, Response, StatusCode},
};
use serde::Serialize;
use tokio::io::AsyncReadExt;

/// Build a response from raw bytes, compressing with Brotli when asked
pub async fn encoded_response(
    bytes: Vec<u8>,
    content_type: &str,
    compress: bool,
    attachment: Option<&str>,
) -> Result<Response<Body>, StatusCode> {
    let (body_bytes, content_encoding) = if compress {
        let original = bytes.len();
        let cursor = std::io::Cursor::new(bytes);
        let mut encoder = BrotliEncoder::new(cursor);
        let mut compressed = Vec::new();
        encoder.read_to_end(&mut compressed).await.map_err(|e| {
            tracing::error!("Brotli compression error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        tracing::debug!(original, compressed = compressed.len(), "compressed response body");
        (compressed, Some("br"))
    } else {
        (bytes, None)
    };

    let mut response_builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, HeaderValue::from(body_bytes.len()));

    if let Some(encoding) = content_encoding {
        response_builder = response_builder.header(header::CONTENT_ENCODING, encoding);
    }

    if let Some(filename) = attachment {
        response_builder =
            response_builder.header(header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", filename));
    }

    response_builder.body(Body::from(body_bytes)).map_err(|e| {
        tracing::error!("Response build error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Serialize `data` as JSON with optional compression
pub async fn json_response<T: Serialize>(data: &T, compress: bool) -> Result<Response<Body>, StatusCode> {
    let bytes = serde_json::to_vec(data).map_err(|e| {
        tracing::error!("JSON serialization error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    encoded_response(bytes, "application/json", compress, None).await
}
