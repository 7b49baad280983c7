// Chunked JSON streaming utilities
use crate::application::sink_lease::SinkLease;
use crate::infrastructure::sinks::StreamEvent;
use async_compression::tokio::bufread::BrotliEncoder;
use axum::body::Body;
use axum::http::{header, Response, StatusCode};
use axum::response::IntoResponse;
use bytes::{BufMut, Bytes, BytesMut};
use futures::stream::Stream;
use futures::StreamExt;
use tokio::io::AsyncReadExt;
use tokio::sync::broadcast::{self, error::RecvError};

/// Create a chunked streaming response of length-prefixed JSON events
pub async fn chunked_json_stream<S>(stream: S, compress: bool) -> Result<Response<Body>, StatusCode>
where
    S: Stream<Item = StreamEvent> + Send + 'static,
{
    let byte_stream = stream.then(move |event| async move { serialize_chunk(event, compress).await });

    let body = Body::from_stream(byte_stream);

    // Chunks are compressed individually, so no Content-Encoding on the response
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/x-ndjson-chunked")
        .header(header::TRANSFER_ENCODING, "chunked")
        .body(body)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Serialize a single event to a chunk: 4-byte big-endian length, then payload
pub async fn serialize_chunk(event: StreamEvent, compress: bool) -> Result<Bytes, std::io::Error> {
    let json = serde_json::to_vec(&event)?;

    let payload = if compress {
        let cursor = std::io::Cursor::new(json);
        let mut encoder = BrotliEncoder::new(cursor);
        let mut compressed = Vec::new();
        encoder.read_to_end(&mut compressed).await?;
        compressed
    } else {
        json
    };

    let length = payload.len() as u32;
    let mut chunk = BytesMut::with_capacity(4 + payload.len());
    chunk.put_u32(length);
    chunk.put_slice(&payload);

    Ok(chunk.freeze())
}

/// Stream events from a broadcast receiver until the sender goes away.
/// A lagging client skips what it missed. The client's sink stays
/// registered until the stream is dropped.
pub fn events_from_receiver(
    mut rx: broadcast::Receiver<StreamEvent>,
    lease: SinkLease,
) -> impl Stream<Item = StreamEvent> + Send + 'static {
    async_stream::stream! {
        let _lease = lease;
        loop {
            match rx.recv().await {
                Ok(event) => yield event,
                Err(RecvError::Lagged(missed)) => {
                    tracing::debug!(missed, "stream subscriber lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    }
}

/// Helper to create a streaming response from a client's subscription
pub async fn stream_from_receiver(
    rx: broadcast::Receiver<StreamEvent>,
    lease: SinkLease,
    compress: bool,
) -> impl IntoResponse {
    match chunked_json_stream(events_from_receiver(rx, lease), compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}
