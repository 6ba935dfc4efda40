//! Video streaming (`/stream/{post_id}`).
//!
//! The service answers a plain `GET` with the whole file and a `Range`
//! request with `206 Partial Content`. Bodies are read chunk by chunk.

use reqwest::header::{ACCEPT_RANGES, CONTENT_LENGTH, CONTENT_RANGE, CONTENT_TYPE, RANGE};
use reqwest::{Method, Response};
use std::fmt;
use tracing::{debug, instrument};

use crate::api::ApiClient;
use crate::error::{ApiError, ApiResult};

/// An inclusive byte range, `bytes=start-end` or open-ended `bytes=start-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: Option<u64>,
}

impl ByteRange {
    pub fn starting_at(start: u64) -> Self {
        Self { start, end: None }
    }

    pub fn between(start: u64, end: u64) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// Parse `start-end` or `start-`, with or without the `bytes=` prefix.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let s = s.strip_prefix("bytes=").unwrap_or(s);
        let (start, end) = s.split_once('-')?;
        let start = start.trim().parse().ok()?;
        let end = match end.trim() {
            "" => None,
            end => Some(end.parse().ok()?),
        };

        match end {
            Some(end) if end < start => None,
            _ => Some(Self { start, end }),
        }
    }

    /// Value for the `Range` request header.
    pub fn header_value(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "bytes={}-{}", self.start, end),
            None => write!(f, "bytes={}-", self.start),
        }
    }
}

/// An open video stream.
#[derive(Debug)]
pub struct VideoStream {
    /// HTTP status (200 or 206).
    pub status: u16,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    /// `Content-Range` of a partial response, e.g. `bytes 0-99/1000`.
    pub content_range: Option<String>,
    pub accepts_ranges: bool,
    response: Response,
}

impl VideoStream {
    fn from_response(response: Response) -> Self {
        let header = |name: reqwest::header::HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        Self {
            status: response.status().as_u16(),
            content_type: header(CONTENT_TYPE),
            content_length: header(CONTENT_LENGTH).and_then(|v| v.parse().ok()),
            content_range: header(CONTENT_RANGE),
            accepts_ranges: header(ACCEPT_RANGES).is_some_and(|v| v == "bytes"),
            response,
        }
    }

    pub fn is_partial(&self) -> bool {
        self.status == 206
    }

    /// Total file size, from `Content-Range` or else `Content-Length`.
    pub fn total_size(&self) -> Option<u64> {
        match self.content_range {
            Some(ref range) => range.rsplit('/').next()?.parse().ok(),
            None => self.content_length,
        }
    }

    /// Next chunk of the body, or `None` at the end.
    pub async fn next_chunk(&mut self) -> ApiResult<Option<Vec<u8>>> {
        Ok(self.response.chunk().await?.map(|chunk| chunk.to_vec()))
    }

    /// Read the remaining body.
    pub async fn collect(self) -> ApiResult<Vec<u8>> {
        let bytes = self.response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

impl ApiClient {
    /// URL a player can load directly. Requires the session cookie.
    pub fn stream_url(&self, post_id: i64) -> String {
        self.url(&format!("/stream/{}", post_id))
    }

    /// Open a post's video, optionally for a byte range.
    #[instrument(skip(self))]
    pub async fn open_stream(
        &self,
        post_id: i64,
        range: Option<ByteRange>,
    ) -> ApiResult<VideoStream> {
        let mut request = self.request(Method::GET, &format!("/stream/{}", post_id));
        if let Some(range) = range {
            debug!("Requesting {} of post {}", range, post_id);
            request = request.header(RANGE, range.header_value());
        }

        let response = self.check_status(request.send().await?).await?;
        let stream = VideoStream::from_response(response);

        if range.is_some() && !stream.is_partial() {
            debug!("Range ignored by service, got status {}", stream.status);
        }
        if stream.status != 200 && stream.status != 206 {
            return Err(ApiError::InvalidResponse(format!(
                "unexpected stream status {}",
                stream.status
            )));
        }

        Ok(stream)
    }
}
