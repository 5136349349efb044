//! An in-memory response sink.

use std::io;

use bytes::{Bytes, BytesMut};
use mockhttp_core::{HeaderMap, Response, ResponseWriter, StatusCode};
use tracing::warn;

/// Records everything a handler writes, without any network transport.
///
/// The status defaults to `200 OK` when the handler writes a body without calling
/// [`write_header`](ResponseWriter::write_header) first. Headers are snapshotted when the
/// status is written, so later header changes do not show up in [`result`](Self::result).
#[derive(Debug, Default)]
pub struct ResponseRecorder {
    status: Option<StatusCode>,
    headers: HeaderMap,
    snapshot: Option<HeaderMap>,
    body: BytesMut,
}

impl ResponseRecorder {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded status, `200 OK` if none was written.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    /// Whether the handler has fixed the status yet.
    #[must_use]
    pub const fn wrote_header(&self) -> bool {
        self.status.is_some()
    }

    /// The body bytes written so far.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Copy a complete response into the recorder, as if a handler had written it.
    pub fn record<B: Into<Bytes>>(&mut self, response: Response<B>) {
        let (parts, body) = response.into_parts();
        self.headers.extend(parts.headers);
        self.write_header(parts.status);
        self.body.extend_from_slice(&body.into());
    }

    /// The response as a client would have received it.
    #[must_use]
    pub fn result(&self) -> Response<Bytes> {
        let mut response = Response::new(Bytes::copy_from_slice(&self.body));
        *response.status_mut() = self.status();
        *response.headers_mut() = self
            .snapshot
            .clone()
            .unwrap_or_else(|| self.headers.clone());
        response
    }
}

impl io::Write for ResponseRecorder {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.status.is_none() {
            self.write_header(StatusCode::OK);
        }
        self.body.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl ResponseWriter for ResponseRecorder {
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write_header(&mut self, status: StatusCode) {
        if let Some(current) = self.status {
            warn!(%current, ignored = %status, "superfluous write_header call");
            return;
        }
        self.status = Some(status);
        self.snapshot = Some(self.headers.clone());
    }
}
