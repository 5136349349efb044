use std::io;

use http::{HeaderMap, StatusCode};

/// The sink a handler under test writes its response into.
///
/// The status is fixed by the first call to [`write_header`](Self::write_header); writing body
/// bytes before that implies `200 OK`. Header changes made after the status is fixed are not
/// required to be observed by the recording.
pub trait ResponseWriter: io::Write {
    /// Headers that will be sent with the response.
    fn headers(&self) -> &HeaderMap;

    /// Mutable access to the response headers.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Send the response status.
    fn write_header(&mut self, status: StatusCode);
}

impl<W: ResponseWriter + ?Sized> ResponseWriter for &mut W {
    fn headers(&self) -> &HeaderMap {
        (**self).headers()
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        (**self).headers_mut()
    }

    fn write_header(&mut self, status: StatusCode) {
        (**self).write_header(status);
    }
}
