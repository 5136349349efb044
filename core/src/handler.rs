use bytes::Bytes;
use http::Request;

use crate::{ResponseWriter, Result};

/// An HTTP handler under test.
///
/// Implemented for every `Fn(&Request<Bytes>, &mut dyn ResponseWriter) -> Result<()>`, so plain
/// functions work directly. Implement it by hand for handlers that carry their own
/// dependencies. The returned error is whatever the handler failed to write; handled
/// failures belong in the response itself.
pub trait Handler {
    /// Handle the request, writing the response into `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if the response could not be written.
    fn handle(&self, request: &Request<Bytes>, writer: &mut dyn ResponseWriter) -> Result<()>;
}

impl<F> Handler for F
where
    F: Fn(&Request<Bytes>, &mut dyn ResponseWriter) -> Result<()>,
{
    fn handle(&self, request: &Request<Bytes>, writer: &mut dyn ResponseWriter) -> Result<()> {
        (self)(request, writer)
    }
}
