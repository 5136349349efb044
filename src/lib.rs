#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

//! Exercise HTTP handlers in memory.
//!
//! Build a [`MockRequest`], hand it to a [`Handler`], then read back what was recorded as a
//! [`RawResponse`] or a decoded [`JsonResponse`] and check it against an [`Expectation`].
//! Tables of [`TestCase`]s run the whole loop per row.

mod context;
pub use context::Context;

mod decode;
pub use decode::{DecodePolicy, Decoded, JsonResponse, RawResponse, RecordedResponse};

mod expect;
pub use expect::{validate, validate_errors, Expectation};

mod logging;
pub use logging::init_logging;

mod recorder;
pub use recorder::ResponseRecorder;

mod request;
pub use request::{MockRequest, MockRequestBuilder};

pub mod respond;
pub use respond::{JsonWriter, ServerError, StatusBody};

pub mod routing;
pub use routing::Params;

mod test_case;
pub use test_case::TestCase;

#[doc(inline)]
pub use mockhttp_core::{
    header, Bytes, Error, Handler, HeaderMap, Method, Request, Response, ResponseWriter, Result,
    StatusCode,
};
