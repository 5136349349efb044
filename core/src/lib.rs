#![deny(unsafe_code)]
//! Base types and traits for exercising HTTP handlers in memory.

mod error;
pub use error::{Error, Result};
mod writer;
pub use writer::ResponseWriter;
mod handler;
pub use handler::Handler;

pub use bytes::Bytes;
pub use http::{
    header, method, uri, Extensions, HeaderMap, HeaderValue, Method, Request, Response,
    StatusCode, Uri,
};
