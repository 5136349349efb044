//! Read a recorded response back as raw text or as a decoded JSON value.

use mockhttp_core::{Bytes, Error, HeaderMap, Response, Result, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

/// The parts every decoded response exposes.
pub trait RecordedResponse {
    /// Response status.
    fn status(&self) -> StatusCode;

    /// Raw body text.
    fn body(&self) -> &str;

    /// Response headers.
    fn headers(&self) -> &HeaderMap;

    /// Whether the status reports a failure (anything above 399).
    fn is_failure(&self) -> bool {
        self.status().as_u16() > 399
    }

    /// Decode the body into an error shape, but only for failure statuses.
    ///
    /// Returns `Ok(None)` without touching the body when the status is not a failure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyPayload`] for a failure with no body, and [`Error::Decode`] when
    /// the body does not fit `E`.
    fn decode_error<E: DeserializeOwned>(&self) -> Result<Option<E>>
    where
        Self: Sized,
    {
        if !self.is_failure() {
            return Ok(None);
        }
        if self.body().is_empty() {
            return Err(Error::EmptyPayload);
        }
        serde_json::from_str(self.body())
            .map(Some)
            .map_err(Error::Decode)
    }
}

fn split(response: Response<Bytes>) -> Result<(StatusCode, HeaderMap, String)> {
    let (parts, body) = response.into_parts();
    let body = String::from_utf8(body.to_vec())?;
    Ok((parts.status, parts.headers, body))
}

/// Status, headers and body text, without any JSON parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl Default for RawResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl RawResponse {
    /// An empty `200 OK` response, to be filled in as an expected value.
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: String::new(),
        }
    }

    /// Read a recorded response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Body`] if the body is not valid UTF-8.
    pub fn from_response(response: Response<Bytes>) -> Result<Self> {
        let (status, headers, body) = split(response)?;
        debug!(%status, len = body.len(), "read raw response");
        Ok(Self {
            status,
            headers,
            body,
        })
    }

    /// Set the status.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Set the body text.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

impl RecordedResponse for RawResponse {
    fn status(&self) -> StatusCode {
        self.status
    }

    fn body(&self) -> &str {
        &self.body
    }

    fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

/// When to attempt decoding the body of a [`JsonResponse`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodePolicy {
    /// Decode only a non-empty body on a `200 OK`; anything else is left undecoded.
    #[default]
    SuccessOnly,
    /// Decode any non-empty body, whatever the status.
    NonEmpty,
    /// Always decode; an empty body is an [`Error::EmptyPayload`].
    Required,
}

/// The outcome of decoding a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded<T> {
    /// The body decoded into a value.
    Value(T),
    /// The body was empty.
    Empty,
    /// The policy skipped decoding for this status.
    Skipped,
}

impl<T> Decoded<T> {
    /// The decoded value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Empty | Self::Skipped => None,
        }
    }

    /// Take the decoded value, if any.
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Empty | Self::Skipped => None,
        }
    }

    /// Whether a value was decoded.
    #[must_use]
    pub const fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

/// A recorded response with its body decoded into `T`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonResponse<T> {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
    decoded: Decoded<T>,
}

impl<T> Default for JsonResponse<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> JsonResponse<T> {
    /// An empty `200 OK` response with no value.
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: String::new(),
            decoded: Decoded::Empty,
        }
    }

    /// Set the status.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// A `200 OK` carrying `value`.
    #[must_use]
    pub fn with_success(self, value: T) -> Self {
        self.with_failure(StatusCode::OK, value)
    }

    /// A response with `status` carrying `value`.
    #[must_use]
    pub fn with_failure(mut self, status: StatusCode, value: T) -> Self {
        self.status = status;
        self.decoded = Decoded::Value(value);
        self
    }

    /// The decoded value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        self.decoded.value()
    }

    /// How decoding went.
    #[must_use]
    pub const fn decoded(&self) -> &Decoded<T> {
        &self.decoded
    }

    /// Take the decoded value, if any.
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        self.decoded.into_value()
    }
}

impl<T: DeserializeOwned> JsonResponse<T> {
    /// Read a recorded response with the default [`DecodePolicy`].
    ///
    /// # Errors
    ///
    /// See [`decode`](Self::decode).
    pub fn from_response(response: Response<Bytes>) -> Result<Self> {
        Self::decode(response, DecodePolicy::default())
    }

    /// Read a recorded response, decoding the body as `policy` allows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Body`] for a non UTF-8 body, [`Error::EmptyPayload`] for an empty body
    /// under [`DecodePolicy::Required`], and [`Error::Decode`] when a body that should be
    /// decoded does not fit `T`.
    pub fn decode(response: Response<Bytes>, policy: DecodePolicy) -> Result<Self> {
        let (status, headers, body) = split(response)?;

        let decoded = match policy {
            DecodePolicy::SuccessOnly if status != StatusCode::OK => Decoded::Skipped,
            DecodePolicy::Required if body.is_empty() => return Err(Error::EmptyPayload),
            _ if body.is_empty() => Decoded::Empty,
            _ => Decoded::Value(serde_json::from_str(&body).map_err(Error::Decode)?),
        };
        debug!(%status, ?policy, decoded = decoded.is_value(), "decoded json response");

        Ok(Self {
            status,
            headers,
            body,
            decoded,
        })
    }
}

impl<T> RecordedResponse for JsonResponse<T> {
    fn status(&self) -> StatusCode {
        self.status
    }

    fn body(&self) -> &str {
        &self.body
    }

    fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}
