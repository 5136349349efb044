//! Uniform JSON success and error bodies.
//!
//! ```
//! use mockhttp::{respond, ResponseRecorder, StatusCode};
//!
//! let mut recorder = ResponseRecorder::new();
//! respond::error(&mut recorder, StatusCode::NOT_FOUND, "no such thing", None).unwrap();
//!
//! let response = recorder.result();
//! assert_eq!(response.status(), StatusCode::NOT_FOUND);
//! assert_eq!(
//!     &response.body()[..],
//!     br#"{"status":"not found","message":"no such thing"}"#
//! );
//! ```

use std::{error::Error as StdError, fmt};

use mockhttp_core::{
    header::{HeaderValue, CONTENT_TYPE},
    Error, ResponseWriter, Result, StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::error;

#[allow(clippy::declare_interior_mutable_const)]
const APPLICATION_JSON: HeaderValue = HeaderValue::from_static("application/json");

/// Label used in the `status` field of error bodies.
#[must_use]
pub const fn status_label(status: StatusCode) -> &'static str {
    match status.as_u16() {
        400 => "bad request",
        401 => "unauthorized",
        403 => "forbidden",
        404 => "not found",
        _ => "internal error",
    }
}

/// The `{"status": ...}` body of a plain success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBody {
    /// Always `"ok"` when written by [`success`].
    pub status: String,
}

impl StatusBody {
    /// The `{"status":"ok"}` body.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_owned(),
        }
    }
}

/// The body written for every error response.
///
/// `message` is left out of the JSON when empty, `error` when no error was supplied. A
/// supplied error whose text is empty is still written as `"error":""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerError {
    /// Label derived from the status code, see [`status_label`].
    pub status: String,
    /// Human-readable debug message.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    /// Text of the underlying error, if one was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServerError {
    /// Build the body for `status`.
    #[must_use]
    pub fn new(status: StatusCode, message: &str, error: Option<&dyn StdError>) -> Self {
        Self {
            status: status_label(status).to_owned(),
            message: message.to_owned(),
            error: error.map(ToString::to_string),
        }
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Status: ({})\nDebugMessage: ({})\nError: ({})",
            self.status,
            self.message,
            self.error.as_deref().unwrap_or_default()
        )
    }
}

/// Writes JSON bodies onto a [`ResponseWriter`].
///
/// A strict writer (the default) returns serialization failures as [`Error::Encode`]. A lenient
/// writer logs them and abandons the write, still reporting success, for handlers that relied
/// on that behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonWriter {
    lenient: bool,
}

impl JsonWriter {
    /// A writer that reports serialization failures.
    #[must_use]
    pub const fn strict() -> Self {
        Self { lenient: false }
    }

    /// A writer that only logs serialization failures.
    #[must_use]
    pub const fn lenient() -> Self {
        Self { lenient: true }
    }

    /// Whether serialization failures are swallowed.
    #[must_use]
    pub const fn is_lenient(&self) -> bool {
        self.lenient
    }

    /// Write `200 OK` with `{"status":"ok"}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be written.
    pub fn success<W: ResponseWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        self.success_with_body(writer, &StatusBody::ok())
    }

    /// Write `200 OK` with the JSON form of `body`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] if `body` cannot be serialized (strict writers only), or an
    /// error if the body cannot be written.
    pub fn success_with_body<W, B>(&self, writer: &mut W, body: &B) -> Result<()>
    where
        W: ResponseWriter + ?Sized,
        B: Serialize + ?Sized,
    {
        match self.encode(body)? {
            Some(bytes) => write_json(writer, StatusCode::OK, &bytes),
            None => Ok(()),
        }
    }

    /// Write `status` with a [`ServerError`] body.
    ///
    /// An empty `message` and a missing `error` are left out of the body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be written.
    pub fn error<W: ResponseWriter + ?Sized>(
        &self,
        writer: &mut W,
        status: StatusCode,
        message: &str,
        error: Option<&dyn StdError>,
    ) -> Result<()> {
        match self.encode(&ServerError::new(status, message, error))? {
            Some(bytes) => write_json(writer, status, &bytes),
            None => {
                writer.write_header(status);
                Ok(())
            }
        }
    }

    fn encode<B: Serialize + ?Sized>(&self, body: &B) -> Result<Option<Vec<u8>>> {
        match serde_json::to_vec(body) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if self.lenient => {
                error!(error = %e, "unexpected error encountered marshaling json");
                Ok(None)
            }
            Err(e) => Err(Error::Encode(e)),
        }
    }
}

fn write_json<W: ResponseWriter + ?Sized>(
    writer: &mut W,
    status: StatusCode,
    bytes: &[u8],
) -> Result<()> {
    writer.headers_mut().insert(CONTENT_TYPE, APPLICATION_JSON);
    writer.write_header(status);
    writer.write_all(bytes)?;
    Ok(())
}

/// Write `200 OK` with `{"status":"ok"}` using a strict [`JsonWriter`].
///
/// # Errors
///
/// Returns an error if the body cannot be written.
pub fn success<W: ResponseWriter + ?Sized>(writer: &mut W) -> Result<()> {
    JsonWriter::strict().success(writer)
}

/// Write `200 OK` with the JSON form of `body` using a strict [`JsonWriter`].
///
/// # Errors
///
/// Returns [`Error::Encode`] if `body` cannot be serialized.
pub fn success_with_body<W, B>(writer: &mut W, body: &B) -> Result<()>
where
    W: ResponseWriter + ?Sized,
    B: Serialize + ?Sized,
{
    JsonWriter::strict().success_with_body(writer, body)
}

/// Write `status` with a [`ServerError`] body using a strict [`JsonWriter`].
///
/// # Errors
///
/// Returns an error if the body cannot be written.
pub fn error<W: ResponseWriter + ?Sized>(
    writer: &mut W,
    status: StatusCode,
    message: &str,
    error: Option<&dyn StdError>,
) -> Result<()> {
    JsonWriter::strict().error(writer, status, message, error)
}

#[cfg(test)]
mod tests {
    use serde::Serializer;

    use super::*;
    use crate::ResponseRecorder;

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> core::result::Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("refusing to serialize"))
        }
    }

    #[test]
    fn labels() {
        let cases = [
            (StatusCode::BAD_REQUEST, "bad request"),
            (StatusCode::UNAUTHORIZED, "unauthorized"),
            (StatusCode::FORBIDDEN, "forbidden"),
            (StatusCode::NOT_FOUND, "not found"),
            (StatusCode::INTERNAL_SERVER_ERROR, "internal error"),
            (StatusCode::CONFLICT, "internal error"),
            (StatusCode::OK, "internal error"),
        ];
        for (status, label) in cases {
            assert_eq!(status_label(status), label, "{status}");
        }
    }

    #[test]
    fn success_body() {
        let mut recorder = ResponseRecorder::new();
        success(&mut recorder).unwrap();

        let response = recorder.result();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(&response.body()[..], br#"{"status":"ok"}"#);
    }

    #[test]
    fn error_body_with_every_field() {
        let cause = std::io::Error::other("disk on fire");
        let mut recorder = ResponseRecorder::new();
        error(
            &mut recorder,
            StatusCode::FORBIDDEN,
            "not yours",
            Some(&cause),
        )
        .unwrap();

        let body: ServerError = serde_json::from_slice(recorder.body()).unwrap();
        assert_eq!(recorder.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            body,
            ServerError {
                status: "forbidden".into(),
                message: "not yours".into(),
                error: Some("disk on fire".into()),
            }
        );
    }

    #[test]
    fn error_body_omits_absent_fields() {
        let mut recorder = ResponseRecorder::new();
        error(&mut recorder, StatusCode::IM_A_TEAPOT, "", None).unwrap();

        assert_eq!(recorder.body(), br#"{"status":"internal error"}"#);
    }

    #[test]
    fn error_with_empty_text_keeps_the_key() {
        #[derive(Debug)]
        struct Silent;

        impl fmt::Display for Silent {
            fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
                Ok(())
            }
        }

        impl StdError for Silent {}

        let mut recorder = ResponseRecorder::new();
        error(&mut recorder, StatusCode::BAD_REQUEST, "", Some(&Silent)).unwrap();

        assert_eq!(recorder.body(), br#"{"status":"bad request","error":""}"#);
        let body: ServerError = serde_json::from_slice(recorder.body()).unwrap();
        assert_eq!(body.error.as_deref(), Some(""));
    }

    #[test]
    fn strict_writer_reports_serialization_failure() {
        let mut recorder = ResponseRecorder::new();
        let error = success_with_body(&mut recorder, &Unserializable).unwrap_err();

        assert!(matches!(error, Error::Encode(_)));
        assert!(!recorder.wrote_header());
        assert!(recorder.body().is_empty());
    }

    #[test]
    fn lenient_writer_swallows_serialization_failure() {
        let mut recorder = ResponseRecorder::new();
        JsonWriter::lenient()
            .success_with_body(&mut recorder, &Unserializable)
            .unwrap();

        assert!(!recorder.wrote_header());
        assert!(recorder.body().is_empty());
    }

    #[test]
    fn display_lists_every_field() {
        let body = ServerError::new(StatusCode::BAD_REQUEST, "missing id", None);
        assert_eq!(
            body.to_string(),
            "Status: (bad request)\nDebugMessage: (missing id)\nError: ()"
        );
    }
}
