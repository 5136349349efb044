//! The error type shared by every fallible operation in mockhttp.

use core::fmt;
use std::string::FromUtf8Error;

use http::StatusCode;

/// A specialized `Result` type for mockhttp operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised while building fixtures, decoding recordings or checking expectations.
///
/// Writing a response body and reading it back are asymmetric: the writer side only
/// reports [`Error::Encode`], everything else comes from the read and compare side.
#[derive(Debug)]
pub enum Error {
    /// The mock request could not be assembled (bad URI, header name or value).
    InvalidRequest(http::Error),
    /// The request target is neither a path starting with `/` nor an absolute URL.
    InvalidTarget(String),
    /// The recorded body could not be read as text.
    Body(FromUtf8Error),
    /// Writing to a response sink failed.
    Io(std::io::Error),
    /// The body is not valid JSON for the target shape.
    Decode(serde_json::Error),
    /// A payload could not be serialized before being written.
    Encode(serde_json::Error),
    /// A payload was required but the body was empty.
    EmptyPayload,
    /// The recorded status differs from the expected one.
    StatusMismatch {
        /// Status the expectation declared.
        expected: StatusCode,
        /// Status the handler produced.
        actual: StatusCode,
    },
    /// The recorded body differs from the expected raw body.
    BodyMismatch {
        /// Body the expectation declared.
        expected: String,
        /// Body the handler produced.
        actual: String,
    },
    /// A comparison function rejected the decoded value.
    ValueMismatch(eyre::Report),
    /// There is no expectation, or it has no value to compare with.
    MissingExpectation,
    /// There is no result, or it has no decoded value to compare with.
    MissingResult,
    /// No path-param adapter is registered under this name.
    UnsupportedRouter(String),
    /// A route template is invalid or does not match the request path.
    Route(String),
}

impl Error {
    /// Returns `true` for failures reported by the expectation checks.
    #[must_use]
    pub const fn is_mismatch(&self) -> bool {
        matches!(
            self,
            Self::StatusMismatch { .. } | Self::BodyMismatch { .. } | Self::ValueMismatch(_)
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRequest(e) => write!(f, "invalid mock request: {e}"),
            Self::InvalidTarget(target) => {
                write!(f, "invalid request target `{target}`: expected a path or an absolute URL")
            }
            Self::Body(e) => write!(f, "failed to read response body: {e}"),
            Self::Io(e) => write!(f, "failed to write response body: {e}"),
            Self::Decode(e) => write!(f, "failed to decode response body: {e}"),
            Self::Encode(e) => write!(f, "unexpected error encountered marshaling json: {e}"),
            Self::EmptyPayload => f.write_str(
                "expected a payload in the response body, but got an empty string",
            ),
            Self::StatusMismatch { expected, actual } => write!(
                f,
                "expected status {}, but got {}",
                expected.as_u16(),
                actual.as_u16()
            ),
            Self::BodyMismatch { expected, actual } => {
                write!(f, "expected body {expected:?}, but got {actual:?}")
            }
            Self::ValueMismatch(report) => write!(f, "unexpected result: {report}"),
            Self::MissingExpectation => f.write_str("expectation should not be absent"),
            Self::MissingResult => f.write_str("result should not be absent"),
            Self::UnsupportedRouter(name) => write!(f, "path param type not supported: {name}"),
            Self::Route(msg) => write!(f, "route error: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidRequest(e) => Some(e),
            Self::Body(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Decode(e) | Self::Encode(e) => Some(e),
            Self::ValueMismatch(report) => Some(&**report),
            _ => None,
        }
    }
}

impl From<http::Error> for Error {
    fn from(error: http::Error) -> Self {
        Self::InvalidRequest(error)
    }
}

impl From<FromUtf8Error> for Error {
    fn from(error: FromUtf8Error) -> Self {
        Self::Body(error)
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mismatch_message() {
        let error = Error::StatusMismatch {
            expected: StatusCode::OK,
            actual: StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert_eq!(error.to_string(), "expected status 200, but got 500");
        assert!(error.is_mismatch());
    }

    #[test]
    fn misuse_is_not_a_mismatch() {
        assert!(!Error::MissingExpectation.is_mismatch());
        assert!(!Error::MissingResult.is_mismatch());
        assert!(!Error::EmptyPayload.is_mismatch());
    }

    #[test]
    fn invalid_target_message() {
        let error = Error::InvalidTarget("example".into());
        assert_eq!(
            error.to_string(),
            "invalid request target `example`: expected a path or an absolute URL"
        );
    }

    #[test]
    fn decode_error_keeps_source() {
        let decode = serde_json::from_str::<Vec<u8>>("{}").unwrap_err();
        let error = Error::Decode(decode);
        assert!(std::error::Error::source(&error).is_some());
    }
}
