//! Expected responses and how they are compared with recorded ones.

use std::fmt;

use mockhttp_core::{Error, Result, StatusCode};

use crate::{
    decode::{JsonResponse, RecordedResponse},
    respond::ServerError,
};

type Comparison<T> = Box<dyn Fn(&T, &T) -> eyre::Result<()>>;

/// What a test expects a handler to produce.
///
/// The status is always compared. The raw body is compared when one was set. Decoded values
/// are compared only through a comparison function: without one, any value passes.
///
/// ```
/// use mockhttp::{Expectation, JsonResponse, StatusCode};
///
/// let expected = Expectation::success(3).with_validation(|expected, result| {
///     eyre::ensure!(expected == result, "{expected} != {result}");
///     Ok(())
/// });
///
/// assert!(expected.validate(&JsonResponse::new().with_success(3)).is_ok());
/// assert!(expected.validate(&JsonResponse::new().with_success(4)).is_err());
/// assert!(expected
///     .validate(&JsonResponse::new().with_failure(StatusCode::NOT_FOUND, 3))
///     .is_err());
/// ```
pub struct Expectation<T> {
    status: StatusCode,
    body: Option<String>,
    value: Option<T>,
    comparison: Option<Comparison<T>>,
}

impl<T: fmt::Debug> fmt::Debug for Expectation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expectation")
            .field("status", &self.status)
            .field("body", &self.body)
            .field("value", &self.value)
            .field("comparison", &self.comparison.is_some())
            .finish()
    }
}

impl<T> Expectation<T> {
    /// Expect `status` and nothing else.
    #[must_use]
    pub const fn status(status: StatusCode) -> Self {
        Self {
            status,
            body: None,
            value: None,
            comparison: None,
        }
    }

    /// Expect `200 OK` carrying `value`.
    #[must_use]
    pub const fn success(value: T) -> Self {
        Self::failure(StatusCode::OK, value)
    }

    /// Expect `status` carrying `value`.
    #[must_use]
    pub const fn failure(status: StatusCode, value: T) -> Self {
        Self {
            status,
            body: None,
            value: Some(value),
            comparison: None,
        }
    }

    /// Also expect the raw body to equal `body`.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Compare decoded values with `f`, called as `f(expected, result)`.
    #[must_use]
    pub fn with_validation<F>(mut self, f: F) -> Self
    where
        F: Fn(&T, &T) -> eyre::Result<()> + 'static,
    {
        self.comparison = Some(Box::new(f));
        self
    }

    /// The expected status.
    #[must_use]
    pub const fn expected_status(&self) -> StatusCode {
        self.status
    }

    /// The expected value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Compare status and body only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StatusMismatch`] or [`Error::BodyMismatch`].
    pub fn validate_raw<R: RecordedResponse>(&self, result: &R) -> Result<()> {
        if self.status != result.status() {
            return Err(Error::StatusMismatch {
                expected: self.status,
                actual: result.status(),
            });
        }
        match &self.body {
            Some(body) if body != result.body() => Err(Error::BodyMismatch {
                expected: body.clone(),
                actual: result.body().to_owned(),
            }),
            _ => Ok(()),
        }
    }

    /// Compare against a decoded response.
    ///
    /// # Errors
    ///
    /// Returns a mismatch error as [`validate_raw`](Self::validate_raw) does, then
    /// [`Error::ValueMismatch`] when the comparison function rejects the values. With a
    /// comparison function, a missing expected value is [`Error::MissingExpectation`] and a
    /// missing decoded value is [`Error::MissingResult`].
    pub fn validate(&self, result: &JsonResponse<T>) -> Result<()> {
        self.validate_raw(result)?;
        let Some(compare) = &self.comparison else {
            return Ok(());
        };
        let expected = self.value.as_ref().ok_or(Error::MissingExpectation)?;
        let actual = result.value().ok_or(Error::MissingResult)?;
        compare(expected, actual).map_err(Error::ValueMismatch)
    }
}

impl<T: PartialEq + fmt::Debug + 'static> Expectation<T> {
    /// Compare decoded values with `==`.
    #[must_use]
    pub fn with_equality(self) -> Self {
        self.with_validation(|expected, result| {
            eyre::ensure!(
                expected == result,
                "expected {expected:?}, but got {result:?}"
            );
            Ok(())
        })
    }
}

/// Compare an optional expectation with an optional result.
///
/// # Errors
///
/// Returns [`Error::MissingExpectation`] or [`Error::MissingResult`] when either side is
/// absent, otherwise whatever [`Expectation::validate`] returns.
pub fn validate<T>(
    expected: Option<&Expectation<T>>,
    result: Option<&JsonResponse<T>>,
) -> Result<()> {
    let expected = expected.ok_or(Error::MissingExpectation)?;
    let result = result.ok_or(Error::MissingResult)?;
    expected.validate(result)
}

/// Comparison for error bodies: `status` and `message` must match, `error` is ignored.
///
/// # Errors
///
/// Returns a report naming the first field that differs.
pub fn validate_errors(expected: &ServerError, result: &ServerError) -> eyre::Result<()> {
    eyre::ensure!(
        expected.status == result.status,
        "expected status {:?}, but got {:?}",
        expected.status,
        result.status
    );
    eyre::ensure!(
        expected.message == result.message,
        "expected message {:?}, but got {:?}",
        expected.message,
        result.message
    );
    Ok(())
}
