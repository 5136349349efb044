//! Table-driven handler tests.

use mockhttp_core::{Handler, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, info_span};

use crate::{
    decode::{DecodePolicy, JsonResponse, RecordedResponse},
    expect::Expectation,
    request::MockRequest,
};

/// One named row of a handler test table.
///
/// ```
/// use mockhttp::{respond, Bytes, Expectation, MockRequest, Request, ResponseWriter, StatusCode, TestCase};
///
/// fn handle_simple(request: &Request<Bytes>, w: &mut dyn ResponseWriter) -> mockhttp::Result<()> {
///     if request.uri().path().len() % 2 != 0 {
///         return respond::error(w, StatusCode::INTERNAL_SERVER_ERROR, "length of the path is odd", None);
///     }
///     respond::success(w)
/// }
///
/// let cases = [
///     TestCase::<respond::StatusBody>::new(
///         "even length",
///         MockRequest::get("/suh").build().unwrap(),
///         Expectation::status(StatusCode::OK),
///     ),
///     TestCase::new(
///         "odd length",
///         MockRequest::get("/blah").build().unwrap(),
///         Expectation::status(StatusCode::INTERNAL_SERVER_ERROR),
///     ),
/// ];
/// for case in cases {
///     case.run(&handle_simple).unwrap();
/// }
/// ```
#[derive(Debug)]
pub struct TestCase<T> {
    /// Name used in the tracing span and in failure reports.
    pub name: String,
    /// The request the handler receives.
    pub input: MockRequest,
    /// What the handler should produce.
    pub expected: Expectation<T>,
    /// How the recorded body is decoded.
    pub policy: DecodePolicy,
}

impl<T: DeserializeOwned> TestCase<T> {
    /// A case decoded with the default policy.
    pub fn new(name: impl Into<String>, input: MockRequest, expected: Expectation<T>) -> Self {
        Self {
            name: name.into(),
            input,
            expected,
            policy: DecodePolicy::default(),
        }
    }

    /// Decode the recorded body with `policy` instead.
    #[must_use]
    pub fn with_policy(mut self, policy: DecodePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run `handler`, decode what it recorded and check it against the expectation.
    ///
    /// # Errors
    ///
    /// Returns the handler's own error, a decode error, or the failed expectation.
    pub fn run<H: Handler + ?Sized>(mut self, handler: &H) -> Result<JsonResponse<T>> {
        let span = info_span!("test_case", name = %self.name);
        let _guard = span.enter();

        self.input.call(handler)?;
        let result = self.input.json::<T>(self.policy)?;
        self.expected.validate(&result)?;
        debug!(status = %result.status(), "test case passed");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use mockhttp_core::{Bytes, Error, Request, ResponseWriter, StatusCode};
    use serde::Serialize;

    use super::*;
    use crate::respond;

    #[derive(Debug, PartialEq, Serialize, serde::Deserialize)]
    struct Count {
        count: usize,
    }

    fn count_segments(request: &Request<Bytes>, w: &mut dyn ResponseWriter) -> Result<()> {
        let count = request.uri().path().split('/').filter(|s| !s.is_empty()).count();
        respond::success_with_body(w, &Count { count })
    }

    #[test]
    fn passing_case_returns_decoded_response() {
        crate::init_logging();
        let case = TestCase::new(
            "two segments",
            MockRequest::get("/a/b").build().unwrap(),
            Expectation::success(Count { count: 2 }).with_equality(),
        );

        let result = case.run(&count_segments).unwrap();
        assert_eq!(result.value(), Some(&Count { count: 2 }));
    }

    #[test]
    fn failing_case_reports_mismatch() {
        let case = TestCase::new(
            "wrong count",
            MockRequest::get("/a").build().unwrap(),
            Expectation::success(Count { count: 2 }).with_equality(),
        );

        let error = case.run(&count_segments).unwrap_err();
        assert!(matches!(error, Error::ValueMismatch(_)));
    }

    #[test]
    fn policy_is_applied() {
        let case = TestCase::<Count>::new(
            "empty body",
            MockRequest::get("/").build().unwrap(),
            Expectation::status(StatusCode::NO_CONTENT),
        )
        .with_policy(DecodePolicy::Required);

        fn no_content(_: &Request<Bytes>, w: &mut dyn ResponseWriter) -> Result<()> {
            w.write_header(StatusCode::NO_CONTENT);
            Ok(())
        }
        assert!(matches!(case.run(&no_content), Err(Error::EmptyPayload)));
    }
}
