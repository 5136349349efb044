use mockhttp::{
    init_logging, respond, Bytes, Expectation, MockRequest, RecordedResponse, Request,
    ResponseWriter, Result, StatusBody, StatusCode, TestCase,
};

/// Succeeds for even path lengths, fails for odd ones. The leading `/` counts.
fn handle_simple(request: &Request<Bytes>, w: &mut dyn ResponseWriter) -> Result<()> {
    if request.uri().path().len() % 2 != 0 {
        return respond::error(
            w,
            StatusCode::INTERNAL_SERVER_ERROR,
            "length of the path is odd",
            None,
        );
    }
    respond::success(w)
}

#[test]
fn path_length_parity() {
    init_logging();

    let cases = [
        ("even length", "/suh", StatusCode::OK),
        ("odd length", "/blah", StatusCode::INTERNAL_SERVER_ERROR),
    ];

    for (name, path, status) in cases {
        let mut mock = MockRequest::get(path).build().unwrap();
        mock.call(&handle_simple).unwrap();

        let raw = mock.raw().unwrap();
        assert_eq!(raw.status(), status, "{name}");
    }
}

#[test]
fn path_length_parity_as_test_cases() {
    init_logging();

    let cases = [
        TestCase::new(
            "even length",
            MockRequest::get("/suh").build().unwrap(),
            Expectation::success(StatusBody::ok()).with_equality(),
        ),
        TestCase::new(
            "odd length",
            MockRequest::get("/blah").build().unwrap(),
            Expectation::status(StatusCode::INTERNAL_SERVER_ERROR),
        ),
    ];

    for case in cases {
        case.run(&handle_simple).unwrap();
    }
}

#[test]
fn wrong_expectation_fails_the_case() {
    let case = TestCase::<StatusBody>::new(
        "odd length expected to pass",
        MockRequest::get("/blah").build().unwrap(),
        Expectation::status(StatusCode::OK),
    );

    let error = case.run(&handle_simple).unwrap_err();
    assert!(error.is_mismatch());
    assert_eq!(error.to_string(), "expected status 200, but got 500");
}
