use mockhttp::{
    init_logging, respond, validate_errors, Bytes, Context, DecodePolicy, Expectation,
    MockRequest, Request, ResponseWriter, Result, ServerError, StatusCode, TestCase,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Place {
    id: i32,
    city: String,
}

/// Reads an `id` and a `city` from the request context and echoes them back.
fn handle_request_with_context(
    request: &Request<Bytes>,
    w: &mut dyn ResponseWriter,
) -> Result<()> {
    let context = Context::from_request(request);
    let Some(&id) = context.get::<i32>("id") else {
        return respond::error(
            w,
            StatusCode::BAD_REQUEST,
            "expected an id of type int in context",
            None,
        );
    };
    let Some(city) = context.get::<String>("city") else {
        return respond::error(
            w,
            StatusCode::BAD_REQUEST,
            "expected a city of type string in context",
            None,
        );
    };
    respond::success_with_body(
        w,
        &Place {
            id,
            city: city.clone(),
        },
    )
}

fn bad_request(message: &str) -> Expectation<ServerError> {
    Expectation::failure(
        StatusCode::BAD_REQUEST,
        ServerError {
            status: "bad request".into(),
            message: message.into(),
            error: None,
        },
    )
    .with_validation(validate_errors)
}

#[test]
fn errors_with_context() {
    init_logging();

    let cases = [
        TestCase::new(
            "no id in context",
            MockRequest::get("/").build().unwrap(),
            bad_request("expected an id of type int in context"),
        ),
        TestCase::new(
            "no city in context",
            MockRequest::get("/").value("id", 123_i32).build().unwrap(),
            bad_request("expected a city of type string in context"),
        ),
        TestCase::new(
            "id of the wrong type",
            MockRequest::get("/")
                .value("id", "123")
                .value("city", String::from("Dallas"))
                .build()
                .unwrap(),
            bad_request("expected an id of type int in context"),
        ),
    ];

    for case in cases {
        case.with_policy(DecodePolicy::NonEmpty)
            .run(&handle_request_with_context)
            .unwrap();
    }
}

#[test]
fn success_with_context() {
    init_logging();

    let case = TestCase::new(
        "success",
        MockRequest::get("/")
            .value("id", 123_i32)
            .value("city", String::from("Dallas"))
            .build()
            .unwrap(),
        Expectation::success(Place {
            id: 123,
            city: "Dallas".into(),
        })
        .with_validation(|expected, result| {
            eyre::ensure!(
                expected.id == result.id && expected.city == result.city,
                "unexpected result: {result:?}"
            );
            Ok(())
        }),
    );

    let result = case.run(&handle_request_with_context).unwrap();
    assert_eq!(result.into_value().map(|place| place.id), Some(123));
}

#[test]
fn whole_context_can_be_supplied() {
    let context = Context::new()
        .with("id", 7_i32)
        .with("city", String::from("Austin"));
    let mut mock = MockRequest::get("/").context(context).build().unwrap();
    mock.call(&handle_request_with_context).unwrap();

    let result = mock.json::<Place>(DecodePolicy::default()).unwrap();
    assert_eq!(
        result.value(),
        Some(&Place {
            id: 7,
            city: "Austin".into()
        })
    );
}

#[test]
fn error_bodies_are_skipped_by_default() {
    let mut mock = MockRequest::get("/").build().unwrap();
    mock.call(&handle_request_with_context).unwrap();

    let error = bad_request("expected an id of type int in context")
        .validate(&mock.json(DecodePolicy::SuccessOnly).unwrap())
        .unwrap_err();
    assert!(matches!(error, mockhttp::Error::MissingResult));
}
