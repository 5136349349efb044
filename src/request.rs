//! The request/recorder fixture handed to a handler under test.

use mockhttp_core::{
    header::{HeaderName, HeaderValue, HOST},
    Bytes, Error, Handler, Method, Request, Response, ResponseWriter, Result, Uri,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    context::Context,
    decode::{DecodePolicy, JsonResponse, RawResponse},
    recorder::ResponseRecorder,
    routing::{adapter_named, match_route, Params, ParamsExtension, PathParamAdapter},
};

const DEFAULT_HOST: &str = "example.com";

/// A mock request paired with the recorder its handler writes into.
///
/// ```
/// use mockhttp::{respond, Bytes, MockRequest, RecordedResponse, Request, ResponseWriter};
///
/// fn handler(_: &Request<Bytes>, w: &mut dyn ResponseWriter) -> mockhttp::Result<()> {
///     respond::success(w)
/// }
///
/// let mut mock = MockRequest::get("/example").build().unwrap();
/// mock.call(&handler).unwrap();
///
/// let raw = mock.raw().unwrap();
/// assert_eq!(raw.body(), r#"{"status":"ok"}"#);
/// ```
#[derive(Debug)]
pub struct MockRequest {
    request: Request<Bytes>,
    recorder: ResponseRecorder,
}

impl MockRequest {
    /// Start building a request with `method`, `path` and `body`.
    ///
    /// `path` is either a path starting with `/` or an absolute URL. The `Host` header is taken
    /// from the URL's authority when there is one and is `example.com` otherwise. Anything
    /// else, such as `"example"`, makes [`build`](MockRequestBuilder::build) fail with
    /// [`Error::InvalidTarget`].
    pub fn builder<M>(method: M, path: &str, body: impl Into<Bytes>) -> MockRequestBuilder
    where
        Method: TryFrom<M>,
        <Method as TryFrom<M>>::Error: Into<http::Error>,
    {
        let body = body.into();
        let request = parse_target(path).and_then(|uri| {
            let host = host_header(&uri)?;
            Request::builder()
                .method(method)
                .uri(uri)
                .header(HOST, host)
                .body(body)
                .map_err(Error::from)
        });
        MockRequestBuilder { request }
    }

    /// Start building a `GET` request with an empty body.
    pub fn get(path: &str) -> MockRequestBuilder {
        Self::builder(Method::GET, path, Bytes::new())
    }

    /// Start building a `POST` request.
    pub fn post(path: &str, body: impl Into<Bytes>) -> MockRequestBuilder {
        Self::builder(Method::POST, path, body)
    }

    /// The request handed to the handler.
    #[must_use]
    pub const fn request(&self) -> &Request<Bytes> {
        &self.request
    }

    /// Mutable access to the request, for anything the builder does not cover.
    pub fn request_mut(&mut self) -> &mut Request<Bytes> {
        &mut self.request
    }

    /// The recorder the handler writes into.
    #[must_use]
    pub const fn recorder(&self) -> &ResponseRecorder {
        &self.recorder
    }

    /// Mutable access to the recorder.
    pub fn recorder_mut(&mut self) -> &mut ResponseRecorder {
        &mut self.recorder
    }

    /// Borrow the request and the recorder at once, to call a handler by hand.
    pub fn split(&mut self) -> (&Request<Bytes>, &mut ResponseRecorder) {
        (&self.request, &mut self.recorder)
    }

    /// Run a handler function against this request.
    ///
    /// # Errors
    ///
    /// Returns whatever error the handler returns.
    pub fn serve<F>(&mut self, handler: F) -> Result<&mut Self>
    where
        F: FnOnce(&Request<Bytes>, &mut dyn ResponseWriter) -> Result<()>,
    {
        handler(&self.request, &mut self.recorder)?;
        Ok(self)
    }

    /// Run a [`Handler`] against this request.
    ///
    /// # Errors
    ///
    /// Returns whatever error the handler returns.
    pub fn call<H: Handler + ?Sized>(&mut self, handler: &H) -> Result<&mut Self> {
        handler.handle(&self.request, &mut self.recorder)?;
        Ok(self)
    }

    /// Run a handler that builds a whole response, recording what it returns.
    pub fn respond_with<F, B>(&mut self, handler: F) -> &mut Self
    where
        F: FnOnce(&Request<Bytes>) -> Response<B>,
        B: Into<Bytes>,
    {
        let response = handler(&self.request);
        self.recorder.record(response);
        self
    }

    /// The recorded response.
    #[must_use]
    pub fn result(&self) -> Response<Bytes> {
        self.recorder.result()
    }

    /// The recorded response as raw text.
    ///
    /// # Errors
    ///
    /// See [`RawResponse::from_response`].
    pub fn raw(&self) -> Result<RawResponse> {
        RawResponse::from_response(self.result())
    }

    /// The recorded response decoded into `T` as `policy` allows.
    ///
    /// # Errors
    ///
    /// See [`JsonResponse::decode`].
    pub fn json<T: DeserializeOwned>(&self, policy: DecodePolicy) -> Result<JsonResponse<T>> {
        JsonResponse::decode(self.result(), policy)
    }
}

fn parse_target(target: &str) -> Result<Uri> {
    let uri = Uri::try_from(target).map_err(|e| Error::InvalidRequest(e.into()))?;
    if uri.scheme().is_none() && !target.starts_with('/') {
        return Err(Error::InvalidTarget(target.to_owned()));
    }
    Ok(uri)
}

fn host_header(uri: &Uri) -> Result<HeaderValue> {
    let Some(authority) = uri.authority() else {
        return Ok(HeaderValue::from_static(DEFAULT_HOST));
    };
    let host = authority.port().map_or_else(
        || authority.host().to_owned(),
        |port| format!("{}:{port}", authority.host()),
    );
    HeaderValue::try_from(host).map_err(|e| Error::InvalidRequest(e.into()))
}

/// Builder for [`MockRequest`].
///
/// Like [`http::request::Builder`], the first error is kept and reported by
/// [`build`](Self::build); later calls are skipped.
#[derive(Debug)]
#[must_use]
pub struct MockRequestBuilder {
    request: Result<Request<Bytes>>,
}

impl MockRequestBuilder {
    fn and_then<F>(self, f: F) -> Self
    where
        F: FnOnce(Request<Bytes>) -> Result<Request<Bytes>>,
    {
        Self {
            request: self.request.and_then(f),
        }
    }

    /// Insert a value into the request [`Context`] under `key`.
    pub fn value<T: std::any::Any + Send + Sync>(self, key: impl Into<String>, value: T) -> Self {
        let key = key.into();
        self.and_then(|mut request| {
            request
                .extensions_mut()
                .get_or_insert_default::<Context>()
                .insert(key, value);
            Ok(request)
        })
    }

    /// Replace the request [`Context`].
    pub fn context(self, context: Context) -> Self {
        self.and_then(|mut request| {
            request.extensions_mut().insert(context);
            Ok(request)
        })
    }

    /// Insert a typed extension, for handlers that read extensions directly.
    pub fn extension<T: Clone + Send + Sync + 'static>(self, value: T) -> Self {
        self.and_then(|mut request| {
            request.extensions_mut().insert(value);
            Ok(request)
        })
    }

    /// Inject path parameters through `adapter`.
    pub fn path_params<A, I, K, V>(self, adapter: &A, params: I) -> Self
    where
        A: PathParamAdapter + ?Sized,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let params = Params::new(params);
        self.and_then(|mut request| {
            adapter.inject(&mut request, params);
            Ok(request)
        })
    }

    /// Inject path parameters through the adapter registered as `name`.
    ///
    /// An unknown name makes [`build`](Self::build) fail with [`Error::UnsupportedRouter`].
    pub fn path_params_named<I, K, V>(self, name: &str, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        match adapter_named(name) {
            Ok(adapter) => self.path_params(adapter, params),
            Err(error) => self.and_then(|_| Err(error)),
        }
    }

    /// Capture path parameters by matching the request path against `template`.
    ///
    /// The params are stored with [`ParamsExtension`].
    pub fn route(self, template: &str) -> Self {
        self.and_then(|mut request| {
            let params = match_route(template, request.uri().path())?;
            ParamsExtension.inject(&mut request, params);
            Ok(request)
        })
    }

    /// Set a header, replacing any previous value.
    pub fn header<K, V>(self, name: K, value: V) -> Self
    where
        HeaderName: TryFrom<K>,
        <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
    {
        self.and_then(|mut request| {
            let name = HeaderName::try_from(name).map_err(|e| Error::InvalidRequest(e.into()))?;
            let value = HeaderValue::try_from(value).map_err(|e| Error::InvalidRequest(e.into()))?;
            request.headers_mut().insert(name, value);
            Ok(request)
        })
    }

    /// Finish the fixture.
    ///
    /// # Errors
    ///
    /// Returns the first error met while building: an invalid method, URI, header, route
    /// template or adapter name.
    pub fn build(self) -> Result<MockRequest> {
        let request = self.request?;
        debug!(method = %request.method(), uri = %request.uri(), "built mock request");
        Ok(MockRequest {
            request,
            recorder: ResponseRecorder::new(),
        })
    }
}
