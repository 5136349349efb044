//! Path parameters for handlers that normally sit behind a router.
//!
//! A router matches the request path and leaves the captured parameters somewhere the handler
//! can read them. Mock requests skip the router, so the parameters are injected directly:
//! ```
//! use mockhttp::{MockRequest, routing::{Params, ParamsExtension}};
//!
//! let mock = MockRequest::get("/things/1")
//!     .path_params(&ParamsExtension, [("id", "1")])
//!     .build()
//!     .unwrap();
//! assert_eq!(Params::from_request(mock.request()).get("id").unwrap(), "1");
//! ```
//!
//! Or captured from the request path with a route template:
//! ```
//! use mockhttp::{MockRequest, routing::Params};
//!
//! let mock = MockRequest::get("/things/1/wax")
//!     .route("/things/{id}/{name}")
//!     .build()
//!     .unwrap();
//! assert_eq!(Params::from_request(mock.request()).get("name").unwrap(), "wax");
//! ```

mod adapter;
pub use adapter::{adapter_named, ParamsExtension, PathParamAdapter};
mod param;
pub use param::{MissingParam, Params};
mod route;
pub use route::match_route;
