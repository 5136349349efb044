use matchit::Router;
use mockhttp_core::{Error, Result};

use super::Params;

/// Match `path` against a route template such as `/things/{id}` and capture its params.
///
/// Templates use the same syntax as the router: `{name}` for a segment and `{*name}` for a
/// catch-all.
///
/// # Errors
///
/// Returns [`Error::Route`] when the template is invalid or `path` does not match it.
pub fn match_route(template: &str, path: &str) -> Result<Params> {
    let mut router = Router::new();
    router
        .insert(template, ())
        .map_err(|error| Error::Route(format!("invalid template `{template}`: {error}")))?;

    let matched = router
        .at(path)
        .map_err(|_| Error::Route(format!("path `{path}` does not match `{template}`")))?;

    Ok(Params::new(matched.params.iter()))
}
