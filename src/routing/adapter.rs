use std::fmt::Debug;

use mockhttp_core::{Bytes, Error, Request, Result};
use tracing::debug;

use super::Params;

/// Stores path parameters in a request the way a particular router would.
///
/// Handlers read path parameters through their router's own API, so a mock request has to
/// put them exactly where that router leaves them after matching. Supporting another router
/// means adding another implementation of this trait and registering it in [`adapter_named`].
pub trait PathParamAdapter: Debug + Send + Sync {
    /// Name used to look the adapter up.
    fn name(&self) -> &'static str;

    /// Attach `params` to `request`, replacing any params injected earlier.
    fn inject(&self, request: &mut Request<Bytes>, params: Params);
}

/// Stores a [`Params`] list in the request extensions, where [`Params::from_request`] finds it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParamsExtension;

impl PathParamAdapter for ParamsExtension {
    fn name(&self) -> &'static str {
        "params"
    }

    fn inject(&self, request: &mut Request<Bytes>, params: Params) {
        debug!(adapter = self.name(), count = params.len(), "injecting path params");
        request.extensions_mut().insert(params);
    }
}

const ADAPTERS: &[&dyn PathParamAdapter] = &[&ParamsExtension];

/// Look up a registered adapter by name.
///
/// # Errors
///
/// Returns [`Error::UnsupportedRouter`] when no adapter has that name.
pub fn adapter_named(name: &str) -> Result<&'static dyn PathParamAdapter> {
    ADAPTERS
        .iter()
        .copied()
        .find(|adapter| adapter.name() == name)
        .ok_or_else(|| Error::UnsupportedRouter(name.to_owned()))
}
