//! Protocol mappers.
//!
//! - `openai`: OpenAI chat request -> v1internal envelope
//! - `gemini`: native Gemini request wrapping and response signature harvesting

pub mod gemini;
pub mod openai;

use antigravity_bridge_types::BridgeConfig;

use crate::proxy::common::{RequestIdSource, UuidRequestIds};
use crate::proxy::SignatureCache;

static DEFAULT_REQUEST_IDS: UuidRequestIds = UuidRequestIds;

/// Collaborators every mapper needs: configuration, the signature cache and
/// the request id generator.
#[derive(Clone, Copy)]
pub struct MapperContext<'a> {
    pub config: &'a BridgeConfig,
    pub cache: &'a SignatureCache,
    pub ids: &'a dyn RequestIdSource,
}

impl<'a> MapperContext<'a> {
    /// Context with `agent-<uuid>` request ids.
    pub fn new(config: &'a BridgeConfig, cache: &'a SignatureCache) -> Self {
        Self { config, cache, ids: &DEFAULT_REQUEST_IDS }
    }

    #[must_use]
    pub fn with_request_ids(mut self, ids: &'a dyn RequestIdSource) -> Self {
        self.ids = ids;
        self
    }
}

impl std::fmt::Debug for MapperContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapperContext")
            .field("config", self.config)
            .field("cache", self.cache)
            .finish_non_exhaustive()
    }
}
