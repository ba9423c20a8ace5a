//! Model-name gates driven by [`ModelPolicyConfig`].

use antigravity_bridge_types::ModelPolicyConfig;

/// How a requested model name is routed upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRoute {
    /// Name sent as the envelope `model`.
    pub upstream: String,
    /// Thinking eligibility of the requested name.
    pub thinking: bool,
    /// Whether `thoughtSignature` may be attached for the upstream model.
    pub signatures_allowed: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct ModelPolicy<'a> {
    config: &'a ModelPolicyConfig,
}

impl<'a> ModelPolicy<'a> {
    pub fn new(config: &'a ModelPolicyConfig) -> Self {
        Self { config }
    }

    /// Upstream name for `model`; unknown names map to themselves.
    pub fn resolve_alias<'m>(&'m self, model: &'m str) -> &'m str {
        match self.config.aliases.get(model) {
            Some(target) => {
                tracing::debug!("[Model-Policy] Alias: {} -> {}", model, target);
                target
            },
            None => model,
        }
    }

    pub fn is_thinking_model(&self, model: &str) -> bool {
        let suffix = &self.config.thinking_suffix;
        (!suffix.is_empty() && model.ends_with(suffix.as_str()))
            || self.config.thinking_models.iter().any(|m| m == model)
            || self
                .config
                .thinking_prefixes
                .iter()
                .any(|p| !p.is_empty() && model.starts_with(p.as_str()))
    }

    /// True when the model belongs to a vendor whose backend rejects
    /// `thoughtSignature`.
    pub fn excludes_signatures(&self, model: &str) -> bool {
        self.config
            .signature_excluded_markers
            .iter()
            .any(|marker| !marker.is_empty() && model.contains(marker.as_str()))
    }

    pub fn route(&self, requested: &str) -> ModelRoute {
        let upstream = self.resolve_alias(requested).to_string();
        ModelRoute {
            thinking: self.is_thinking_model(requested),
            signatures_allowed: !self.excludes_signatures(&upstream),
            upstream,
        }
    }
}
