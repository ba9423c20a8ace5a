use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::io::Read;
use std::path::Path;

use antigravity_bridge_core::modules::config as core_config;
use antigravity_bridge_core::{
    harvest_signatures, sanitize_schema, HarvestStats, MapperContext, RequestAssembler,
    SignatureCache,
};
use antigravity_bridge_types::protocol::ChatRequest;
use antigravity_bridge_types::{BridgeConfig, SessionToken};

/// Read a JSON document from `path`, or from stdin when `path` is `-`.
pub fn read_json(path: &Path) -> Result<Value> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).context("Failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}

pub fn convert(
    config: &BridgeConfig,
    request: Value,
    token: &SessionToken,
    responses: &[Value],
) -> Result<Value> {
    let request: ChatRequest =
        serde_json::from_value(request).context("Input is not a chat completion request")?;
    let cache = SignatureCache::from_config(&config.signature_cache);
    for response in responses {
        harvest_signatures(response, &cache);
    }
    tracing::debug!("[Convert] {} cached signatures before conversion", cache.len());

    let envelope = RequestAssembler::new(config, &cache).assemble_chat(&request, token);
    Ok(serde_json::to_value(envelope)?)
}

pub fn wrap(
    config: &BridgeConfig,
    body: &Value,
    model: &str,
    token: &SessionToken,
) -> Result<Value> {
    let cache = SignatureCache::from_config(&config.signature_cache);
    let ctx = MapperContext::new(config, &cache);
    let envelope = antigravity_bridge_core::wrap_native(body, model, token, &ctx)?;
    Ok(serde_json::to_value(envelope)?)
}

pub fn sanitize(schema: &Value) -> Value {
    sanitize_schema(schema)
}

pub fn harvest(responses: &[Value]) -> Value {
    let cache = SignatureCache::new();
    let mut total = HarvestStats::default();
    for response in responses {
        let stats = harvest_signatures(response, &cache);
        total.tool_signatures += stats.tool_signatures;
        total.text_signatures += stats.text_signatures;
    }
    json!({
        "toolSignatures": total.tool_signatures,
        "textSignatures": total.text_signatures,
        "cachedToolEntries": cache.tool_len(),
        "cachedTextEntries": cache.text_len(),
    })
}

/// Write the default config to `path`. Returns `false` when the file exists
/// and `force` is not set.
pub fn init_config(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    core_config::save_config(path, &BridgeConfig::default())?;
    Ok(true)
}
