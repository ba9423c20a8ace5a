mod content_parts;
mod generation_config;
mod message_transform;
mod system_instruction;
mod tool_declarations;
mod tool_result;


pub use generation_config::{build_generation_config, ThinkingMode, STOP_SEQUENCES};
pub use message_transform::MessageConverter;
pub use system_instruction::{build_system_instruction, merge_instruction};
pub use tool_declarations::build_tool_groups;
pub use tool_result::tool_output;

use antigravity_bridge_types::protocol::{
    BackendRequest, ChatRequest, ChatRole, ChatTurn, RequestEnvelope, ToolConfig, USER_AGENT,
};
use antigravity_bridge_types::{BridgeConfig, SamplingParams, SessionToken};
use serde_json::Value;

use crate::error::AppResult;
use crate::proxy::common::{ModelPolicy, ModelRoute, RequestIdSource};
use crate::proxy::mappers::gemini;
use crate::proxy::mappers::MapperContext;
use crate::proxy::SignatureCache;

/// Builds v1internal envelopes from OpenAI chat input.
///
/// Holds no per-request state; one assembler can serve every request of a
/// process.
#[derive(Debug, Clone, Copy)]
pub struct RequestAssembler<'a> {
    ctx: MapperContext<'a>,
}

impl<'a> RequestAssembler<'a> {
    pub fn new(config: &'a BridgeConfig, cache: &'a SignatureCache) -> Self {
        Self { ctx: MapperContext::new(config, cache) }
    }

    pub fn from_context(ctx: MapperContext<'a>) -> Self {
        Self { ctx }
    }

    #[must_use]
    pub fn with_request_ids(self, ids: &'a dyn RequestIdSource) -> Self {
        Self { ctx: self.ctx.with_request_ids(ids) }
    }

    pub fn context(&self) -> MapperContext<'a> {
        self.ctx
    }

    /// Translate a chat history into a request envelope.
    pub fn assemble(
        &self,
        turns: &[ChatTurn],
        model: &str,
        params: &SamplingParams,
        tools: &[Value],
        token: &SessionToken,
    ) -> RequestEnvelope {
        let config = self.ctx.config;
        let route = ModelPolicy::new(&config.models).route(model);
        let thinking = thinking_mode(&route, has_tool_calls(turns), config.thinking_budget);

        tracing::debug!(
            "[OpenAI-Request] model='{}' upstream='{}' thinking={} signatures={}",
            model,
            route.upstream,
            thinking.enabled,
            route.signatures_allowed
        );

        let contents =
            MessageConverter::new(self.ctx.cache, route.signatures_allowed).convert(turns);
        let system_instruction = build_system_instruction(
            &config.system_instruction,
            &config.fallback_system_instruction,
            turns,
        );

        let request = BackendRequest {
            contents,
            system_instruction: Some(system_instruction),
            tools: build_tool_groups(tools),
            tool_config: ToolConfig::default(),
            generation_config: build_generation_config(params, &config.defaults, thinking),
            session_id: token.session_id.clone(),
        };

        RequestEnvelope {
            project: token.project_id.clone(),
            request_id: self.ctx.ids.next_id(),
            model: route.upstream,
            user_agent: USER_AGENT.to_string(),
            request,
        }
    }

    /// [`assemble`](Self::assemble) driven by a parsed chat request.
    pub fn assemble_chat(&self, request: &ChatRequest, token: &SessionToken) -> RequestEnvelope {
        self.assemble(
            &request.messages,
            &request.model,
            &request.sampling(),
            request.tool_definitions(),
            token,
        )
    }

    /// Wrap an already native Gemini body. See [`gemini::wrap_native`].
    pub fn wrap_native(
        &self,
        body: &Value,
        model: &str,
        token: &SessionToken,
    ) -> AppResult<RequestEnvelope<Value>> {
        gemini::wrap_native(body, model, token, &self.ctx)
    }
}

fn has_tool_calls(turns: &[ChatTurn]) -> bool {
    turns.iter().any(|turn| turn.role == ChatRole::Assistant && !turn.calls().is_empty())
}

/// Thinking for `route`. The signature-excluded vendor cannot combine thinking
/// with a history that already contains tool calls.
pub(crate) fn thinking_mode(
    route: &ModelRoute,
    history_has_calls: bool,
    budget: u32,
) -> ThinkingMode {
    let mut enabled = route.thinking;
    if enabled && !route.signatures_allowed && history_has_calls {
        tracing::debug!(
            "[OpenAI-Request] Disabling thinking for {}: history contains tool calls",
            route.upstream
        );
        enabled = false;
    }
    ThinkingMode { enabled, budget, omit_top_p: !route.signatures_allowed }
}
