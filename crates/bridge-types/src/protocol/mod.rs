//! Protocol definitions for both sides of the bridge.
//!
//! - OpenAI ChatCompletions request shapes (the inbound side)
//! - Gemini / v1internal content shapes and the Antigravity envelope (the
//!   outbound side)

pub mod gemini;
pub mod openai;

pub use gemini::{
    BackendPart, BackendRequest, BackendRole, BackendTurn, FunctionCall, FunctionDeclaration,
    FunctionResponse, GenerationConfig, InlineData, RequestEnvelope, SystemInstruction,
    ThinkingConfig, ToolConfig, ToolGroup, USER_AGENT,
};
pub use openai::{
    ChatContent, ChatRequest, ChatRole, ChatTurn, ContentPart, ImageUrl, ToolArguments, ToolCall,
    ToolFunction,
};
