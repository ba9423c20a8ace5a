//! # Antigravity Bridge Core
//!
//! Request translation from OpenAI chat completions (and native Gemini bodies)
//! into the Antigravity v1internal envelope.
//!
//! ## Architecture
//!
//! ```text
//! antigravity-bridge-core/src/
//! ├── modules/
//! │   ├── config.rs          # BridgeConfig file loading + validation
//! │   └── logger.rs          # tracing-subscriber initialisation
//! └── proxy/
//!     ├── signature_cache/   # bounded id/text -> thought signature cache
//!     ├── common/
//!     │   ├── json_schema/   # schema sanitizer (arena + cycle detection)
//!     │   ├── media          # data URLs, image MIME sniffing
//!     │   ├── model_policy   # model-name feature gates
//!     │   └── request_id     # request id sources
//!     └── mappers/
//!         ├── openai/        # chat turns -> backend turns, envelope assembly
//!         └── gemini/        # native pass-through, response signature harvesting
//! ```
//!
//! Everything under `proxy/` is synchronous and performs no I/O. The signature
//! cache is the only shared mutable state and is internally synchronized.

#![allow(
    clippy::redundant_else,
    reason = "Explicit else blocks improve readability in complex control flow"
)]
#![allow(clippy::needless_continue, reason = "Explicit continue improves loop readability")]
#![allow(
    clippy::derive_partial_eq_without_eq,
    reason = "Some types intentionally don't implement Eq"
)]
// Test-only lints: allow panic!, println!, etc. in test code
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::print_stdout,
        clippy::float_cmp,
        clippy::unwrap_used,
        clippy::assertions_on_result_states
    )
)]

pub mod error;
pub mod modules;
pub mod proxy;

// Re-export commonly used types
pub use error::{AppError, AppResult};
pub use proxy::common::json_schema::{sanitize_schema, sanitize_schema_node, SchemaGraph};
pub use proxy::common::{RequestIdSource, SequentialRequestIds, UuidRequestIds};
pub use proxy::mappers::gemini::{harvest_signatures, unwrap_response, wrap_native, HarvestStats};
pub use proxy::mappers::openai::{MessageConverter, RequestAssembler};
pub use proxy::mappers::MapperContext;
pub use proxy::signature_cache::{SignatureCache, SignatureEntry};
