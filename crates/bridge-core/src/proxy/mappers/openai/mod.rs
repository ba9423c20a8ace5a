//! OpenAI chat completions -> Antigravity v1internal request mapping.

pub mod request;

pub use request::*;
