//! Session identifiers supplied by the token provider.

use serde::{Deserialize, Serialize};

/// Project and session identifiers attached to every upstream envelope.
///
/// Both values are opaque: they come from the token provider and are copied
/// into the envelope verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SessionToken {
    /// Cloud project the request is billed to.
    pub project_id: String,
    /// Upstream session identifier.
    pub session_id: String,
}

impl SessionToken {
    pub fn new(project_id: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self { project_id: project_id.into(), session_id: session_id.into() }
    }
}
