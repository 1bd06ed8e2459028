//! The actor context attached to mutating calls.

use serde::Deserialize;

/// Who performed a mutation, through what client, and why.
///
/// Supplied by the caller as the payload `meta` object. The pair
/// `{userId, clientId}` arrives already authenticated by the upstream
/// authorization layer; this core only records it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MutationMeta {
    /// Identifier of the acting user, if any.
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    /// Identifier of the calling client system, if any.
    #[serde(rename = "clientId")]
    pub client_id: Option<String>,
    /// Free-text classification key for the mutation
    /// (e.g. `"user_update_existing_record"`).
    #[serde(rename = "updateReason")]
    pub update_reason: Option<String>,
}

impl MutationMeta {
    /// An empty actor context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the acting user.
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Set the calling client.
    pub fn with_client(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set the update reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.update_reason = Some(reason.into());
        self
    }

    /// The supplied update reason, or the given per-operation default.
    pub fn reason_or(&self, default: &str) -> String {
        self.update_reason
            .clone()
            .unwrap_or_else(|| default.to_string())
    }
}
