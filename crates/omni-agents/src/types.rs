//! Payload types exchanged with a default-agent service.
//!
//! Payloads are owned by the service and treated as opaque JSON objects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default agent configuration.
pub type DefaultConfig = Map<String, Value>;

/// Outcome of syncing every agent.
pub type SyncSummary = Map<String, Value>;

/// Outcome of updating every agent.
pub type UpdateSummary = Map<String, Value>;

/// Outcome of installing the default agent for every user.
pub type InstallSummary = Map<String, Value>;

/// Description of one account's default agent.
pub type AgentRecord = Map<String, Value>;

/// Named statistics about installed default agents.
pub type AgentStats = Map<String, Value>;

/// Identifier of an installed agent.
pub type AgentId = String;

/// Body of an update-all request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRequest {
    /// Version to update to (service default when absent).
    #[serde(default)]
    pub target_version: Option<String>,
}

/// Body of a single-account install request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallRequest {
    /// Account to install the default agent for.
    pub account_id: String,

    /// Replace an agent that is already installed.
    #[serde(default)]
    pub replace_existing: bool,
}

/// Response to a single-account install request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallResponse {
    /// Installed agent, if one was installed.
    #[serde(default)]
    pub agent_id: Option<AgentId>,
}
