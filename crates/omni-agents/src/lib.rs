//! Default-agent service port for Omni, plus an HTTP client for the Omni admin API.

pub mod client;
pub mod error;
pub mod service;
pub mod types;

pub use client::HttpAgentService;
pub use error::{AgentError, Result};
pub use service::DefaultAgentService;
pub use types::{
    AgentId, AgentRecord, AgentStats, DefaultConfig, InstallSummary, SyncSummary, UpdateSummary,
};
