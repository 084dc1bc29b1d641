//! Suna compatibility layer for the Omni default-agent service.
//!
//! Legacy tooling still speaks in terms of "Suna" agents. This crate keeps
//! that surface alive while all real work happens in the Omni service:
//! - a facade mapping legacy method names onto [`omni_agents::DefaultAgentService`]
//! - a CLI for legacy scripts
//! - an HTTP API for legacy remote tools
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐        ┌─────────────┐
//! │     CLI     │        │   HTTP API  │
//! └──────┬──────┘        └──────┬──────┘
//!        └───────────┬──────────┘
//!             ┌──────┴──────┐
//!             │   Facade    │
//!             └──────┬──────┘
//!             ┌──────┴──────┐
//!             │ Omni agents │
//!             └─────────────┘
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod core;

pub use config::Config;
pub use crate::core::{Diagnostics, SunaDefaultAgentService};
