//! Core compatibility layer shared by the CLI and the HTTP API.

pub mod diagnostics;
pub mod facade;

pub use diagnostics::{Diagnostics, NoopDiagnostics, RecordingDiagnostics, TracingDiagnostics};
pub use facade::SunaDefaultAgentService;
