//! Application layer for roundtable
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    progress::{NoProgress, ProgressNotifier},
    provider_gateway::{GatewayError, ProviderGateway, QueryRequest, QueryResponse},
    transcript::{NoTranscript, TranscriptEvent, TranscriptLogger},
};
pub use use_cases::run_workflow::{RunWorkflowError, RunWorkflowInput, RunWorkflowUseCase};
