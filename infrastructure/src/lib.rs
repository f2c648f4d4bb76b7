//! Infrastructure layer for roundtable
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: provider adapters and the routing gateway,
//! configuration file loading, and the JSONL session transcript.

pub mod config;
pub mod providers;
pub mod transcript;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileProvidersConfig, ReportFormat,
};
pub use providers::{
    build_providers,
    routing::{GatewayStats, ProviderHealth, ProviderStatus, RoutingGateway},
    ProviderAdapter, ProviderKind,
};
pub use transcript::JsonlTranscriptLogger;
