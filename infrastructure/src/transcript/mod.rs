//! Session transcript adapters.

mod jsonl;

pub use jsonl::JsonlTranscriptLogger;
