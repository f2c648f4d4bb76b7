//! Document analysis subdomain.
//!
//! - [`classifier::classify`] — turn raw text into a [`profile::DocumentProfile`]
//! - [`profile`] — the profile types driving selection and prompt composition
//! - [`text`] — low-level word/sentence scanning helpers

pub mod classifier;
pub mod profile;
pub mod text;

pub use classifier::classify;
pub use profile::{
    Complexity, ComplexityBand, Concepts, DocumentProfile, DocumentType, DomainScore, KeyElements,
    Language, StructuralFlags, TechnicalDomain,
};
