//! Document profile types produced by the classifier

use serde::{Deserialize, Serialize};

/// Kind of document submitted for analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Whitepaper,
    TechnicalSpec,
    CodeDocumentation,
    ArchitectureDoc,
    /// Long-form input that matched no specific indicators
    General,
    /// Short free-form input, analyzed through the lightweight query path
    Query,
}

impl DocumentType {
    pub fn as_str(&self) -> &str {
        match self {
            DocumentType::Whitepaper => "whitepaper",
            DocumentType::TechnicalSpec => "technical_spec",
            DocumentType::CodeDocumentation => "code_documentation",
            DocumentType::ArchitectureDoc => "architecture_doc",
            DocumentType::General => "general",
            DocumentType::Query => "query",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Technical domain a document touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechnicalDomain {
    Blockchain,
    AiMl,
    DistributedSystems,
    Security,
}

impl TechnicalDomain {
    pub fn all() -> [TechnicalDomain; 4] {
        [
            TechnicalDomain::Blockchain,
            TechnicalDomain::AiMl,
            TechnicalDomain::DistributedSystems,
            TechnicalDomain::Security,
        ]
    }

    pub fn as_str(&self) -> &str {
        match self {
            TechnicalDomain::Blockchain => "blockchain",
            TechnicalDomain::AiMl => "ai_ml",
            TechnicalDomain::DistributedSystems => "distributed_systems",
            TechnicalDomain::Security => "security",
        }
    }
}

impl std::fmt::Display for TechnicalDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A detected domain with its evidence score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomainScore {
    pub domain: TechnicalDomain,
    pub score: u32,
}

/// Complexity band of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityBand {
    Low,
    Medium,
    High,
}

impl ComplexityBand {
    pub fn as_str(&self) -> &str {
        match self {
            ComplexityBand::Low => "low",
            ComplexityBand::Medium => "medium",
            ComplexityBand::High => "high",
        }
    }
}

impl std::fmt::Display for ComplexityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Complexity metrics of a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complexity {
    pub band: ComplexityBand,
    pub word_count: usize,
    pub avg_word_length: f64,
    /// Share of words longer than eight characters
    pub technical_density: f64,
    /// Flesch reading ease approximation
    pub reading_ease: f64,
}

impl Complexity {
    /// A minimal low-complexity marker used for the query path
    pub fn low() -> Self {
        Self {
            band: ComplexityBand::Low,
            word_count: 0,
            avg_word_length: 0.0,
            technical_density: 0.0,
            reading_ease: 0.0,
        }
    }
}

/// Structural signals found in the document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralFlags {
    pub total_sections: usize,
    pub has_toc: bool,
    pub has_math: bool,
    pub has_code_blocks: bool,
    pub has_diagrams: bool,
}

/// Key elements extracted from the document text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyElements {
    pub definitions: Vec<String>,
    pub examples: Vec<String>,
    pub formulas: Vec<String>,
    pub code_snippets: Vec<String>,
    pub urls: Vec<String>,
}

/// Concepts extracted from the document, grouped by kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concepts {
    pub technical: Vec<String>,
    pub architectural: Vec<String>,
    pub mathematical: Vec<String>,
    pub business: Vec<String>,
}

/// Detected document language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Pt,
}

impl Language {
    pub fn as_str(&self) -> &str {
        match self {
            Language::En => "en",
            Language::Pt => "pt",
        }
    }
}

/// Full analysis profile of a submitted document or query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentProfile {
    pub doc_type: DocumentType,
    pub title: String,
    /// Detected domains, strongest first, at most three
    pub domains: Vec<DomainScore>,
    pub complexity: Complexity,
    pub structure: StructuralFlags,
    pub key_elements: KeyElements,
    pub concepts: Concepts,
    pub language: Language,
    /// The analyzed text, kept for prompt extraction
    pub content: String,
}

impl DocumentProfile {
    /// Whether this profile came from the lightweight query path
    pub fn is_query(&self) -> bool {
        self.doc_type == DocumentType::Query
    }

    /// Whether the given domain was detected
    pub fn has_domain(&self, domain: TechnicalDomain) -> bool {
        self.domains.iter().any(|d| d.domain == domain)
    }

    /// Domain names joined for display, strongest first
    pub fn domain_names(&self) -> String {
        self.domains
            .iter()
            .map(|d| d.domain.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
