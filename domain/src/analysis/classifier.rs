//! Document classifier
//!
//! Pure keyword and structure heuristics: no I/O, no allocation beyond the
//! returned profile, and idempotent on identical input. All scoring tables
//! live in this file so the weights can be read in one place.

use super::profile::{
    Complexity, ComplexityBand, Concepts, DocumentProfile, DocumentType, DomainScore, KeyElements,
    Language, StructuralFlags, TechnicalDomain,
};
use super::text;

/// Inputs shorter than this with no paragraph break take the query path
const QUERY_LENGTH_LIMIT: usize = 500;

/// Domain evidence below or at this score is discarded
const DOMAIN_SCORE_FLOOR: u32 = 5;

/// At most this many domains are kept, strongest first
const MAX_DOMAINS: usize = 3;

/// Classify raw text into a document profile.
///
/// Empty input yields a general/low profile. Short inputs without a
/// paragraph break are treated as free-form queries and skip the full
/// structural analysis.
pub fn classify(content: &str) -> DocumentProfile {
    if content.trim().is_empty() {
        return empty_profile();
    }

    if content.len() < QUERY_LENGTH_LIMIT && !content.contains("\n\n") {
        return classify_query(content);
    }

    let complexity = assess_complexity(content);
    DocumentProfile {
        doc_type: detect_type(content),
        title: text::extract_title(content),
        domains: detect_domains(content),
        complexity,
        structure: detect_structure(content),
        key_elements: extract_key_elements(content),
        concepts: extract_concepts(content),
        language: detect_language(content),
        content: content.to_string(),
    }
}

fn empty_profile() -> DocumentProfile {
    DocumentProfile {
        doc_type: DocumentType::General,
        title: "Technical Document".to_string(),
        domains: Vec::new(),
        complexity: Complexity::low(),
        structure: StructuralFlags::default(),
        key_elements: KeyElements::default(),
        concepts: Concepts::default(),
        language: Language::En,
        content: String::new(),
    }
}

/// Lightweight path for short free-form questions
fn classify_query(content: &str) -> DocumentProfile {
    let word_count = text::whitespace_word_count(content);
    let band = if word_count > 50 {
        ComplexityBand::Medium
    } else {
        ComplexityBand::Low
    };

    let domains = query_domain(content)
        .map(|domain| vec![DomainScore { domain, score: DOMAIN_SCORE_FLOOR + 1 }])
        .unwrap_or_default();

    DocumentProfile {
        doc_type: DocumentType::Query,
        title: text::extract_title(content),
        domains,
        complexity: Complexity {
            band,
            word_count,
            ..Complexity::low()
        },
        structure: StructuralFlags::default(),
        key_elements: KeyElements::default(),
        concepts: Concepts::default(),
        language: detect_language(content),
        content: content.to_string(),
    }
}

/// Small keyword table for inferring a query's domain
fn query_domain(content: &str) -> Option<TechnicalDomain> {
    const QUERY_HINTS: [(TechnicalDomain, &[&str]); 4] = [
        (TechnicalDomain::Blockchain, &["blockchain", "smart contract", "token", "crypto", "defi"]),
        (TechnicalDomain::AiMl, &["ai", "machine learning", "model", "neural", "llm"]),
        (TechnicalDomain::Security, &["security", "vulnerability", "encryption", "attack", "auth"]),
        (TechnicalDomain::DistributedSystems, &["distributed", "microservice", "scalability", "cluster", "kafka"]),
    ];

    QUERY_HINTS
        .iter()
        .find(|(_, hints)| hints.iter().any(|hint| text::has_word(content, hint)))
        .map(|(domain, _)| *domain)
}

// -- Type detection ----------------------------------------------------------

/// Indicator keywords score 2, matched section names score 1
struct TypeSignature {
    doc_type: DocumentType,
    indicators: &'static [&'static str],
    sections: &'static [&'static str],
}

const TYPE_SIGNATURES: [TypeSignature; 4] = [
    TypeSignature {
        doc_type: DocumentType::Whitepaper,
        indicators: &[
            "whitepaper",
            "white paper",
            "tokenomics",
            "consensus mechanism",
            "decentralized",
            "protocol design",
            "litepaper",
        ],
        sections: &["abstract", "introduction", "methodology", "conclusion", "references"],
    },
    TypeSignature {
        doc_type: DocumentType::TechnicalSpec,
        indicators: &[
            "specification",
            "shall",
            "must support",
            "conformance",
            "normative",
            "rfc",
            "acceptance criteria",
        ],
        sections: &[
            "requirements",
            "functional requirements",
            "non-functional requirements",
            "interface definition",
            "constraints",
        ],
    },
    TypeSignature {
        doc_type: DocumentType::CodeDocumentation,
        indicators: &[
            "function",
            "class",
            "method",
            "parameter",
            "returns",
            "import",
            "install",
        ],
        sections: &["installation", "usage", "api reference", "examples", "getting started"],
    },
    TypeSignature {
        doc_type: DocumentType::ArchitectureDoc,
        indicators: &[
            "architecture",
            "component",
            "microservices",
            "deployment",
            "infrastructure",
            "system design",
            "data flow",
        ],
        sections: &["overview", "components", "data flow", "deployment", "integration"],
    },
];

/// Highest score wins; ties favor declaration order; no evidence means general
fn detect_type(content: &str) -> DocumentType {
    let mut best = DocumentType::General;
    let mut best_score = 0u32;

    for signature in &TYPE_SIGNATURES {
        let mut score = 0u32;
        for indicator in signature.indicators {
            if text::has_word(content, indicator) {
                score += 2;
            }
        }
        for section in signature.sections {
            if has_section(content, section) {
                score += 1;
            }
        }
        if score > best_score {
            best_score = score;
            best = signature.doc_type;
        }
    }

    best
}

/// A section matches when a line is a markdown header or numbered heading
/// containing the section name
fn has_section(content: &str, section: &str) -> bool {
    content.lines().any(|line| {
        let trimmed = line.trim();
        let is_heading = trimmed.starts_with('#')
            || trimmed.chars().next().is_some_and(|c| c.is_ascii_digit());
        is_heading && trimmed.to_lowercase().contains(section)
    })
}

// -- Domain detection --------------------------------------------------------

/// Keywords weigh 2 per occurrence, supporting concepts weigh 1
struct DomainSignature {
    domain: TechnicalDomain,
    keywords: &'static [&'static str],
    concepts: &'static [&'static str],
}

const DOMAIN_SIGNATURES: [DomainSignature; 4] = [
    DomainSignature {
        domain: TechnicalDomain::Blockchain,
        keywords: &[
            "blockchain",
            "smart contract",
            "token",
            "defi",
            "ledger",
            "consensus",
            "wallet",
            "ethereum",
        ],
        concepts: &["staking", "mining", "gas", "validator", "dapp", "web3"],
    },
    DomainSignature {
        domain: TechnicalDomain::AiMl,
        keywords: &[
            "machine learning",
            "neural network",
            "training",
            "inference",
            "deep learning",
            "dataset",
            "model",
        ],
        concepts: &["embedding", "transformer", "classifier", "regression", "llm", "fine-tuning"],
    },
    DomainSignature {
        domain: TechnicalDomain::DistributedSystems,
        keywords: &[
            "distributed",
            "microservices",
            "scalability",
            "cluster",
            "replication",
            "partition",
            "throughput",
        ],
        concepts: &[
            "sharding",
            "load balancing",
            "message queue",
            "eventual consistency",
            "raft",
            "latency",
        ],
    },
    DomainSignature {
        domain: TechnicalDomain::Security,
        keywords: &[
            "security",
            "encryption",
            "authentication",
            "vulnerability",
            "attack",
            "audit",
            "threat",
        ],
        concepts: &["tls", "oauth", "zero trust", "penetration", "firewall", "cryptography"],
    },
];

/// Domains with evidence above the floor, strongest first, capped
fn detect_domains(content: &str) -> Vec<DomainScore> {
    let mut scored: Vec<DomainScore> = DOMAIN_SIGNATURES
        .iter()
        .map(|signature| {
            let keyword_hits: usize = signature
                .keywords
                .iter()
                .map(|keyword| text::count_word_matches(content, keyword))
                .sum();
            let concept_hits: usize = signature
                .concepts
                .iter()
                .map(|concept| text::count_word_matches(content, concept))
                .sum();
            DomainScore {
                domain: signature.domain,
                score: (keyword_hits * 2 + concept_hits) as u32,
            }
        })
        .filter(|entry| entry.score > DOMAIN_SCORE_FLOOR)
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(MAX_DOMAINS);
    scored
}

// -- Complexity --------------------------------------------------------------

fn assess_complexity(content: &str) -> Complexity {
    let words: Vec<&str> = content.split_whitespace().collect();
    let word_count = words.len();
    if word_count == 0 {
        return Complexity::low();
    }

    let total_length: usize = words.iter().map(|w| w.chars().count()).sum();
    let long_words = words.iter().filter(|w| w.chars().count() > 8).count();
    let technical_density = long_words as f64 / word_count as f64;

    let band = if word_count > 5000 && technical_density > 0.15 {
        ComplexityBand::High
    } else if word_count < 1000 && technical_density < 0.05 {
        ComplexityBand::Low
    } else {
        ComplexityBand::Medium
    };

    Complexity {
        band,
        word_count,
        avg_word_length: total_length as f64 / word_count as f64,
        technical_density,
        reading_ease: text::reading_ease(content),
    }
}

// -- Structure ---------------------------------------------------------------

fn detect_structure(content: &str) -> StructuralFlags {
    let lower = content.to_lowercase();

    let total_sections = content
        .lines()
        .filter(|line| {
            let trimmed = line.trim_start();
            trimmed.starts_with('#') && trimmed.trim_start_matches('#').starts_with(' ')
        })
        .count();

    StructuralFlags {
        total_sections,
        has_toc: lower.contains("table of contents")
            || content.lines().any(|line| line.trim().eq_ignore_ascii_case("contents")),
        has_math: has_math_notation(content),
        has_code_blocks: content.contains("```") || content.contains("~~~"),
        has_diagrams: text::has_word(&lower, "diagram")
            || text::has_word(&lower, "figure")
            || text::has_word(&lower, "flowchart"),
    }
}

fn has_math_notation(content: &str) -> bool {
    if content.contains("\\begin{equation}") || content.contains("\\[") {
        return true;
    }
    // Inline $...$ needs a closing dollar after the opener
    content
        .find('$')
        .is_some_and(|open| content[open + 1..].contains('$'))
}

// -- Key elements ------------------------------------------------------------

/// Per-list cap for extracted key elements
const MAX_ELEMENTS: usize = 10;

fn extract_key_elements(content: &str) -> KeyElements {
    let mut elements = KeyElements::default();

    for sentence in text::sentences(content) {
        if elements.definitions.len() < MAX_ELEMENTS
            && (sentence.contains(" is defined as ") || sentence.contains(" refers to "))
        {
            elements.definitions.push(sentence.to_string());
        }
        if elements.examples.len() < MAX_ELEMENTS
            && (sentence.to_lowercase().contains("for example") || sentence.contains("e.g"))
        {
            elements.examples.push(sentence.to_string());
        }
    }

    elements.code_snippets = fenced_blocks(content);

    if has_math_notation(content) {
        for line in content.lines() {
            if elements.formulas.len() >= MAX_ELEMENTS {
                break;
            }
            let trimmed = line.trim();
            if trimmed.starts_with('$') || trimmed.starts_with("\\begin{equation}") {
                elements.formulas.push(trimmed.to_string());
            }
        }
    }

    for word in content.split_whitespace() {
        if elements.urls.len() >= MAX_ELEMENTS {
            break;
        }
        if word.starts_with("http://") || word.starts_with("https://") {
            elements.urls.push(word.trim_end_matches([',', '.', ')', ';']).to_string());
        }
    }

    elements
}

/// Bodies of ``` fenced blocks, capped
fn fenced_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Option<Vec<&str>> = None;

    for line in content.lines() {
        if line.trim_start().starts_with("```") {
            match current.take() {
                Some(body) => {
                    if blocks.len() < MAX_ELEMENTS {
                        blocks.push(body.join("\n"));
                    }
                }
                None => current = Some(Vec::new()),
            }
        } else if let Some(body) = current.as_mut() {
            body.push(line);
        }
    }

    blocks
}

// -- Concepts ----------------------------------------------------------------

const ARCHITECTURAL_TERMS: [&str; 10] = [
    "microservices",
    "api gateway",
    "event-driven",
    "serverless",
    "container",
    "kubernetes",
    "rest",
    "graphql",
    "message broker",
    "service mesh",
];

const MATHEMATICAL_TERMS: [&str; 8] = [
    "theorem",
    "equation",
    "formula",
    "probability",
    "matrix",
    "vector",
    "ratio",
    "coefficient",
];

const BUSINESS_TERMS: [&str; 8] = [
    "revenue",
    "market",
    "customer",
    "roi",
    "strategy",
    "stakeholder",
    "monetization",
    "adoption",
];

fn extract_concepts(content: &str) -> Concepts {
    let mut concepts = Concepts {
        technical: camel_case_terms(content),
        architectural: matched_terms(content, &ARCHITECTURAL_TERMS),
        mathematical: matched_terms(content, &MATHEMATICAL_TERMS),
        business: matched_terms(content, &BUSINESS_TERMS),
    };
    concepts.technical.truncate(MAX_ELEMENTS);
    concepts
}

fn matched_terms(content: &str, terms: &[&str]) -> Vec<String> {
    terms
        .iter()
        .filter(|term| text::has_word(content, term))
        .map(|term| term.to_string())
        .collect()
}

/// CamelCase identifiers, unique in first-seen order
fn camel_case_terms(content: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for word in text::words(content) {
        let mut chars = word.chars();
        let leading_upper = chars.next().is_some_and(|c| c.is_uppercase());
        let interior_upper = chars.clone().any(|c| c.is_uppercase());
        let has_lower = word.chars().any(|c| c.is_lowercase());
        if leading_upper && interior_upper && has_lower && !seen.iter().any(|s| s == word) {
            seen.push(word.to_string());
        }
    }
    seen
}

// -- Language ----------------------------------------------------------------

const ENGLISH_STOPWORDS: [&str; 8] = ["the", "and", "of", "to", "is", "in", "that", "for"];
const PORTUGUESE_STOPWORDS: [&str; 8] = ["de", "que", "para", "com", "uma", "os", "das", "dos"];

fn detect_language(content: &str) -> Language {
    let en: usize = ENGLISH_STOPWORDS
        .iter()
        .map(|word| text::count_word_matches(content, word))
        .sum();
    let pt: usize = PORTUGUESE_STOPWORDS
        .iter()
        .map(|word| text::count_word_matches(content, word))
        .sum();

    if pt > en { Language::Pt } else { Language::En }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITEPAPER: &str = "\
# Consensus Protocol Whitepaper

## Abstract

This whitepaper presents a decentralized consensus mechanism built on a
blockchain ledger. Token holders participate in staking and validator
selection through smart contract governance.

## Introduction

The protocol uses a novel consensus mechanism where each validator stakes
tokens on the blockchain. Smart contract execution consumes gas.

## Conclusion

Decentralized staking aligns validator incentives with token economics.
";

    #[test]
    fn test_whitepaper_detection() {
        let profile = classify(WHITEPAPER);
        assert_eq!(profile.doc_type, DocumentType::Whitepaper);
        assert_eq!(profile.title, "Consensus Protocol Whitepaper");
    }

    #[test]
    fn test_blockchain_domain_detected() {
        let profile = classify(WHITEPAPER);
        assert!(profile.has_domain(TechnicalDomain::Blockchain));
        assert_eq!(profile.domains.first().map(|d| d.domain), Some(TechnicalDomain::Blockchain));
    }

    #[test]
    fn test_empty_input_is_general_low() {
        let profile = classify("");
        assert_eq!(profile.doc_type, DocumentType::General);
        assert_eq!(profile.complexity.band, ComplexityBand::Low);
        assert!(profile.domains.is_empty());
    }

    #[test]
    fn test_short_input_takes_query_path() {
        let profile = classify("How should we handle authentication vulnerability reports?");
        assert_eq!(profile.doc_type, DocumentType::Query);
        assert_eq!(profile.complexity.band, ComplexityBand::Low);
        assert!(profile.has_domain(TechnicalDomain::Security));
    }

    #[test]
    fn test_short_input_with_paragraph_break_is_not_query() {
        let text = "First paragraph about architecture components.\n\nSecond paragraph.";
        let profile = classify(text);
        assert_ne!(profile.doc_type, DocumentType::Query);
    }

    #[test]
    fn test_classify_is_idempotent() {
        let first = classify(WHITEPAPER);
        let second = classify(WHITEPAPER);
        assert_eq!(first.doc_type, second.doc_type);
        assert_eq!(first.domains, second.domains);
        assert_eq!(first.complexity, second.complexity);
        assert_eq!(first.structure, second.structure);
    }

    #[test]
    fn test_domain_floor_filters_weak_evidence() {
        // Two mentions of "security" score 4, below the floor of 5
        let profile = classify(&format!(
            "{}\n\nSecurity matters. Security is reviewed yearly.",
            "Filler text about gardening and cooking. ".repeat(20)
        ));
        assert!(!profile.has_domain(TechnicalDomain::Security));
    }

    #[test]
    fn test_structure_flags() {
        let text = "\
# Title

Table of Contents

```rust
fn main() {}
```

See the architecture diagram in figure 2. The bound is $O(n)$.
";
        let profile = classify(text);
        assert!(profile.structure.has_toc);
        assert!(profile.structure.has_code_blocks);
        assert!(profile.structure.has_diagrams);
        assert!(profile.structure.has_math);
        assert_eq!(profile.key_elements.code_snippets.len(), 1);
        assert_eq!(profile.key_elements.code_snippets[0], "fn main() {}");
    }

    #[test]
    fn test_key_element_extraction() {
        let text = format!(
            "{}\n\nA validator is defined as a staked node. For example, nodes rotate \
             daily. See https://example.org/spec for details.",
            "Padding sentence to push past the query threshold. ".repeat(12)
        );
        let elements = classify(&text).key_elements;
        assert_eq!(elements.definitions.len(), 1);
        assert_eq!(elements.examples.len(), 1);
        assert_eq!(elements.urls, vec!["https://example.org/spec"]);
    }

    #[test]
    fn test_camel_case_concepts() {
        let text = format!(
            "{}\n\nThe OrderService talks to PaymentGateway over rest.",
            "Padding sentence for document length and more length. ".repeat(12)
        );
        let concepts = classify(&text).concepts;
        assert!(concepts.technical.contains(&"OrderService".to_string()));
        assert!(concepts.technical.contains(&"PaymentGateway".to_string()));
        assert!(concepts.architectural.contains(&"rest".to_string()));
    }

    #[test]
    fn test_portuguese_detection() {
        let text = "Uma plataforma de pagamentos para os clientes, com suporte \
                    para contratos que definem regras de liquidação das contas dos \
                    participantes, construída para escalar com os volumes de uma rede.";
        assert_eq!(classify(text).language, Language::Pt);
    }

    #[test]
    fn test_high_complexity_band() {
        let long_technical = "microservices infrastructure orchestration deployment \
                              scalability replication partitioning observability "
            .repeat(700);
        let profile = classify(&long_technical);
        assert_eq!(profile.complexity.band, ComplexityBand::High);
        assert!(profile.complexity.technical_density > 0.15);
    }
}
