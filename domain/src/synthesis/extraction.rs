//! Per-response extraction
//!
//! A rule-based classifier over one response's text. It sits behind the
//! [`ResponseExtractor`] trait so the coordinator and synthesizer never
//! depend on the keyword tables; a model-backed extractor can replace
//! [`KeywordExtractor`] without touching either.

use crate::analysis::text;
use serde::{Deserialize, Serialize};

/// Theme a response touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeCategory {
    Architecture,
    Security,
    Performance,
    Scalability,
    Innovation,
    BusinessImpact,
}

impl ThemeCategory {
    pub fn all() -> [ThemeCategory; 6] {
        [
            ThemeCategory::Architecture,
            ThemeCategory::Security,
            ThemeCategory::Performance,
            ThemeCategory::Scalability,
            ThemeCategory::Innovation,
            ThemeCategory::BusinessImpact,
        ]
    }

    pub fn as_str(&self) -> &str {
        match self {
            ThemeCategory::Architecture => "architecture",
            ThemeCategory::Security => "security",
            ThemeCategory::Performance => "performance",
            ThemeCategory::Scalability => "scalability",
            ThemeCategory::Innovation => "innovation",
            ThemeCategory::BusinessImpact => "business_impact",
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            ThemeCategory::Architecture => {
                &["architecture", "design", "component", "structure", "modular", "coupling"]
            }
            ThemeCategory::Security => {
                &["security", "vulnerability", "encryption", "authentication", "attack"]
            }
            ThemeCategory::Performance => {
                &["performance", "latency", "throughput", "benchmark", "slow"]
            }
            ThemeCategory::Scalability => {
                &["scalability", "scale", "scaling", "capacity", "load", "growth"]
            }
            ThemeCategory::Innovation => {
                &["innovative", "novel", "innovation", "breakthrough", "differentiator"]
            }
            ThemeCategory::BusinessImpact => {
                &["business", "cost", "revenue", "market", "roi", "adoption"]
            }
        }
    }
}

impl std::fmt::Display for ThemeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Priority of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

/// Category of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationCategory {
    Implementation,
    Testing,
    Security,
    Optimization,
    Documentation,
    General,
}

impl RecommendationCategory {
    pub fn as_str(&self) -> &str {
        match self {
            RecommendationCategory::Implementation => "implementation",
            RecommendationCategory::Testing => "testing",
            RecommendationCategory::Security => "security",
            RecommendationCategory::Optimization => "optimization",
            RecommendationCategory::Documentation => "documentation",
            RecommendationCategory::General => "general",
        }
    }
}

/// A single extracted recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub text: String,
    pub priority: Priority,
    pub category: RecommendationCategory,
}

/// Category of a concern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConcernCategory {
    Security,
    Performance,
    Scalability,
    Cost,
    General,
}

impl ConcernCategory {
    pub fn all() -> [ConcernCategory; 5] {
        [
            ConcernCategory::Security,
            ConcernCategory::Performance,
            ConcernCategory::Scalability,
            ConcernCategory::Cost,
            ConcernCategory::General,
        ]
    }

    pub fn as_str(&self) -> &str {
        match self {
            ConcernCategory::Security => "security",
            ConcernCategory::Performance => "performance",
            ConcernCategory::Scalability => "scalability",
            ConcernCategory::Cost => "cost",
            ConcernCategory::General => "general",
        }
    }
}

/// A single extracted concern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concern {
    pub text: String,
    pub category: ConcernCategory,
}

/// Overall tone of a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// Everything extracted from one response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Extraction {
    pub themes: Vec<ThemeCategory>,
    pub recommendations: Vec<Recommendation>,
    pub concerns: Vec<Concern>,
    pub technical_points: Vec<String>,
    /// In [0,1]
    pub confidence: f64,
    pub sentiment: Sentiment,
}

impl Extraction {
    /// Neutral extraction for empty or unusable text
    pub fn empty() -> Self {
        Self {
            themes: Vec::new(),
            recommendations: Vec::new(),
            concerns: Vec::new(),
            technical_points: Vec::new(),
            confidence: 0.0,
            sentiment: Sentiment::Neutral,
        }
    }
}

/// Extraction seam: the synthesizer only sees this trait
pub trait ResponseExtractor: Send + Sync {
    fn extract(&self, content: &str) -> Extraction;
}

/// Keyword-rule extractor, the default implementation
#[derive(Debug, Default)]
pub struct KeywordExtractor;

const RECOMMENDATION_MARKERS: [&str; 7] =
    ["recommend", "suggest", "should", "must", "consider", "propose", "advise"];

const CONCERN_MARKERS: [&str; 8] =
    ["concern", "risk", "issue", "problem", "worry", "limitation", "weakness", "vulnerable"];

const TECHNICAL_MARKERS: [&str; 8] =
    ["algorithm", "api", "database", "storage", "protocol", "framework", "cache", "encryption"];

const CERTAINTY_WORDS: [&str; 5] = ["clearly", "definitely", "certainly", "confident", "undoubtedly"];
const EVIDENCE_WORDS: [&str; 5] = ["because", "evidence", "measured", "research", "benchmarks"];
const EXAMPLE_WORDS: [&str; 4] = ["for example", "e.g", "such as", "for instance"];
const HEDGING_WORDS: [&str; 5] = ["might", "perhaps", "possibly", "unclear", "uncertain"];
const SPECULATIVE_WORDS: [&str; 4] = ["speculative", "hypothetical", "assuming", "guess"];

const POSITIVE_WORDS: [&str; 8] =
    ["good", "strong", "solid", "excellent", "sound", "robust", "impressive", "well"];
const NEGATIVE_WORDS: [&str; 8] =
    ["bad", "weak", "poor", "flawed", "broken", "missing", "inadequate", "fragile"];

impl ResponseExtractor for KeywordExtractor {
    fn extract(&self, content: &str) -> Extraction {
        if content.trim().is_empty() {
            return Extraction::empty();
        }

        Extraction {
            themes: extract_themes(content),
            recommendations: extract_recommendations(content),
            concerns: extract_concerns(content),
            technical_points: extract_technical_points(content),
            confidence: assess_confidence(content),
            sentiment: assess_sentiment(content),
        }
    }
}

fn extract_themes(content: &str) -> Vec<ThemeCategory> {
    ThemeCategory::all()
        .into_iter()
        .filter(|theme| theme.keywords().iter().any(|k| text::has_word(content, k)))
        .collect()
}

fn extract_recommendations(content: &str) -> Vec<Recommendation> {
    text::sentences(content)
        .filter(|sentence| {
            let lower = sentence.to_lowercase();
            RECOMMENDATION_MARKERS.iter().any(|m| lower.contains(m))
        })
        .map(|sentence| Recommendation {
            text: sentence.to_string(),
            priority: recommendation_priority(sentence),
            category: recommendation_category(sentence),
        })
        .collect()
}

fn recommendation_priority(sentence: &str) -> Priority {
    let lower = sentence.to_lowercase();
    if ["critical", "must", "essential"].iter().any(|w| lower.contains(w)) {
        Priority::High
    } else if ["should", "important"].iter().any(|w| lower.contains(w)) {
        Priority::Medium
    } else {
        Priority::Low
    }
}

fn recommendation_category(sentence: &str) -> RecommendationCategory {
    let lower = sentence.to_lowercase();
    if ["implement", "build", "develop", "integrate"].iter().any(|w| lower.contains(w)) {
        RecommendationCategory::Implementation
    } else if ["test", "verify", "validate", "qa"].iter().any(|w| lower.contains(w)) {
        RecommendationCategory::Testing
    } else if ["security", "encrypt", "audit", "harden"].iter().any(|w| lower.contains(w)) {
        RecommendationCategory::Security
    } else if ["optimi", "performance", "cach", "tune"].iter().any(|w| lower.contains(w)) {
        RecommendationCategory::Optimization
    } else if ["document", "write up", "describe"].iter().any(|w| lower.contains(w)) {
        RecommendationCategory::Documentation
    } else {
        RecommendationCategory::General
    }
}

fn extract_concerns(content: &str) -> Vec<Concern> {
    text::sentences(content)
        .filter(|sentence| {
            let lower = sentence.to_lowercase();
            CONCERN_MARKERS.iter().any(|m| lower.contains(m))
        })
        .map(|sentence| Concern {
            text: sentence.to_string(),
            category: concern_category(sentence),
        })
        .collect()
}

/// Categorize a concern by its strongest keyword family
pub fn concern_category(sentence: &str) -> ConcernCategory {
    let lower = sentence.to_lowercase();
    if ["security", "vulnerab", "attack", "exploit", "breach"].iter().any(|w| lower.contains(w)) {
        ConcernCategory::Security
    } else if ["performance", "latency", "slow", "throughput"].iter().any(|w| lower.contains(w)) {
        ConcernCategory::Performance
    } else if ["scal", "capacity", "load", "growth"].iter().any(|w| lower.contains(w)) {
        ConcernCategory::Scalability
    } else if ["cost", "budget", "expensive", "pricing"].iter().any(|w| lower.contains(w)) {
        ConcernCategory::Cost
    } else {
        ConcernCategory::General
    }
}

fn extract_technical_points(content: &str) -> Vec<String> {
    text::sentences(content)
        .filter(|sentence| {
            TECHNICAL_MARKERS.iter().any(|m| text::has_word(sentence, m))
        })
        .map(str::to_string)
        .collect()
}

/// Base 0.5, adjusted by language signals, clamped to [0,1]
fn assess_confidence(content: &str) -> f64 {
    let lower = content.to_lowercase();
    let mut confidence: f64 = 0.5;

    if CERTAINTY_WORDS.iter().any(|w| lower.contains(w)) {
        confidence += 0.2;
    }
    if EVIDENCE_WORDS.iter().any(|w| lower.contains(w)) {
        confidence += 0.1;
    }
    if EXAMPLE_WORDS.iter().any(|w| lower.contains(w)) {
        confidence += 0.1;
    }
    if HEDGING_WORDS.iter().any(|w| lower.contains(w)) {
        confidence -= 0.1;
    }
    if SPECULATIVE_WORDS.iter().any(|w| lower.contains(w)) {
        confidence -= 0.1;
    }

    confidence.clamp(0.0, 1.0)
}

/// Positive or negative only when one side outnumbers the other 2:1
fn assess_sentiment(content: &str) -> Sentiment {
    let positive: usize = POSITIVE_WORDS
        .iter()
        .map(|w| text::count_word_matches(content, w))
        .sum();
    let negative: usize = NEGATIVE_WORDS
        .iter()
        .map(|w| text::count_word_matches(content, w))
        .sum();

    if positive > negative * 2 && positive > 0 {
        Sentiment::Positive
    } else if negative > positive * 2 && negative > 0 {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(content: &str) -> Extraction {
        KeywordExtractor.extract(content)
    }

    #[test]
    fn test_empty_text_yields_empty_extraction() {
        let extraction = extract("");
        assert!(extraction.themes.is_empty());
        assert!(extraction.recommendations.is_empty());
        assert_eq!(extraction.confidence, 0.0);
        assert_eq!(extraction.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_theme_detection() {
        let extraction = extract(
            "The architecture is modular. Security relies on encryption. \
             Latency dominates the performance budget.",
        );
        assert!(extraction.themes.contains(&ThemeCategory::Architecture));
        assert!(extraction.themes.contains(&ThemeCategory::Security));
        assert!(extraction.themes.contains(&ThemeCategory::Performance));
        assert!(!extraction.themes.contains(&ThemeCategory::BusinessImpact));
    }

    #[test]
    fn test_recommendation_priorities() {
        let extraction = extract(
            "You must encrypt credentials at rest. \
             The team should document the rollback path. \
             Consider caching session lookups.",
        );
        assert_eq!(extraction.recommendations.len(), 3);
        assert_eq!(extraction.recommendations[0].priority, Priority::High);
        assert_eq!(extraction.recommendations[0].category, RecommendationCategory::Security);
        assert_eq!(extraction.recommendations[1].priority, Priority::Medium);
        assert_eq!(extraction.recommendations[1].category, RecommendationCategory::Documentation);
        assert_eq!(extraction.recommendations[2].priority, Priority::Low);
        assert_eq!(extraction.recommendations[2].category, RecommendationCategory::Optimization);
    }

    #[test]
    fn test_concern_categories() {
        let extraction = extract(
            "The main risk is an injection attack on the gateway. \
             Another concern is the licensing cost at scale-up volume.",
        );
        assert_eq!(extraction.concerns.len(), 2);
        assert_eq!(extraction.concerns[0].category, ConcernCategory::Security);
        // "scal" is checked before "cost", so scale-up wins the category
        assert_eq!(extraction.concerns[1].category, ConcernCategory::Scalability);
    }

    #[test]
    fn test_confidence_adjustments() {
        assert!(extract("This is clearly correct because benchmarks confirm it").confidence > 0.5);
        assert!(extract("This might work, though the outcome is uncertain").confidence < 0.5);
        let neutral = extract("The module parses input records");
        assert!((neutral.confidence - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_confidence_bounds() {
        let maxed = extract(
            "Clearly and definitely correct because the evidence and research agree, \
             for example in the published benchmarks such as these",
        );
        assert!(maxed.confidence <= 1.0);
        assert!(maxed.confidence >= 0.0);
    }

    #[test]
    fn test_sentiment_ratio() {
        assert_eq!(
            extract("A strong, solid, excellent and robust design").sentiment,
            Sentiment::Positive
        );
        assert_eq!(
            extract("A weak, flawed and broken approach with missing pieces").sentiment,
            Sentiment::Negative
        );
        assert_eq!(
            extract("A strong design with one weak module").sentiment,
            Sentiment::Neutral
        );
    }

    #[test]
    fn test_technical_points() {
        let extraction = extract(
            "The consensus algorithm tolerates one failure. \
             Pricing follows usage. \
             The api exposes cursor pagination.",
        );
        assert_eq!(extraction.technical_points.len(), 2);
    }
}
