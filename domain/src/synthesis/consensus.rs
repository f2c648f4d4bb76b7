//! Theme agreement and recommendation clustering
//!
//! Works over (author, extraction) pairs. A theme or normalized
//! recommendation backed by at least 70% of the responses counts as
//! consensus. Every ratio guards the zero-response case.

use super::extraction::{Extraction, Priority, ThemeCategory};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Support ratio at which a theme or recommendation becomes consensus
pub const CONSENSUS_THRESHOLD: f64 = 0.7;

/// Agreement data for one theme
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConsensus {
    pub theme: ThemeCategory,
    /// Responses mentioning the theme
    pub mentions: usize,
    /// mentions / total responses, in [0,1]
    pub agreement: f64,
    pub consensus: bool,
}

/// A cluster of equivalent recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationCluster {
    /// Representative wording (first occurrence)
    pub text: String,
    /// Strongest priority seen in the cluster
    pub priority: Priority,
    /// Agent names backing the recommendation
    pub supporters: Vec<String>,
    /// supporters / total responses, in [0,1]
    pub support_ratio: f64,
    pub consensus: bool,
}

/// The consensus view over all responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusAnalysis {
    /// Every mentioned theme, strongest agreement first
    pub themes: Vec<ThemeConsensus>,
    /// Recommendation clusters, most supported first
    pub recommendations: Vec<RecommendationCluster>,
    /// (total theme mentions - unique themes) / total theme mentions
    pub overall_agreement: f64,
}

impl ConsensusAnalysis {
    /// Themes that reached consensus
    pub fn consensus_themes(&self) -> impl Iterator<Item = &ThemeConsensus> {
        self.themes.iter().filter(|t| t.consensus)
    }

    /// Analyze agreement across extracted responses.
    pub fn analyze(extractions: &[(String, Extraction)]) -> Self {
        let total = extractions.len();
        if total == 0 {
            return Self {
                themes: Vec::new(),
                recommendations: Vec::new(),
                overall_agreement: 0.0,
            };
        }

        let mut theme_mentions: HashMap<ThemeCategory, usize> = HashMap::new();
        for (_, extraction) in extractions {
            for theme in &extraction.themes {
                *theme_mentions.entry(*theme).or_default() += 1;
            }
        }

        let mut themes: Vec<ThemeConsensus> = theme_mentions
            .iter()
            .map(|(theme, mentions)| {
                let agreement = *mentions as f64 / total as f64;
                ThemeConsensus {
                    theme: *theme,
                    mentions: *mentions,
                    agreement,
                    consensus: agreement >= CONSENSUS_THRESHOLD,
                }
            })
            .collect();
        themes.sort_by(|a, b| b.mentions.cmp(&a.mentions).then(a.theme.cmp(&b.theme)));

        let recommendations = cluster_recommendations(extractions, total);

        let total_mentions: usize = theme_mentions.values().sum();
        let overall_agreement = if total_mentions == 0 {
            0.0
        } else {
            (total_mentions - theme_mentions.len()) as f64 / total_mentions as f64
        };

        Self {
            themes,
            recommendations,
            overall_agreement,
        }
    }
}

/// Equality key for a recommendation: lowercased content words joined
fn normalize(text: &str) -> String {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

fn cluster_recommendations(
    extractions: &[(String, Extraction)],
    total: usize,
) -> Vec<RecommendationCluster> {
    // Keyed by normalized text, insertion order preserved via Vec
    let mut order: Vec<String> = Vec::new();
    let mut clusters: HashMap<String, RecommendationCluster> = HashMap::new();

    for (author, extraction) in extractions {
        for recommendation in &extraction.recommendations {
            let key = normalize(&recommendation.text);
            let cluster = clusters.entry(key.clone()).or_insert_with(|| {
                order.push(key);
                RecommendationCluster {
                    text: recommendation.text.clone(),
                    priority: recommendation.priority,
                    supporters: Vec::new(),
                    support_ratio: 0.0,
                    consensus: false,
                }
            });
            if !cluster.supporters.contains(author) {
                cluster.supporters.push(author.clone());
            }
            cluster.priority = cluster.priority.min(recommendation.priority);
        }
    }

    let mut result: Vec<RecommendationCluster> = order
        .into_iter()
        .map(|key| {
            let mut cluster = clusters.remove(&key).expect("cluster for key");
            cluster.support_ratio = cluster.supporters.len() as f64 / total as f64;
            cluster.consensus = cluster.support_ratio >= CONSENSUS_THRESHOLD;
            cluster
        })
        .collect();
    result.sort_by(|a, b| b.supporters.len().cmp(&a.supporters.len()));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::extraction::{KeywordExtractor, ResponseExtractor};

    fn extracted(pairs: &[(&str, &str)]) -> Vec<(String, Extraction)> {
        pairs
            .iter()
            .map(|(author, content)| (author.to_string(), KeywordExtractor.extract(content)))
            .collect()
    }

    #[test]
    fn test_zero_responses_degrade_to_defaults() {
        let analysis = ConsensusAnalysis::analyze(&[]);
        assert_eq!(analysis.overall_agreement, 0.0);
        assert!(analysis.themes.is_empty());
        assert!(analysis.recommendations.is_empty());
    }

    #[test]
    fn test_theme_consensus_at_threshold() {
        let analysis = ConsensusAnalysis::analyze(&extracted(&[
            ("a", "The security posture needs encryption"),
            ("b", "Security through authentication is weak"),
            ("c", "An attack on security is plausible"),
            ("d", "Business adoption will decide the outcome"),
        ]));
        let security = analysis
            .themes
            .iter()
            .find(|t| t.theme == ThemeCategory::Security)
            .unwrap();
        assert_eq!(security.mentions, 3);
        assert!(security.consensus, "3/4 = 0.75 passes the 0.7 threshold");

        let business = analysis
            .themes
            .iter()
            .find(|t| t.theme == ThemeCategory::BusinessImpact)
            .unwrap();
        assert!(!business.consensus);
    }

    #[test]
    fn test_recommendation_clustering_across_authors() {
        let analysis = ConsensusAnalysis::analyze(&extracted(&[
            ("a", "You should add rate limiting."),
            ("b", "You should add rate limiting."),
            ("c", "Consider a caching layer."),
        ]));
        assert_eq!(analysis.recommendations.len(), 2);
        let top = &analysis.recommendations[0];
        assert_eq!(top.supporters, vec!["a".to_string(), "b".to_string()]);
        assert!(!top.consensus, "2/3 is below the threshold");
    }

    #[test]
    fn test_normalization_merges_punctuation_variants() {
        let analysis = ConsensusAnalysis::analyze(&extracted(&[
            ("a", "You should add rate-limiting!"),
            ("b", "you should add Rate Limiting"),
        ]));
        assert_eq!(analysis.recommendations.len(), 1);
        assert_eq!(analysis.recommendations[0].supporters.len(), 2);
        assert!(analysis.recommendations[0].consensus);
    }

    #[test]
    fn test_overall_agreement_formula() {
        // Two responses, both on security: 2 mentions, 1 unique -> 0.5
        let analysis = ConsensusAnalysis::analyze(&extracted(&[
            ("a", "Encryption is required everywhere"),
            ("b", "The attack surface is wide"),
        ]));
        assert!((analysis.overall_agreement - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_agreement_in_bounds() {
        let analysis = ConsensusAnalysis::analyze(&extracted(&[
            ("a", "Architecture, security and performance all interact"),
            ("b", "No particular topic here"),
        ]));
        assert!((0.0..=1.0).contains(&analysis.overall_agreement));
        for theme in &analysis.themes {
            assert!((0.0..=1.0).contains(&theme.agreement));
        }
    }
}
