//! Improvement opportunities mined from response text

use crate::analysis::text;
use serde::{Deserialize, Serialize};

const OPPORTUNITY_MARKERS: [&str; 5] =
    ["opportunit", "could improve", "potential", "would benefit", "enable"];

const HIGH_IMPACT_WORDS: [&str; 4] = ["transform", "major", "significant", "substantial"];
const LOW_IMPACT_WORDS: [&str; 3] = ["minor", "small", "marginal"];

const EASY_WORDS: [&str; 4] = ["easy", "simple", "straightforward", "quick"];
const HARD_WORDS: [&str; 4] = ["complex", "difficult", "hard", "costly"];

fn impact_of(text: &str) -> f64 {
    let lower = text.to_lowercase();
    if HIGH_IMPACT_WORDS.iter().any(|w| lower.contains(w)) {
        0.9
    } else if LOW_IMPACT_WORDS.iter().any(|w| lower.contains(w)) {
        0.3
    } else {
        0.6
    }
}

fn feasibility_of(text: &str) -> f64 {
    let lower = text.to_lowercase();
    if EASY_WORDS.iter().any(|w| lower.contains(w)) {
        0.9
    } else if HARD_WORDS.iter().any(|w| lower.contains(w)) {
        0.3
    } else {
        0.6
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opportunity {
    pub description: String,
    pub raised_by: String,
    /// Estimated payoff in [0,1]
    pub impact: f64,
    /// Estimated ease of capture in [0,1]
    pub feasibility: f64,
}

impl Opportunity {
    /// Ranking score, impact discounted by feasibility.
    pub fn score(&self) -> f64 {
        self.impact * self.feasibility
    }
}

/// Collect opportunity statements from raw responses, best score first.
///
/// Works on the raw text because opportunity language rarely overlaps the
/// recommendation or concern markers.
pub fn find_opportunities(responses: &[(String, String)]) -> Vec<Opportunity> {
    let mut opportunities: Vec<Opportunity> = responses
        .iter()
        .flat_map(|(author, content)| {
            text::sentences(content)
                .filter(|sentence| {
                    let lower = sentence.to_lowercase();
                    OPPORTUNITY_MARKERS.iter().any(|m| lower.contains(m))
                })
                .map(move |sentence| Opportunity {
                    description: sentence.to_string(),
                    raised_by: author.clone(),
                    impact: impact_of(sentence),
                    feasibility: feasibility_of(sentence),
                })
        })
        .collect();
    opportunities.sort_by(|a, b| {
        b.score().partial_cmp(&a.score()).unwrap_or(std::cmp::Ordering::Equal)
    });
    opportunities
}
