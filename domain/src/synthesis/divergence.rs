//! Conflicting-view detection
//!
//! Concerns are grouped by category; an antonym keyword pair appearing on
//! opposite sides within one category marks a divergence. Severity of a
//! divergence is the stronger of the two conflicting concerns.

use super::extraction::{ConcernCategory, Extraction};
use super::risk::severity_of;
use serde::{Deserialize, Serialize};

/// Keyword pairs that signal opposing positions
const ANTONYM_PAIRS: [(&str, &str); 4] = [
    ("centralized", "decentralized"),
    ("synchronous", "asynchronous"),
    ("monolithic", "microservices"),
    ("sql", "nosql"),
];

/// One position inside a divergence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub agent: String,
    pub view: String,
}

/// Conflicting views on one topic within a concern category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Divergence {
    pub category: ConcernCategory,
    /// e.g. "sql vs nosql"
    pub topic: String,
    pub positions: Vec<Position>,
    /// Max severity among the conflicting concerns, in [0,10]
    pub severity: u8,
}

/// Find divergences across all extracted responses.
pub fn find_divergences(extractions: &[(String, Extraction)]) -> Vec<Divergence> {
    let mut divergences = Vec::new();

    for category in ConcernCategory::all() {
        let in_category: Vec<(&str, &str)> = extractions
            .iter()
            .flat_map(|(author, extraction)| {
                extraction
                    .concerns
                    .iter()
                    .filter(|concern| concern.category == category)
                    .map(move |concern| (author.as_str(), concern.text.as_str()))
            })
            .collect();
        if in_category.len() < 2 {
            continue;
        }

        for (left, right) in ANTONYM_PAIRS {
            // Each right keyword contains its left counterpart ("nosql"
            // contains "sql"), so the left side must exclude right matches.
            let left_side: Vec<&(&str, &str)> = in_category
                .iter()
                .filter(|(_, view)| {
                    let lower = view.to_lowercase();
                    lower.contains(left) && !lower.contains(right)
                })
                .collect();
            let right_side: Vec<&(&str, &str)> = in_category
                .iter()
                .filter(|(_, view)| view.to_lowercase().contains(right))
                .collect();
            if left_side.is_empty() || right_side.is_empty() {
                continue;
            }

            let positions: Vec<Position> = left_side
                .iter()
                .chain(right_side.iter())
                .map(|(agent, view)| Position {
                    agent: agent.to_string(),
                    view: view.to_string(),
                })
                .collect();
            let severity = positions
                .iter()
                .map(|p| severity_of(&p.view))
                .max()
                .unwrap_or(0);

            divergences.push(Divergence {
                category,
                topic: format!("{left} vs {right}"),
                positions,
                severity,
            });
        }
    }

    divergences
}
