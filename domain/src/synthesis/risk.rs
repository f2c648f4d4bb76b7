//! Risk register built from extracted concerns

use super::extraction::{ConcernCategory, Extraction};
use serde::{Deserialize, Serialize};

/// Map severity language to a band in [0,10].
pub fn severity_of(text: &str) -> u8 {
    let lower = text.to_lowercase();
    if ["critical", "severe", "major"].iter().any(|w| lower.contains(w)) {
        10
    } else if ["significant", "important"].iter().any(|w| lower.contains(w)) {
        7
    } else if ["minor", "small"].iter().any(|w| lower.contains(w)) {
        3
    } else {
        5
    }
}

/// Map likelihood language to a probability estimate.
pub fn likelihood_of(text: &str) -> f64 {
    let lower = text.to_lowercase();
    if ["likely", "probable"].iter().any(|w| lower.contains(w)) {
        0.7
    } else if ["unlikely", "rare"].iter().any(|w| lower.contains(w)) {
        0.3
    } else {
        0.5
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    Security,
    Technical,
    Business,
    Implementation,
}

impl RiskCategory {
    pub fn as_str(&self) -> &str {
        match self {
            RiskCategory::Security => "security",
            RiskCategory::Technical => "technical",
            RiskCategory::Business => "business",
            RiskCategory::Implementation => "implementation",
        }
    }
}

impl From<ConcernCategory> for RiskCategory {
    fn from(category: ConcernCategory) -> Self {
        match category {
            ConcernCategory::Security => RiskCategory::Security,
            ConcernCategory::Performance | ConcernCategory::Scalability => RiskCategory::Technical,
            ConcernCategory::Cost => RiskCategory::Business,
            ConcernCategory::General => RiskCategory::Implementation,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Risk {
    pub description: String,
    pub category: RiskCategory,
    /// Band in [0,10]
    pub severity: u8,
    /// Probability estimate in [0,1]
    pub likelihood: f64,
    pub raised_by: String,
    pub mitigation: String,
}

impl Risk {
    /// severity/10 weighted by likelihood, in [0,1]
    pub fn exposure(&self) -> f64 {
        f64::from(self.severity) / 10.0 * self.likelihood
    }

    pub fn is_critical(&self) -> bool {
        self.severity >= 7 && self.likelihood >= 0.5
    }
}

fn mitigation_for(category: RiskCategory) -> String {
    match category {
        RiskCategory::Security => {
            "Schedule a threat-model review and add the finding to the security backlog".to_string()
        }
        RiskCategory::Technical => {
            "Prototype the affected path under realistic load before committing to it".to_string()
        }
        RiskCategory::Business => {
            "Quantify the cost impact and review it with the project sponsor".to_string()
        }
        RiskCategory::Implementation => {
            "Break the work into smaller deliverables with explicit acceptance checks".to_string()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskRegister {
    pub risks: Vec<Risk>,
    /// Mean exposure across all risks, in [0,1]
    pub overall_exposure: f64,
}

impl RiskRegister {
    pub fn build(extractions: &[(String, Extraction)]) -> RiskRegister {
        let risks: Vec<Risk> = extractions
            .iter()
            .flat_map(|(author, extraction)| {
                extraction.concerns.iter().map(|concern| {
                    let category = RiskCategory::from(concern.category);
                    Risk {
                        description: concern.text.clone(),
                        category,
                        severity: severity_of(&concern.text),
                        likelihood: likelihood_of(&concern.text),
                        raised_by: author.clone(),
                        mitigation: mitigation_for(category),
                    }
                })
            })
            .collect();

        let overall_exposure = if risks.is_empty() {
            0.0
        } else {
            risks.iter().map(Risk::exposure).sum::<f64>() / risks.len() as f64
        };

        RiskRegister { risks, overall_exposure }
    }

    /// High-severity, at-least-even-odds risks, worst severity first.
    pub fn critical_risks(&self) -> Vec<&Risk> {
        let mut critical: Vec<&Risk> = self.risks.iter().filter(|r| r.is_critical()).collect();
        critical.sort_by(|a, b| {
            b.severity.cmp(&a.severity).then_with(|| {
                b.likelihood.partial_cmp(&a.likelihood).unwrap_or(std::cmp::Ordering::Equal)
            })
        });
        critical
    }

    /// One mitigation step per category present, critical first.
    pub fn mitigation_plan(&self) -> Vec<MitigationStep> {
        let mut ordered: Vec<&Risk> = self.risks.iter().collect();
        ordered.sort_by(|a, b| {
            b.exposure().partial_cmp(&a.exposure()).unwrap_or(std::cmp::Ordering::Equal)
        });
        let mut seen = Vec::new();
        let mut plan = Vec::new();
        for risk in ordered {
            if seen.contains(&risk.category) {
                continue;
            }
            seen.push(risk.category);
            let (priority, timeline) = if risk.severity >= 7 {
                ("high", "within 1 week")
            } else if risk.severity >= 5 {
                ("medium", "within 1 month")
            } else {
                ("low", "next quarter")
            };
            plan.push(MitigationStep {
                category: risk.category,
                risk: risk.description.clone(),
                mitigation: risk.mitigation.clone(),
                priority: priority.to_string(),
                timeline: timeline.to_string(),
            });
        }
        plan
    }
}

/// A row of the mitigation plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MitigationStep {
    pub category: RiskCategory,
    pub risk: String,
    pub mitigation: String,
    pub priority: String,
    pub timeline: String,
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
    fn test_severity_bands() {
        assert_eq!(severity_of("a critical flaw"), 10);
        assert_eq!(severity_of("a significant gap"), 7);
        assert_eq!(severity_of("a minor nit"), 3);
        assert_eq!(severity_of("some gap"), 5);
    }

    #[test]
    fn test_likelihood_bands() {
        assert!((likelihood_of("this is likely to happen") - 0.7).abs() < 1e-9);
        assert!((likelihood_of("a rare failure") - 0.3).abs() < 1e-9);
        assert!((likelihood_of("it may happen") - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_register_from_concerns() {
        let register = RiskRegister::build(&extracted(&[(
            "architect",
            "A critical risk: the attack surface is likely to grow.",
        )]));
        assert_eq!(register.risks.len(), 1);
        let risk = &register.risks[0];
        assert_eq!(risk.category, RiskCategory::Security);
        assert_eq!(risk.severity, 10);
        assert!((risk.likelihood - 0.7).abs() < 1e-9);
        assert_eq!(risk.raised_by, "architect");
        assert!((register.overall_exposure - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_critical_filter_and_order() {
        let register = RiskRegister::build(&extracted(&[
            ("a", "A significant risk of cost overrun is likely."),
            ("b", "A critical security risk is likely to be exploited."),
            ("c", "A minor issue with documentation."),
        ]));
        let critical = register.critical_risks();
        assert_eq!(critical.len(), 2);
        assert_eq!(critical[0].category, RiskCategory::Security);
        assert_eq!(critical[1].category, RiskCategory::Business);
    }

    #[test]
    fn test_empty_register() {
        let register = RiskRegister::build(&[]);
        assert!(register.risks.is_empty());
        assert_eq!(register.overall_exposure, 0.0);
        assert!(register.critical_risks().is_empty());
        assert!(register.mitigation_plan().is_empty());
    }

    #[test]
    fn test_mitigation_plan_one_line_per_category() {
        let register = RiskRegister::build(&extracted(&[
            ("a", "A critical security risk: likely breach of the attack surface."),
            ("b", "Another security concern about a probable exploit."),
            ("c", "A risk of slow latency under load."),
        ]));
        let plan = register.mitigation_plan();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].category, RiskCategory::Security);
        assert_eq!(plan[0].priority, "high");
        assert_eq!(plan[1].category, RiskCategory::Technical);
    }
}
