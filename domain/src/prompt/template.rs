//! Static prompt templates
//!
//! One system template per document type, one checklist per role family,
//! and per-domain focus material. The composer stitches these together.

use crate::analysis::profile::{DocumentType, TechnicalDomain};

/// Templates for generating analysis prompts
pub struct PromptTemplates;

impl PromptTemplates {
    /// System instruction selected by document type
    pub fn system_for(doc_type: DocumentType) -> &'static str {
        match doc_type {
            DocumentType::Whitepaper => {
                r#"You are reviewing a whitepaper as part of an expert panel.
Evaluate the soundness of the proposed design, the credibility of its claims,
and the practicality of its economics and adoption path. Challenge assumptions
where the evidence is thin. Be specific: cite the sections you rely on."#
            }
            DocumentType::TechnicalSpec => {
                r#"You are reviewing a technical specification as part of an expert panel.
Assess completeness, internal consistency, and implementability of the
requirements. Call out ambiguous or conflicting clauses and missing edge
cases. Be specific: reference the requirements you rely on."#
            }
            DocumentType::ArchitectureDoc => {
                r#"You are reviewing an architecture document as part of an expert panel.
Evaluate component boundaries, data flow, failure modes, and operational
concerns. Consider how the design behaves under load and partial failure.
Be specific: name the components you discuss."#
            }
            DocumentType::CodeDocumentation => {
                r#"You are reviewing code and its documentation as part of an expert panel.
Assess correctness, API ergonomics, error handling, and test coverage.
Point at concrete functions or examples rather than generalities."#
            }
            DocumentType::General | DocumentType::Query => {
                r#"You are contributing to an expert panel analysis.
Give a thorough, well-reasoned assessment from your area of expertise.
Support your points with reasoning and concrete recommendations."#
            }
        }
    }

    /// Role checklist appended to the system instruction
    pub fn checklist_for(role: &str) -> &'static str {
        let role = role.to_lowercase();
        if role.contains("architect") {
            r#"Checklist:
- Are component boundaries and responsibilities clear?
- How does the design scale and degrade under failure?
- Are integration points and data contracts explicit?"#
        } else if role.contains("developer") || role.contains("engineer") {
            r#"Checklist:
- Is the approach implementable with reasonable effort?
- Where are the error handling and edge-case gaps?
- What would you change before writing code against this?"#
        } else if role.contains("security") || role.contains("penetration") {
            r#"Checklist:
- What is the attack surface and who are the adversaries?
- Are authentication, authorization and data protection addressed?
- Which claims need an audit before production use?"#
        } else if role.contains("research") || role.contains("scientist") {
            r#"Checklist:
- Are the claims supported by evidence or citations?
- Is the methodology sound and reproducible?
- What alternatives were not considered?"#
        } else {
            r#"Checklist:
- What are the strongest and weakest parts of this material?
- Which risks deserve immediate attention?
- What would you prioritize next?"#
        }
    }

    /// Focus sentence injected per detected technical domain
    pub fn domain_focus(domain: TechnicalDomain) -> &'static str {
        match domain {
            TechnicalDomain::Blockchain => {
                "Pay particular attention to the consensus design, token economics, \
                 and smart contract trust assumptions."
            }
            TechnicalDomain::AiMl => {
                "Pay particular attention to training data provenance, model \
                 evaluation methodology, and inference cost."
            }
            TechnicalDomain::DistributedSystems => {
                "Pay particular attention to consistency guarantees, partition \
                 behavior, and operational scalability."
            }
            TechnicalDomain::Security => {
                "Pay particular attention to the threat model, key management, \
                 and the blast radius of a compromise."
            }
        }
    }

    /// Two guiding questions per domain
    pub fn domain_questions(domain: TechnicalDomain) -> [&'static str; 2] {
        match domain {
            TechnicalDomain::Blockchain => [
                "What happens to the protocol under adversarial validator behavior?",
                "Are the token incentives sustainable without external subsidy?",
            ],
            TechnicalDomain::AiMl => [
                "How is model drift detected and corrected in production?",
                "What is the fallback when the model is unavailable or wrong?",
            ],
            TechnicalDomain::DistributedSystems => [
                "Which operations survive a network partition, and which block?",
                "Where does backpressure apply when a downstream slows?",
            ],
            TechnicalDomain::Security => [
                "What is the impact of a single leaked credential?",
                "How are security-relevant events detected and audited?",
            ],
        }
    }

    /// Instruction asking a regenerated response to differ from a duplicate
    pub fn differentiation_note() -> &'static str {
        "Your previous answer closely matched another panelist's. Re-answer from \
         your own specialty: cover aspects the other experts are unlikely to raise."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_doc_type_has_a_system_template() {
        for doc_type in [
            DocumentType::Whitepaper,
            DocumentType::TechnicalSpec,
            DocumentType::ArchitectureDoc,
            DocumentType::CodeDocumentation,
            DocumentType::General,
            DocumentType::Query,
        ] {
            assert!(!PromptTemplates::system_for(doc_type).is_empty());
        }
    }

    #[test]
    fn test_checklist_selection() {
        assert!(PromptTemplates::checklist_for("Security Analyst").contains("attack surface"));
        assert!(PromptTemplates::checklist_for("Backend Developer").contains("implementable"));
        assert!(PromptTemplates::checklist_for("Lead Architect").contains("boundaries"));
        assert!(PromptTemplates::checklist_for("Product Manager").contains("prioritize"));
    }

    #[test]
    fn test_domain_material_present() {
        for domain in TechnicalDomain::all() {
            assert!(!PromptTemplates::domain_focus(domain).is_empty());
            let [first, second] = PromptTemplates::domain_questions(domain);
            assert!(first.ends_with('?'));
            assert!(second.ends_with('?'));
        }
    }
}
