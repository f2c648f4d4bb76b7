//! Agent relevance scoring
//!
//! Each agent is scored against a document profile on four axes. Sub-scores
//! accumulate evidence and are clamped to [0,1] before weighting, so one
//! strong axis cannot drown out the others.

use crate::analysis::profile::{DocumentProfile, DocumentType, TechnicalDomain};
use crate::analysis::text;
use crate::catalog::profile::AgentProfile;
use serde::{Deserialize, Serialize};

/// Weight of the domain-match axis
const DOMAIN_WEIGHT: f64 = 10.0;
/// Weight of the capability-match axis
const CAPABILITY_WEIGHT: f64 = 5.0;
/// Weight of the role-affinity axis
const ROLE_WEIGHT: f64 = 3.0;
/// Weight of the contextual-affinity axis
const CONTEXT_WEIGHT: f64 = 4.0;

/// Designated specialists per technical domain, by agent id
const DOMAIN_SPECIALISTS: [(TechnicalDomain, &[&str]); 4] = [
    (TechnicalDomain::Blockchain, &[
        "web3-architect",
        "smart-contract-developer",
        "blockchain-specialist",
        "defi-expert",
        "crypto-economist",
        "cryptography-expert",
    ]),
    (TechnicalDomain::AiMl, &[
        "ai-ml-engineer",
        "machine-learning-engineer",
        "ai-researcher",
        "neural-network-specialist",
        "data-scientist",
        "ml-ops-engineer",
    ]),
    (TechnicalDomain::DistributedSystems, &[
        "system-architect",
        "cloud-architect",
        "microservices-expert",
        "backend-architect",
        "devops-engineer",
        "performance-engineer",
    ]),
    (TechnicalDomain::Security, &[
        "security-architect",
        "security-analyst",
        "penetration-tester",
        "cryptography-expert",
        "compliance-officer",
    ]),
];

/// Capability keywords counted as domain evidence
const DOMAIN_CAPABILITY_KEYWORDS: [(TechnicalDomain, &[&str]); 4] = [
    (TechnicalDomain::Blockchain, &["blockchain", "web3", "smart contract", "crypto", "defi"]),
    (TechnicalDomain::AiMl, &["machine learning", "ai", "neural", "model", "data science"]),
    (TechnicalDomain::DistributedSystems, &[
        "distributed",
        "scalability",
        "cloud",
        "microservice",
        "infrastructure",
    ]),
    (TechnicalDomain::Security, &["security", "cryptography", "penetration", "compliance"]),
];

/// Score breakdown for one agent against one document profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentScore {
    pub total: f64,
    pub domain: f64,
    pub capability: f64,
    pub role: f64,
    pub context: f64,
}

/// Score an agent's fit for a document profile.
pub fn score_agent(agent: &AgentProfile, profile: &DocumentProfile) -> AgentScore {
    let domain = domain_score(agent, profile).clamp(0.0, 1.0);
    let capability = capability_score(agent, profile).clamp(0.0, 1.0);
    let role = role_score(agent, profile).clamp(0.0, 1.0);
    let context = context_score(agent, profile).clamp(0.0, 1.0);

    AgentScore {
        total: domain * DOMAIN_WEIGHT
            + capability * CAPABILITY_WEIGHT
            + role * ROLE_WEIGHT
            + context * CONTEXT_WEIGHT,
        domain,
        capability,
        role,
        context,
    }
}

/// Whether an agent covers one technical domain: listed as a specialist for
/// it, or carrying at least one of the domain's capability keywords.
pub fn covers_domain(agent: &AgentProfile, domain: TechnicalDomain) -> bool {
    if let Some((_, specialists)) = DOMAIN_SPECIALISTS.iter().find(|(d, _)| *d == domain)
        && specialists.contains(&agent.id.as_str())
    {
        return true;
    }
    DOMAIN_CAPABILITY_KEYWORDS
        .iter()
        .find(|(d, _)| *d == domain)
        .is_some_and(|(_, keywords)| {
            keywords
                .iter()
                .any(|keyword| agent.capabilities.iter().any(|cap| cap.contains(keyword)))
        })
}

/// Specialist listing is definitive evidence; capability keywords add a
/// fifth of a point per hit
fn domain_score(agent: &AgentProfile, profile: &DocumentProfile) -> f64 {
    let mut score = 0.0;

    for detected in &profile.domains {
        if let Some((_, specialists)) = DOMAIN_SPECIALISTS
            .iter()
            .find(|(domain, _)| *domain == detected.domain)
            && specialists.contains(&agent.id.as_str())
        {
            score += 1.0;
        }

        if let Some((_, keywords)) = DOMAIN_CAPABILITY_KEYWORDS
            .iter()
            .find(|(domain, _)| *domain == detected.domain)
        {
            for keyword in *keywords {
                if agent.capabilities.iter().any(|cap| cap.contains(keyword)) {
                    score += 0.2;
                }
            }
        }
    }

    score
}

fn capability_score(agent: &AgentProfile, profile: &DocumentProfile) -> f64 {
    let mut score = 0.0;

    let concepts = profile
        .concepts
        .technical
        .iter()
        .map(|c| c.to_lowercase())
        .chain(profile.concepts.architectural.iter().cloned());
    for concept in concepts {
        if agent.capabilities.iter().any(|cap| cap.contains(&concept)) {
            score += 0.3;
        }
    }

    let has_capability = |keywords: &[&str]| {
        agent
            .capabilities
            .iter()
            .any(|cap| keywords.iter().any(|k| cap.contains(k)))
    };

    if profile.structure.has_code_blocks && has_capability(&["code", "development", "review"]) {
        score += 0.2;
    }
    if profile.structure.has_math && has_capability(&["research", "statistics", "algorithm"]) {
        score += 0.2;
    }
    if profile.structure.has_diagrams && has_capability(&["architecture", "design"]) {
        score += 0.2;
    }

    score
}

fn role_score(agent: &AgentProfile, profile: &DocumentProfile) -> f64 {
    let mut score = 0.0;

    let role_has = |markers: &[&str]| markers.iter().any(|m| agent.role.contains(m));

    let affinity: &[&str] = match profile.doc_type {
        DocumentType::Whitepaper => &["Research", "Scientist", "Strategist", "Economist"],
        DocumentType::TechnicalSpec => &["Architect", "Analyst"],
        DocumentType::CodeDocumentation => &["Developer", "Engineer"],
        DocumentType::ArchitectureDoc => &["Architect"],
        DocumentType::General | DocumentType::Query => &[],
    };
    if role_has(affinity) {
        score += 0.5;
    }

    if profile.complexity.band == crate::analysis::profile::ComplexityBand::High
        && role_has(&["Chief", "Lead", "Principal", "Head", "Senior"])
    {
        score += 0.3;
    }
    if profile.structure.has_math && role_has(&["Scientist", "Researcher"]) {
        score += 0.2;
    }
    if profile.structure.has_code_blocks && role_has(&["Developer", "Engineer"]) {
        score += 0.2;
    }

    score
}

/// Contextual fit from content the other axes do not look at
fn context_score(agent: &AgentProfile, profile: &DocumentProfile) -> f64 {
    let mut score = 0.0;

    let role_has = |markers: &[&str]| markers.iter().any(|m| agent.role.contains(m));

    if profile.doc_type == DocumentType::Whitepaper {
        if role_has(&["Innovation", "Strategist", "Strategy"]) {
            score += 0.4;
        }
        if role_has(&["Research"]) {
            score += 0.3;
        }
        if role_has(&["Analyst"]) {
            score += 0.3;
        }
    }

    if !profile.concepts.business.is_empty() && role_has(&["Business", "Product", "Strategy"]) {
        score += 0.3;
    }

    // Direct mentions of a capability in the text itself
    if agent
        .capabilities
        .iter()
        .any(|cap| text::has_word(&profile.content, cap))
    {
        score += 0.2;
    }

    score
}
