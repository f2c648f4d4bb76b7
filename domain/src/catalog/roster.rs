//! Built-in agent roster
//!
//! The roster groups specialists the way the selection scorer expects them:
//! ids are stable kebab-case identifiers referenced by the per-domain
//! specialist tables, roles drive phase eligibility and expertise grouping,
//! and capabilities are lowercase keywords matched against document concepts.

use super::profile::AgentProfile;
use std::sync::OnceLock;

/// Catalog of available agents
#[derive(Debug, Clone)]
pub struct AgentCatalog {
    agents: Vec<AgentProfile>,
}

impl AgentCatalog {
    /// The built-in roster of specialists
    pub fn builtin() -> Self {
        Self {
            agents: builtin_roster(),
        }
    }

    /// Shared catalog instance
    pub fn global() -> &'static AgentCatalog {
        static CATALOG: OnceLock<AgentCatalog> = OnceLock::new();
        CATALOG.get_or_init(AgentCatalog::builtin)
    }

    pub fn from_agents(agents: Vec<AgentProfile>) -> Self {
        Self { agents }
    }

    pub fn get(&self, id: &str) -> Option<&AgentProfile> {
        self.agents.iter().find(|agent| agent.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&AgentProfile> {
        self.agents.iter().find(|agent| agent.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AgentProfile> {
        self.agents.iter()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

fn agent(id: &str, name: &str, capabilities: &[&str]) -> AgentProfile {
    AgentProfile::new(id, name, name).with_capabilities(capabilities)
}

fn builtin_roster() -> Vec<AgentProfile> {
    vec![
        // Architecture
        agent("lead-architect", "Lead Architect", &[
            "system architecture",
            "technical leadership",
            "design patterns",
            "scalability",
        ]),
        agent("system-architect", "System Architect", &[
            "system architecture",
            "distributed systems",
            "integration design",
            "scalability",
        ]),
        agent("solution-architect", "Solution Architect", &[
            "solution architecture",
            "technology selection",
            "integration patterns",
            "cloud",
        ]),
        agent("enterprise-architect", "Enterprise Architect", &[
            "enterprise architecture",
            "governance",
            "business alignment",
            "roadmaps",
        ]),
        agent("technical-architect", "Technical Architect", &[
            "technical architecture",
            "code review",
            "framework design",
            "api design",
        ]),
        agent("cloud-architect", "Cloud Architect", &[
            "cloud architecture",
            "distributed systems",
            "infrastructure design",
            "scalability",
        ]),
        agent("web3-architect", "Web3 Architect", &[
            "web3",
            "blockchain architecture",
            "decentralized systems",
            "smart contract design",
        ]),
        agent("microservices-expert", "Microservices Specialist", &[
            "microservice design",
            "service boundaries",
            "distributed systems",
            "event-driven architecture",
        ]),
        agent("design-system-architect", "Design System Architect", &[
            "design systems",
            "component architecture",
            "ui consistency",
            "frontend architecture",
        ]),
        agent("frontend-architect", "Frontend Architect", &[
            "frontend architecture",
            "component design",
            "state management",
            "performance tuning",
        ]),
        agent("backend-architect", "Backend Architect", &[
            "backend architecture",
            "api design",
            "data modeling",
            "scalability",
        ]),
        agent("data-architect", "Data Architect", &[
            "data architecture",
            "data modeling",
            "data governance",
            "analytics platforms",
        ]),
        agent("database-architect", "Database Architect", &[
            "database design",
            "query optimization",
            "data modeling",
            "storage engines",
        ]),
        agent("mobile-architect", "Mobile Architect", &[
            "mobile architecture",
            "offline-first design",
            "app distribution",
            "cross-platform strategy",
        ]),
        agent("integration-architect", "Integration Architect", &[
            "integration patterns",
            "message brokers",
            "api gateways",
            "legacy interoperability",
        ]),
        agent("platform-architect", "Platform Architect", &[
            "platform design",
            "developer experience",
            "multi-tenancy",
            "extensibility",
        ]),
        // Development
        agent("frontend-developer", "Frontend Developer", &[
            "frontend code",
            "react",
            "responsive design",
            "accessibility",
        ]),
        agent("backend-developer", "Backend Developer", &[
            "backend code",
            "api development",
            "databases",
            "server performance",
        ]),
        agent("full-stack-developer", "Full Stack Developer", &[
            "full stack code",
            "api development",
            "frontend",
            "backend",
        ]),
        agent("mobile-developer", "Mobile Developer", &[
            "mobile code",
            "ios",
            "android",
            "offline sync",
        ]),
        agent("react-developer", "React Developer", &[
            "react",
            "component code",
            "hooks",
            "state management",
        ]),
        agent("api-designer", "API Designer", &[
            "api design",
            "rest",
            "protocol design",
            "interface contracts",
        ]),
        agent("smart-contract-developer", "Smart Contract Developer", &[
            "smart contract code",
            "solidity",
            "gas optimization",
            "ethereum",
        ]),
        agent("blockchain-specialist", "Blockchain Specialist", &[
            "blockchain",
            "consensus protocols",
            "web3",
            "token economics",
        ]),
        agent("defi-expert", "DeFi Specialist", &[
            "defi",
            "smart contract audits",
            "liquidity protocols",
            "crypto markets",
        ]),
        agent("crypto-economist", "Crypto Economist", &[
            "crypto economics",
            "token design",
            "incentive analysis",
            "mathematical modeling",
        ]),
        agent("ios-developer", "iOS Developer", &[
            "ios code",
            "swift",
            "app store delivery",
            "mobile performance",
        ]),
        agent("android-developer", "Android Developer", &[
            "android code",
            "kotlin",
            "play store delivery",
            "mobile performance",
        ]),
        agent("game-developer", "Game Developer", &[
            "game code",
            "game engines",
            "real-time rendering",
            "gameplay mechanics",
        ]),
        agent("python-developer", "Python Developer", &[
            "python code",
            "scripting",
            "data tooling",
            "api development",
        ]),
        agent("nodejs-developer", "Node.js Developer", &[
            "node.js code",
            "event loops",
            "api development",
            "npm ecosystem",
        ]),
        agent("rust-developer", "Rust Developer", &[
            "rust code",
            "memory safety",
            "systems programming",
            "concurrency",
        ]),
        agent("golang-developer", "Go Developer", &[
            "go code",
            "concurrency",
            "network services",
            "cli tooling",
        ]),
        agent("embedded-engineer", "Embedded Engineer", &[
            "embedded code",
            "firmware",
            "resource constraints",
            "hardware interfaces",
        ]),
        agent("iot-specialist", "IoT Specialist", &[
            "iot",
            "device fleets",
            "telemetry",
            "edge computing",
        ]),
        agent("graphql-specialist", "GraphQL Specialist", &[
            "graphql",
            "schema design",
            "query batching",
            "api development",
        ]),
        // Design
        agent("ui-ux-designer", "UI/UX Designer", &[
            "ui design",
            "ux research",
            "wireframing",
            "usability",
        ]),
        agent("ux-designer", "UX Designer", &[
            "ux design",
            "user journeys",
            "usability testing",
            "interaction design",
        ]),
        agent("ui-designer", "UI Designer", &[
            "ui design",
            "visual hierarchy",
            "design systems",
            "prototyping",
        ]),
        agent("product-designer", "Product Designer", &[
            "product design",
            "user research",
            "prototyping",
            "design strategy",
        ]),
        agent("visual-designer", "Visual Designer", &[
            "visual design",
            "branding",
            "typography",
            "illustration",
        ]),
        agent("game-designer", "Game Designer", &[
            "game design",
            "level design",
            "player progression",
            "balancing",
        ]),
        agent("ux-researcher", "UX Researcher", &[
            "ux research",
            "user interviews",
            "usability studies",
            "survey design",
        ]),
        agent("interaction-designer", "Interaction Designer", &[
            "interaction design",
            "micro-interactions",
            "gesture design",
            "prototyping",
        ]),
        agent("motion-designer", "Motion Designer", &[
            "motion design",
            "animation",
            "transitions",
            "visual storytelling",
        ]),
        agent("brand-designer", "Brand Designer", &[
            "brand design",
            "identity systems",
            "style guides",
            "typography",
        ]),
        // DevOps and infrastructure
        agent("devops-engineer", "DevOps Engineer", &[
            "ci/cd",
            "cloud infrastructure",
            "automation",
            "containers",
        ]),
        agent("devops-lead", "DevOps Lead", &[
            "devops strategy",
            "platform engineering",
            "cloud",
            "reliability",
        ]),
        agent("ml-ops-engineer", "MLOps Engineer", &[
            "ml pipelines",
            "model deployment",
            "monitoring",
            "automation",
        ]),
        agent("site-reliability-engineer", "Site Reliability Engineer", &[
            "reliability",
            "error budgets",
            "incident response",
            "observability",
        ]),
        agent("platform-engineer", "Platform Engineer", &[
            "internal platforms",
            "developer tooling",
            "golden paths",
            "self-service infrastructure",
        ]),
        agent("infrastructure-engineer", "Infrastructure Engineer", &[
            "infrastructure as code",
            "provisioning",
            "networking",
            "capacity planning",
        ]),
        agent("kubernetes-specialist", "Kubernetes Specialist", &[
            "kubernetes",
            "container orchestration",
            "cluster operations",
            "workload scheduling",
        ]),
        agent("network-engineer", "Network Engineer", &[
            "network design",
            "routing",
            "load balancing",
            "latency analysis",
        ]),
        agent("cloud-engineer", "Cloud Engineer", &[
            "cloud infrastructure",
            "managed services",
            "cost optimization",
            "automation",
        ]),
        agent("release-engineer", "Release Engineer", &[
            "release management",
            "build pipelines",
            "versioning",
            "rollout strategy",
        ]),
        agent("observability-engineer", "Observability Engineer", &[
            "observability",
            "metrics",
            "distributed tracing",
            "alerting",
        ]),
        agent("chaos-engineer", "Chaos Engineer", &[
            "chaos experiments",
            "fault injection",
            "resilience testing",
            "failure analysis",
        ]),
        // Security and quality
        agent("security-architect", "Security Architect", &[
            "security architecture",
            "threat modeling",
            "encryption",
            "zero-trust design",
        ]),
        agent("security-analyst", "Security Analyst", &[
            "security analysis",
            "vulnerability assessment",
            "incident response",
            "compliance",
        ]),
        agent("penetration-tester", "Penetration Tester", &[
            "pentest",
            "exploit analysis",
            "vulnerability research",
            "red teaming",
        ]),
        agent("compliance-officer", "Compliance Officer", &[
            "compliance",
            "regulatory analysis",
            "audit readiness",
            "risk management",
        ]),
        agent("cryptography-expert", "Cryptography Specialist", &[
            "cryptography",
            "encryption",
            "key management",
            "mathematical proofs",
        ]),
        agent("qa-engineer", "QA Engineer", &[
            "test planning",
            "regression testing",
            "quality gates",
            "defect analysis",
        ]),
        agent("qa-lead", "QA Lead", &[
            "quality strategy",
            "test methodology",
            "release criteria",
            "team coordination",
        ]),
        agent("test-automation-engineer", "Test Automation Engineer", &[
            "test automation code",
            "ci integration",
            "coverage analysis",
            "tooling",
        ]),
        agent("performance-engineer", "Performance Engineer", &[
            "performance profiling",
            "load testing",
            "bottleneck analysis",
            "optimization",
        ]),
        agent("devsecops-engineer", "DevSecOps Engineer", &[
            "security automation",
            "pipeline hardening",
            "dependency scanning",
            "secrets management",
        ]),
        agent("application-security-engineer", "Application Security Engineer", &[
            "application security",
            "secure coding",
            "threat modeling",
            "code audits",
        ]),
        agent("privacy-specialist", "Privacy Specialist", &[
            "privacy engineering",
            "data minimization",
            "gdpr",
            "consent flows",
        ]),
        agent("security-tester", "Security Tester", &[
            "security testing",
            "fuzzing",
            "attack simulation",
            "vulnerability triage",
        ]),
        agent("usability-tester", "Usability Tester", &[
            "usability testing",
            "accessibility audits",
            "task analysis",
            "user feedback",
        ]),
        agent("accessibility-specialist", "Accessibility Specialist", &[
            "accessibility",
            "wcag",
            "assistive technology",
            "inclusive design",
        ]),
        // Data and AI
        agent("data-scientist", "Data Scientist", &[
            "data science",
            "machine learning",
            "statistical analysis",
            "mathematical modeling",
        ]),
        agent("data-engineer", "Data Engineer", &[
            "data pipelines",
            "etl",
            "distributed processing",
            "data quality",
        ]),
        agent("database-administrator", "Database Administrator", &[
            "database operations",
            "backup strategy",
            "query tuning",
            "replication",
        ]),
        agent("analytics-lead", "Analytics Lead", &[
            "analytics strategy",
            "metrics design",
            "data storytelling",
            "experimentation",
        ]),
        agent("business-intelligence-analyst", "Business Intelligence Analyst", &[
            "business intelligence",
            "dashboards",
            "data analysis",
            "reporting",
        ]),
        agent("ai-ml-engineer", "AI/ML Engineer", &[
            "machine learning",
            "model training",
            "neural networks",
            "algorithm design",
        ]),
        agent("machine-learning-engineer", "Machine Learning Engineer", &[
            "machine learning",
            "feature engineering",
            "model code",
            "evaluation metrics",
        ]),
        agent("ai-researcher", "AI Researcher", &[
            "ai research",
            "neural architectures",
            "experimental methodology",
            "mathematical analysis",
        ]),
        agent("neural-network-specialist", "Neural Network Specialist", &[
            "neural networks",
            "deep learning",
            "model architecture",
            "training optimization",
        ]),
        agent("computer-vision-expert", "Computer Vision Specialist", &[
            "computer vision",
            "image recognition",
            "model evaluation",
            "neural networks",
        ]),
        agent("nlp-specialist", "NLP Specialist", &[
            "natural language processing",
            "text classification",
            "language models",
            "tokenization",
        ]),
        agent("data-analyst", "Data Analyst", &[
            "data analysis",
            "exploratory statistics",
            "visualization",
            "hypothesis testing",
        ]),
        agent("big-data-engineer", "Big Data Engineer", &[
            "big data",
            "stream processing",
            "distributed storage",
            "partitioning",
        ]),
        agent("etl-developer", "ETL Developer", &[
            "etl code",
            "data transformation",
            "scheduling",
            "data quality",
        ]),
        agent("ai-ethics-researcher", "AI Ethics Researcher", &[
            "ai ethics",
            "bias analysis",
            "model transparency",
            "responsible deployment",
        ]),
        // Business and innovation
        agent("business-analyst", "Business Analyst", &[
            "requirements analysis",
            "process modeling",
            "stakeholder alignment",
            "gap analysis",
        ]),
        agent("product-manager", "Product Manager", &[
            "product strategy",
            "prioritization",
            "user research",
            "roadmapping",
        ]),
        agent("project-manager", "Project Manager", &[
            "project planning",
            "risk tracking",
            "delivery coordination",
            "estimation",
        ]),
        agent("chief-strategy-officer", "Chief Strategy Officer", &[
            "strategic analysis",
            "market positioning",
            "investment planning",
            "business models",
        ]),
        agent("innovation-strategist", "Innovation Strategist", &[
            "innovation analysis",
            "emerging technology",
            "opportunity mapping",
            "trend research",
        ]),
        agent("research-lead", "Research Lead", &[
            "research methodology",
            "literature analysis",
            "experimental design",
            "peer review",
        ]),
        agent("marketing-strategist", "Marketing Strategist", &[
            "marketing strategy",
            "positioning",
            "campaign planning",
            "audience research",
        ]),
        agent("financial-analyst", "Financial Analyst", &[
            "financial analysis",
            "cost modeling",
            "revenue projections",
            "unit economics",
        ]),
        agent("risk-analyst", "Risk Analyst", &[
            "risk analysis",
            "scenario planning",
            "exposure modeling",
            "mitigation planning",
        ]),
        agent("market-research-analyst", "Market Research Analyst", &[
            "market research",
            "competitive analysis",
            "sizing",
            "customer segmentation",
        ]),
        agent("growth-analyst", "Growth Analyst", &[
            "growth analysis",
            "funnel metrics",
            "retention analysis",
            "experimentation",
        ]),
        agent("operations-analyst", "Operations Analyst", &[
            "operations analysis",
            "process efficiency",
            "capacity modeling",
            "cost tracking",
        ]),
    ]
}
