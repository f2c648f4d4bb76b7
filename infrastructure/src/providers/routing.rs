//! Routing gateway: provider preference, fallback, cache and rate limits.
//!
//! The agent-level API is infallible. A query walks the preferred
//! provider's chain (preferred, then its fixed fallback order), skipping
//! disabled or day-exhausted providers and sleeping out per-minute limits;
//! when every provider fails the deterministic offline stub answers.

use super::cache::ResponseCache;
use super::rate_limit::{self, RateDecision, RateLimits};
use super::{stub, ProviderAdapter, ProviderKind};
use crate::config::file_config::FileProvidersConfig;
use async_trait::async_trait;
use roundtable_application::ports::provider_gateway::{
    GatewayError, ProviderGateway, QueryRequest, QueryResponse,
};
use roundtable_domain::prompt::Prompt;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use tracing::{debug, info, warn};

/// Role-substring to preferred-provider table, first match wins
const DEFAULT_ROUTING: [(&str, ProviderKind); 6] = [
    ("architect", ProviderKind::Claude),
    ("lead", ProviderKind::Claude),
    ("developer", ProviderKind::Gemini),
    ("engineer", ProviderKind::Gemini),
    ("security", ProviderKind::OpenRouter),
    ("tester", ProviderKind::OpenRouter),
];

/// Health of one provider as seen from the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderStatus {
    Healthy,
    Disabled,
}

#[derive(Debug, Clone)]
pub struct ProviderHealth {
    pub provider: ProviderKind,
    pub status: ProviderStatus,
    pub details: String,
}

/// Gateway counters for health reporting
#[derive(Debug, Clone, Default)]
pub struct GatewayStats {
    pub cache_entries: usize,
    pub requests_served: HashMap<String, u64>,
}

struct RoutingTable {
    providers: Vec<Arc<dyn ProviderAdapter>>,
    role_routing: Vec<(String, ProviderKind)>,
    default_kind: ProviderKind,
    limits: RateLimits,
}

pub struct RoutingGateway {
    table: RwLock<RoutingTable>,
    cache: ResponseCache,
    served: Mutex<HashMap<String, u64>>,
}

impl RoutingGateway {
    pub fn new(providers: Vec<Arc<dyn ProviderAdapter>>, config: &FileProvidersConfig) -> Self {
        Self {
            table: RwLock::new(Self::build_table(providers, config)),
            cache: ResponseCache::default(),
            served: Mutex::new(HashMap::new()),
        }
    }

    fn build_table(
        providers: Vec<Arc<dyn ProviderAdapter>>,
        config: &FileProvidersConfig,
    ) -> RoutingTable {
        // Config entries take precedence over the built-in role table
        let mut role_routing: Vec<(String, ProviderKind)> = config
            .routing
            .iter()
            .filter_map(|(role, provider)| {
                let kind = parse_kind(provider)?;
                Some((role.to_lowercase(), kind))
            })
            .collect();
        role_routing.extend(
            DEFAULT_ROUTING
                .iter()
                .map(|(role, kind)| (role.to_string(), *kind)),
        );

        RoutingTable {
            providers,
            role_routing,
            default_kind: parse_kind(&config.default).unwrap_or_default(),
            limits: RateLimits {
                requests_per_minute: config.limits.requests_per_minute,
                requests_per_day: config.limits.requests_per_day,
            },
        }
    }

    /// Re-read provider enablement and limits. Existing cached responses
    /// are dropped because a provider change may invalidate them.
    pub fn reconfigure(
        &self,
        providers: Vec<Arc<dyn ProviderAdapter>>,
        config: &FileProvidersConfig,
    ) {
        if let Ok(mut table) = self.table.write() {
            *table = Self::build_table(providers, config);
        }
        self.cache.clear();
        info!("Provider gateway reconfigured");
    }

    pub fn health(&self) -> (Vec<ProviderHealth>, GatewayStats) {
        let health = self
            .table
            .read()
            .map(|table| {
                table
                    .providers
                    .iter()
                    .map(|provider| {
                        if provider.enabled() {
                            ProviderHealth {
                                provider: provider.kind(),
                                status: ProviderStatus::Healthy,
                                details: "configured and reachable".to_string(),
                            }
                        } else {
                            ProviderHealth {
                                provider: provider.kind(),
                                status: ProviderStatus::Disabled,
                                details: "missing binary or credentials".to_string(),
                            }
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        let stats = GatewayStats {
            cache_entries: self.cache.len(),
            requests_served: self
                .served
                .lock()
                .map(|served| served.clone())
                .unwrap_or_default(),
        };
        (health, stats)
    }

    fn preferred_kind(&self, role: &str) -> ProviderKind {
        let lower = role.to_lowercase();
        self.table
            .read()
            .map(|table| {
                table
                    .role_routing
                    .iter()
                    .find(|(marker, _)| lower.contains(marker))
                    .map(|(_, kind)| *kind)
                    .unwrap_or(table.default_kind)
            })
            .unwrap_or_default()
    }

    fn chain_for(&self, preferred: ProviderKind) -> Vec<Arc<dyn ProviderAdapter>> {
        let order = [preferred, preferred.fallback_chain()[0], preferred.fallback_chain()[1]];
        let Ok(table) = self.table.read() else {
            return Vec::new();
        };
        order
            .iter()
            .filter_map(|kind| {
                table
                    .providers
                    .iter()
                    .find(|provider| provider.kind() == *kind)
                    .cloned()
            })
            .collect()
    }

    fn limits(&self) -> RateLimits {
        self.table
            .read()
            .map(|table| table.limits)
            .unwrap_or_default()
    }

    fn record_served(&self, provider: &str) {
        if let Ok(mut served) = self.served.lock() {
            *served.entry(provider.to_string()).or_default() += 1;
        }
    }

    /// Try one provider, honoring its rate budget.
    async fn try_provider(
        &self,
        provider: &dyn ProviderAdapter,
        prompt: &Prompt,
    ) -> Result<String, GatewayError> {
        if !provider.enabled() {
            return Err(GatewayError::ProviderUnavailable(format!(
                "{} is not configured",
                provider.kind()
            )));
        }
        let limits = self.limits();
        loop {
            match rate_limit::acquire(provider.kind(), limits) {
                RateDecision::Proceed => break,
                RateDecision::Wait(delay) => {
                    debug!(provider = provider.kind().as_str(), "Minute budget spent, waiting {delay:?}");
                    tokio::time::sleep(delay).await;
                }
                RateDecision::DayExhausted => {
                    return Err(GatewayError::ProviderRateLimited(format!(
                        "{} daily budget exhausted",
                        provider.kind()
                    )));
                }
            }
        }
        provider.complete(prompt).await
    }

    /// Walk the fallback chain for one prompt.
    async fn complete_with_fallback(
        &self,
        role: &str,
        prompt: &Prompt,
    ) -> Option<(String, ProviderKind)> {
        let preferred = self.preferred_kind(role);
        for provider in self.chain_for(preferred) {
            match self.try_provider(provider.as_ref(), prompt).await {
                Ok(content) => return Some((content, provider.kind())),
                Err(e) => {
                    warn!(provider = provider.kind().as_str(), "Provider failed: {e}");
                }
            }
        }
        None
    }
}

fn parse_kind(name: &str) -> Option<ProviderKind> {
    match name.to_lowercase().as_str() {
        "claude" => Some(ProviderKind::Claude),
        "gemini" => Some(ProviderKind::Gemini),
        "openrouter" => Some(ProviderKind::OpenRouter),
        _ => None,
    }
}

/// Split a batched reply into per-agent sections by `## <name>` headers.
/// Agents without a recognizable section get the whole reply.
fn split_batch_reply(reply: &str, names: &[String]) -> Vec<String> {
    let mut sections: HashMap<&str, String> = HashMap::new();
    let mut current: Option<&str> = None;
    for line in reply.lines() {
        if let Some(header) = line.trim().strip_prefix("##") {
            let header = header.trim().to_lowercase();
            current = names
                .iter()
                .find(|name| header.contains(&name.to_lowercase()))
                .map(String::as_str);
            continue;
        }
        if let Some(name) = current {
            let section = sections.entry(name).or_default();
            section.push_str(line);
            section.push('\n');
        }
    }
    names
        .iter()
        .map(|name| {
            sections
                .get(name.as_str())
                .map(|section| section.trim().to_string())
                .filter(|section| !section.is_empty())
                .unwrap_or_else(|| reply.trim().to_string())
        })
        .collect()
}

#[async_trait]
impl ProviderGateway for RoutingGateway {
    async fn query_agent(&self, request: QueryRequest) -> QueryResponse {
        if let Some((content, provider)) = self.cache.get(&request.agent_id, &request.prompt) {
            debug!(agent = %request.agent_id, "Cache hit");
            return QueryResponse {
                content,
                provider,
                offline: false,
                shared: false,
            };
        }

        match self
            .complete_with_fallback(&request.agent_role, &request.prompt)
            .await
        {
            Some((content, kind)) => {
                self.cache
                    .insert(&request.agent_id, &request.prompt, &content, kind.as_str());
                self.record_served(kind.as_str());
                QueryResponse {
                    content,
                    provider: kind.as_str().to_string(),
                    offline: false,
                    shared: false,
                }
            }
            None => {
                warn!(agent = %request.agent_id, "All providers failed, serving offline stub");
                self.record_served(stub::STUB_PROVIDER);
                QueryResponse {
                    content: stub::respond(&request),
                    provider: stub::STUB_PROVIDER.to_string(),
                    offline: true,
                    shared: false,
                }
            }
        }
    }

    async fn query_batch(&self, prompt: Prompt, requests: Vec<QueryRequest>) -> Vec<QueryResponse> {
        let preferred = requests
            .first()
            .map(|request| self.preferred_kind(&request.agent_role))
            .unwrap_or_default();
        let batcher = self
            .chain_for(preferred)
            .into_iter()
            .find(|provider| provider.enabled() && provider.supports_batch());

        if let Some(provider) = batcher {
            match self.try_provider(provider.as_ref(), &prompt).await {
                Ok(reply) => {
                    self.record_served(provider.kind().as_str());
                    let names: Vec<String> =
                        requests.iter().map(|r| r.agent_name.clone()).collect();
                    let sections = split_batch_reply(&reply, &names);
                    return requests
                        .iter()
                        .zip(sections)
                        .map(|(_, content)| QueryResponse {
                            content,
                            provider: provider.kind().as_str().to_string(),
                            offline: false,
                            shared: true,
                        })
                        .collect();
                }
                Err(e) => {
                    warn!(provider = provider.kind().as_str(), "Batch request failed: {e}");
                }
            }
        }

        // No batch-capable provider: serve the panel individually
        let mut responses = Vec::with_capacity(requests.len());
        for request in requests {
            responses.push(self.query_agent(request).await);
        }
        responses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::Phase;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedProvider {
        kind: ProviderKind,
        enabled: bool,
        batch: bool,
        fail: bool,
        calls: AtomicUsize,
        reply: String,
    }

    impl ScriptedProvider {
        fn ok(kind: ProviderKind, reply: &str) -> Self {
            Self {
                kind,
                enabled: true,
                batch: false,
                fail: false,
                calls: AtomicUsize::new(0),
                reply: reply.to_string(),
            }
        }

        fn failing(kind: ProviderKind) -> Self {
            Self {
                fail: true,
                ..Self::ok(kind, "")
            }
        }

        fn disabled(kind: ProviderKind) -> Self {
            Self {
                enabled: false,
                ..Self::ok(kind, "")
            }
        }
    }

    #[async_trait]
    impl ProviderAdapter for ScriptedProvider {
        fn kind(&self) -> ProviderKind {
            self.kind
        }

        fn enabled(&self) -> bool {
            self.enabled
        }

        fn supports_batch(&self) -> bool {
            self.batch
        }

        async fn complete(&self, _prompt: &Prompt) -> Result<String, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(GatewayError::ProviderError("scripted failure".to_string()))
            } else {
                Ok(self.reply.clone())
            }
        }
    }

    fn request(role: &str) -> QueryRequest {
        QueryRequest {
            agent_id: "lead-architect".to_string(),
            agent_name: "Lead Architect".to_string(),
            agent_role: role.to_string(),
            phase: Phase::Analysis,
            prompt: Prompt {
                system: "s".to_string(),
                user: "review".to_string(),
            },
        }
    }

    fn gateway(providers: Vec<Arc<dyn ProviderAdapter>>) -> RoutingGateway {
        RoutingGateway::new(providers, &FileProvidersConfig::default())
    }

    #[tokio::test]
    async fn test_architect_routes_to_claude() {
        let _serial = rate_limit::serial_guard();
        rate_limit::reset_for_tests();
        let claude = Arc::new(ScriptedProvider::ok(ProviderKind::Claude, "from claude"));
        let gemini = Arc::new(ScriptedProvider::ok(ProviderKind::Gemini, "from gemini"));
        let gw = gateway(vec![claude.clone(), gemini.clone()]);

        let response = gw.query_agent(request("Lead Architect")).await;
        assert_eq!(response.provider, "claude");
        assert_eq!(response.content, "from claude");
        assert_eq!(gemini.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fallback_walks_documented_order() {
        let _serial = rate_limit::serial_guard();
        rate_limit::reset_for_tests();
        let claude = Arc::new(ScriptedProvider::failing(ProviderKind::Claude));
        let gemini = Arc::new(ScriptedProvider::ok(ProviderKind::Gemini, "rescued"));
        let gw = gateway(vec![claude.clone(), gemini.clone()]);

        let response = gw.query_agent(request("Lead Architect")).await;
        assert_eq!(response.provider, "gemini");
        assert!(!response.offline);
        assert_eq!(claude.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_all_failed_serves_offline_stub() {
        let _serial = rate_limit::serial_guard();
        rate_limit::reset_for_tests();
        let providers: Vec<Arc<dyn ProviderAdapter>> = vec![
            Arc::new(ScriptedProvider::failing(ProviderKind::Claude)),
            Arc::new(ScriptedProvider::failing(ProviderKind::Gemini)),
            Arc::new(ScriptedProvider::disabled(ProviderKind::OpenRouter)),
        ];
        let gw = gateway(providers);

        let response = gw.query_agent(request("Lead Architect")).await;
        assert!(response.offline);
        assert_eq!(response.provider, stub::STUB_PROVIDER);
        assert!(!response.content.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_minute_budget_blocks_until_window_resets() {
        let _serial = rate_limit::serial_guard();
        rate_limit::reset_for_tests();
        let claude = Arc::new(ScriptedProvider::ok(ProviderKind::Claude, "answer"));
        let mut config = FileProvidersConfig::default();
        config.limits.requests_per_minute = 1;
        let gw = RoutingGateway::new(vec![claude.clone()], &config);

        // Distinct agent and prompt so the second query cannot hit the cache
        let mut second = request("Lead Architect");
        second.agent_id = "system-architect".to_string();
        second.prompt.user = "review again".to_string();

        let started = tokio::time::Instant::now();
        gw.query_agent(request("Lead Architect")).await;
        assert!(started.elapsed() < std::time::Duration::from_secs(60));

        // Budget spent: the next request sleeps out the minute window
        // instead of being dropped or served early
        let response = gw.query_agent(second).await;
        assert!(started.elapsed() >= std::time::Duration::from_secs(60));
        assert!(!response.offline);
        assert_eq!(claude.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_second_identical_query_is_served_from_cache() {
        let _serial = rate_limit::serial_guard();
        rate_limit::reset_for_tests();
        let claude = Arc::new(ScriptedProvider::ok(ProviderKind::Claude, "cached answer"));
        let gw = gateway(vec![claude.clone()]);

        let first = gw.query_agent(request("Lead Architect")).await;
        let second = gw.query_agent(request("Lead Architect")).await;
        assert_eq!(first.content, second.content);
        assert_eq!(claude.calls.load(Ordering::SeqCst), 1);
        let (_, stats) = gw.health();
        assert_eq!(stats.cache_entries, 1);
    }

    #[tokio::test]
    async fn test_batch_reply_split_by_headers() {
        let _serial = rate_limit::serial_guard();
        rate_limit::reset_for_tests();
        let reply = "## Lead Architect\nArchitecture view.\n## QA Engineer\nQuality view.";
        let mut provider = ScriptedProvider::ok(ProviderKind::Claude, reply);
        provider.batch = true;
        let gw = gateway(vec![Arc::new(provider)]);

        let mut second = request("QA Engineer");
        second.agent_id = "qa-engineer".to_string();
        second.agent_name = "QA Engineer".to_string();
        let batch_prompt = Prompt {
            system: "panel".to_string(),
            user: "panel".to_string(),
        };
        let responses = gw
            .query_batch(batch_prompt, vec![request("Lead Architect"), second])
            .await;
        assert_eq!(responses.len(), 2);
        assert!(responses.iter().all(|r| r.shared));
        assert_eq!(responses[0].content, "Architecture view.");
        assert_eq!(responses[1].content, "Quality view.");
    }

    #[test]
    fn test_unmatched_section_duplicates_whole_reply() {
        let sections = split_batch_reply("no headers at all", &["A".to_string(), "B".to_string()]);
        assert_eq!(sections[0], "no headers at all");
        assert_eq!(sections[0], sections[1]);
    }

    #[tokio::test]
    async fn test_health_reports_disabled_providers() {
        let providers: Vec<Arc<dyn ProviderAdapter>> = vec![
            Arc::new(ScriptedProvider::ok(ProviderKind::Claude, "x")),
            Arc::new(ScriptedProvider::disabled(ProviderKind::Gemini)),
        ];
        let gw = gateway(providers);
        let (health, _) = gw.health();
        assert_eq!(health[0].status, ProviderStatus::Healthy);
        assert_eq!(health[1].status, ProviderStatus::Disabled);
    }
}
