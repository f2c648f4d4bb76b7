//! Process-wide provider rate limiting
//!
//! Counters are shared by every session in the process and guarded by a
//! std `Mutex` held only for short, non-await sections. Exceeding the
//! per-minute budget tells the caller how long to sleep; exceeding the
//! per-day budget is terminal for that provider until the window rolls.

use super::ProviderKind;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, OnceLock};
use std::time::Duration;
// The tokio clock, not std: windows then follow a paused test clock.
use tokio::time::Instant;

const MINUTE: Duration = Duration::from_secs(60);
const DAY: Duration = Duration::from_secs(60 * 60 * 24);

/// Per-provider request budgets
#[derive(Debug, Clone, Copy)]
pub struct RateLimits {
    pub requests_per_minute: u32,
    pub requests_per_day: u32,
}

impl Default for RateLimits {
    fn default() -> Self {
        Self {
            requests_per_minute: 20,
            requests_per_day: 1000,
        }
    }
}

/// Outcome of asking for one request slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    /// Slot granted and recorded
    Proceed,
    /// Minute budget spent; retry after this long
    Wait(Duration),
    /// Day budget spent; the provider is done for today
    DayExhausted,
}

#[derive(Default)]
struct ProviderWindow {
    minute: VecDeque<Instant>,
    day_started: Option<Instant>,
    day_count: u32,
}

fn counters() -> &'static Mutex<HashMap<ProviderKind, ProviderWindow>> {
    static COUNTERS: OnceLock<Mutex<HashMap<ProviderKind, ProviderWindow>>> = OnceLock::new();
    COUNTERS.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Ask for a request slot for `kind` under `limits`.
///
/// On `Proceed` the request is already counted; the other outcomes record
/// nothing.
pub fn acquire(kind: ProviderKind, limits: RateLimits) -> RateDecision {
    let now = Instant::now();
    let Ok(mut map) = counters().lock() else {
        return RateDecision::Proceed;
    };
    let window = map.entry(kind).or_default();

    // Roll the day window
    match window.day_started {
        Some(start) if now.duration_since(start) >= DAY => {
            window.day_started = Some(now);
            window.day_count = 0;
        }
        Some(_) => {}
        None => window.day_started = Some(now),
    }
    if window.day_count >= limits.requests_per_day {
        return RateDecision::DayExhausted;
    }

    // Slide the minute window
    while let Some(oldest) = window.minute.front() {
        if now.duration_since(*oldest) >= MINUTE {
            window.minute.pop_front();
        } else {
            break;
        }
    }
    if window.minute.len() >= limits.requests_per_minute as usize {
        let oldest = window.minute.front().copied().unwrap_or(now);
        let wait = MINUTE.saturating_sub(now.duration_since(oldest));
        return RateDecision::Wait(wait.max(Duration::from_millis(50)));
    }

    window.minute.push_back(now);
    window.day_count += 1;
    RateDecision::Proceed
}

/// Requests recorded today for a provider.
pub fn requests_today(kind: ProviderKind) -> u32 {
    counters()
        .lock()
        .map(|map| map.get(&kind).map(|w| w.day_count).unwrap_or(0))
        .unwrap_or(0)
}

/// Clear all counters. Tests share the process-wide singleton, so each
/// test touching the limiter starts by calling this.
pub fn reset_for_tests() {
    if let Ok(mut map) = counters().lock() {
        map.clear();
    }
}

/// Serializes tests that touch the shared counters. Parallel test threads
/// would otherwise interleave acquire/reset calls.
#[cfg(test)]
pub(crate) fn serial_guard() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: Mutex<()> = Mutex::new(());
    LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    // The singleton is process-wide; keep limiter assertions in one test so
    // parallel test threads cannot interleave counter state.
    #[test]
    fn test_budgets_enforced_in_order() {
        let _serial = serial_guard();
        reset_for_tests();
        let limits = RateLimits {
            requests_per_minute: 2,
            requests_per_day: 3,
        };

        assert_eq!(acquire(ProviderKind::Claude, limits), RateDecision::Proceed);
        assert_eq!(acquire(ProviderKind::Claude, limits), RateDecision::Proceed);
        // Minute budget spent
        assert!(matches!(
            acquire(ProviderKind::Claude, limits),
            RateDecision::Wait(_)
        ));
        // Other providers unaffected
        assert_eq!(acquire(ProviderKind::Gemini, limits), RateDecision::Proceed);
        assert_eq!(requests_today(ProviderKind::Claude), 2);

        reset_for_tests();
        let tight = RateLimits {
            requests_per_minute: 10,
            requests_per_day: 1,
        };
        assert_eq!(acquire(ProviderKind::Claude, tight), RateDecision::Proceed);
        assert_eq!(
            acquire(ProviderKind::Claude, tight),
            RateDecision::DayExhausted
        );

        reset_for_tests();
    }
}
