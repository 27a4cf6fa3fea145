//! Lookup observability: counts where each translation was served from.
//!
//! Missing keys are a normal outcome handled by the fallback chain, never an
//! error. These counters make catalog gaps measurable anyway: a rising
//! default-fallback or raw-key rate for a language means its catalog is
//! incomplete.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Global lookup metrics singleton.
pub struct LookupMetrics {
    /// Lookups answered from the requested language's catalog
    requested_hits: AtomicUsize,

    /// Lookups that fell back to the default language's catalog
    default_fallbacks: AtomicUsize,

    /// Lookups that fell through to the raw key
    key_fallbacks: AtomicUsize,
}

/// Global metrics instance (initialized lazily)
static METRICS: OnceLock<LookupMetrics> = OnceLock::new();

impl LookupMetrics {
    /// Get the global lookup metrics instance.
    pub fn global() -> &'static LookupMetrics {
        METRICS.get_or_init(|| LookupMetrics {
            requested_hits: AtomicUsize::new(0),
            default_fallbacks: AtomicUsize::new(0),
            key_fallbacks: AtomicUsize::new(0),
        })
    }

    /// Record a lookup served from the requested language.
    pub fn record_requested_hit(&self) {
        self.requested_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup served from the default language's catalog.
    pub fn record_default_fallback(&self) {
        self.default_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup that returned the raw key.
    pub fn record_key_fallback(&self) {
        self.key_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the current requested-language hit count.
    pub fn requested_hits(&self) -> usize {
        self.requested_hits.load(Ordering::Relaxed)
    }

    /// Get the current default-language fallback count.
    pub fn default_fallbacks(&self) -> usize {
        self.default_fallbacks.load(Ordering::Relaxed)
    }

    /// Get the current raw-key fallback count.
    pub fn key_fallbacks(&self) -> usize {
        self.key_fallbacks.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.requested_hits();
        let default_fallbacks = self.default_fallbacks();
        let key_fallbacks = self.key_fallbacks();
        let total = hits + default_fallbacks + key_fallbacks;
        let fallback_rate = if total > 0 {
            ((default_fallbacks + key_fallbacks) as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            requested_hits: hits,
            default_fallbacks,
            key_fallbacks,
            total_lookups: total,
            fallback_rate,
        }
    }

    /// Reset all metrics to zero (useful for testing).
    #[cfg(test)]
    pub fn reset(&self) {
        self.requested_hits.store(0, Ordering::Relaxed);
        self.default_fallbacks.store(0, Ordering::Relaxed);
        self.key_fallbacks.store(0, Ordering::Relaxed);
    }
}

/// Snapshot of lookup metrics, serializable for the metrics endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub requested_hits: usize,
    pub default_fallbacks: usize,
    pub key_fallbacks: usize,
    pub total_lookups: usize,
    pub fallback_rate: f64,
}
