//! Waiter Scorer
//!
//! Availability and priority per waiter. Priority rewards the performance
//! score and penalises live tables and tips already collected this shift,
//! spreading load and revenue across the floor.

use crate::core::RoutingConfig;
use shared::Waiter;

/// Waiter with its computed priority
#[derive(Debug, Clone)]
pub struct ScoredWaiter<'a> {
    pub waiter: &'a Waiter,
    pub priority: f64,
    /// Whether the waiter works the target table's section
    pub in_section: bool,
}

/// Computes waiter availability and priority from the routing weights
#[derive(Debug, Clone, Copy)]
pub struct WaiterScorer<'c> {
    config: &'c RoutingConfig,
}

impl<'c> WaiterScorer<'c> {
    pub fn new(config: &'c RoutingConfig) -> Self {
        Self { config }
    }

    /// On duty and below the live-table cap
    pub fn is_available(&self, waiter: &Waiter) -> bool {
        waiter.is_on_duty() && waiter.live_tables < self.config.max_tables_per_waiter
    }

    /// `t / (t + reference)`: 0 at no tips, 0.5 at the reference total,
    /// strictly increasing and below 1.
    pub fn normalized_tip(&self, tip_total: f64) -> f64 {
        let tip = if tip_total.is_finite() { tip_total.max(0.0) } else { 0.0 };
        let reference = self.config.tip_reference;
        if reference <= 0.0 {
            return if tip > 0.0 { 1.0 } else { 0.0 };
        }
        tip / (tip + reference)
    }

    pub fn priority(&self, waiter: &Waiter) -> f64 {
        self.config.efficiency_weight * waiter.score
            - self.config.workload_penalty * f64::from(waiter.live_tables)
            - self.config.tip_penalty * self.normalized_tip(waiter.current_tip_total)
    }

    /// Available waiters scored once, in input order
    pub fn available<'a>(&self, waiters: &'a [Waiter]) -> Vec<ScoredWaiter<'a>> {
        waiters
            .iter()
            .filter(|w| self.is_available(w))
            .map(|w| ScoredWaiter {
                waiter: w,
                priority: self.priority(w),
                in_section: false,
            })
            .collect()
    }

    /// Candidates for a table in `section`: the available waiters of that
    /// section, or every available waiter when the section has none.
    pub fn candidates_for<'a>(
        &self,
        pool: &[ScoredWaiter<'a>],
        section: &str,
    ) -> Vec<ScoredWaiter<'a>> {
        let local: Vec<ScoredWaiter<'a>> = pool
            .iter()
            .filter(|s| s.waiter.section == section)
            .map(|s| ScoredWaiter {
                in_section: true,
                ..s.clone()
            })
            .collect();
        if local.is_empty() {
            pool.to_vec()
        } else {
            local
        }
    }
}
