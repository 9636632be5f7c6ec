//! Pair Generator & Ranker
//!
//! Cross-joins eligible tables with their candidate waiters, scores every
//! pair and orders them deterministically.

use super::scorer::{ScoredWaiter, WaiterScorer};
use crate::core::RoutingConfig;
use shared::{RoutingOption, Table, TableType, Waiter};
use std::cmp::Ordering;

/// One scored (table, waiter) pair before ranking is assigned
#[derive(Debug, Clone)]
pub struct ScoredPair<'a> {
    pub table: &'a Table,
    pub waiter: &'a Waiter,
    pub table_fit: f64,
    pub waiter_priority: f64,
    pub score: f64,
}

impl ScoredPair<'_> {
    pub fn into_option(self, rank: usize, bracket: Option<&str>) -> RoutingOption {
        RoutingOption {
            rank,
            table_id: self.table.table_id.clone(),
            waiter_id: self.waiter.id.clone(),
            score: self.score,
            section: self.table.section.clone(),
            capacity: self.table.capacity,
            table_fit: self.table_fit,
            waiter_priority: self.waiter_priority,
            bracket: bracket.map(str::to_string),
        }
    }
}

/// Descending score, then table_id, then waiter_id
pub fn compare_pairs(a: &ScoredPair<'_>, b: &ScoredPair<'_>) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.table.table_id.cmp(&b.table.table_id))
        .then_with(|| a.waiter.id.cmp(&b.waiter.id))
}

pub struct PairRanker<'c> {
    config: &'c RoutingConfig,
    scorer: WaiterScorer<'c>,
}

impl<'c> PairRanker<'c> {
    pub fn new(config: &'c RoutingConfig) -> Self {
        Self {
            config,
            scorer: WaiterScorer::new(config),
        }
    }

    /// `FIT_WEIGHT / (1 + wasted seats)`, plus the preference bonus on a
    /// type match
    pub fn table_fit_score(
        &self,
        table: &Table,
        party_size: u32,
        preference: Option<TableType>,
    ) -> f64 {
        let waste = table.capacity.saturating_sub(party_size);
        let mut fit = self.config.fit_weight / (1.0 + f64::from(waste));
        if preference == Some(table.table_type) {
            fit += self.config.preference_bonus;
        }
        fit
    }

    /// Every (table, candidate waiter) pair, sorted best first
    pub fn rank<'a>(
        &self,
        tables: &[&'a Table],
        waiters: &'a [Waiter],
        party_size: u32,
        preference: Option<TableType>,
    ) -> Vec<ScoredPair<'a>> {
        let pool = self.scorer.available(waiters);
        if pool.is_empty() {
            return Vec::new();
        }

        let mut pairs = Vec::new();
        for &table in tables {
            let table_fit = self.table_fit_score(table, party_size, preference);
            for ScoredWaiter {
                waiter, priority, ..
            } in self.scorer.candidates_for(&pool, &table.section)
            {
                pairs.push(ScoredPair {
                    table,
                    waiter,
                    table_fit,
                    waiter_priority: priority,
                    score: table_fit + priority,
                });
            }
        }

        pairs.sort_by(compare_pairs);
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::TableState;

    fn clean(id: &str, section: &str, ty: TableType, capacity: u32) -> Table {
        let mut t = Table::new(id, section, ty, capacity);
        t.state = TableState::Clean;
        t
    }

    #[test]
    fn test_fit_score() {
        let config = RoutingConfig::default();
        let ranker = PairRanker::new(&config);
        let booth = clean("T1", "A", TableType::Booth, 6);

        assert_eq!(ranker.table_fit_score(&booth, 6, None), 4.0);
        assert_eq!(ranker.table_fit_score(&booth, 4, None), 4.0 / 3.0);
        assert_eq!(
            ranker.table_fit_score(&booth, 6, Some(TableType::Booth)),
            6.0
        );
        assert_eq!(ranker.table_fit_score(&booth, 6, Some(TableType::Bar)), 4.0);
    }

    #[test]
    fn test_rank_orders_by_score_then_ids() {
        let config = RoutingConfig::default();
        let ranker = PairRanker::new(&config);
        let tables = vec![
            clean("T2", "A", TableType::Regular, 4),
            clean("T1", "A", TableType::Regular, 4),
        ];
        let refs: Vec<&Table> = tables.iter().collect();
        let waiters = vec![
            Waiter::new("W2", "B", 8.0, "A"),
            Waiter::new("W1", "A", 8.0, "A"),
        ];

        let ranked = ranker.rank(&refs, &waiters, 4, None);
        let order: Vec<(&str, &str)> = ranked
            .iter()
            .map(|p| (p.table.table_id.as_str(), p.waiter.id.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![("T1", "W1"), ("T1", "W2"), ("T2", "W1"), ("T2", "W2")]
        );
        assert!(ranked.iter().all(|p| p.score == 12.0));
    }

    #[test]
    fn test_rank_uses_section_waiters_first() {
        let config = RoutingConfig::default();
        let ranker = PairRanker::new(&config);
        let tables = vec![clean("T1", "A", TableType::Regular, 2)];
        let refs: Vec<&Table> = tables.iter().collect();
        let waiters = vec![
            Waiter::new("W1", "A", 6.0, "A"),
            Waiter::new("W2", "B", 9.5, "B"),
        ];

        let ranked = ranker.rank(&refs, &waiters, 2, None);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].waiter.id, "W1");
    }

    #[test]
    fn test_rank_without_waiters_is_empty() {
        let config = RoutingConfig::default();
        let ranker = PairRanker::new(&config);
        let tables = vec![clean("T1", "A", TableType::Regular, 2)];
        let refs: Vec<&Table> = tables.iter().collect();
        let mut waiters = vec![Waiter::new("W1", "A", 6.0, "A")];
        waiters[0].live_tables = config.max_tables_per_waiter;

        assert!(ranker.rank(&refs, &waiters, 2, None).is_empty());
    }
}
