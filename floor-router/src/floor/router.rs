//! Routing query
//!
//! Pure function of (snapshot, request, config). Nothing here writes.

use super::filter::TableFilter;
use super::ranker::PairRanker;
use crate::core::RoutingConfig;
use shared::{FloorSnapshot, PartyRequest, RoutingOption, RoutingResponse};

/// Rank options for a party.
///
/// With a known party size this is the top `top_n` pairs overall. Without
/// one, each configured bracket contributes its single best pair, in
/// bracket order; brackets with nothing available are skipped.
pub fn route(
    snapshot: &FloorSnapshot,
    request: &PartyRequest,
    config: &RoutingConfig,
) -> RoutingResponse {
    let options = match request.party_size {
        Some(party_size) => route_sized(snapshot, request, party_size, config),
        None => route_brackets(snapshot, request, config),
    };

    tracing::debug!(
        group_id = %request.group_id,
        party_size = ?request.party_size,
        version = snapshot.version,
        options = options.len(),
        "Routing computed"
    );

    RoutingResponse::new(request.group_id.clone(), snapshot.version, options)
}

fn route_sized(
    snapshot: &FloorSnapshot,
    request: &PartyRequest,
    party_size: u32,
    config: &RoutingConfig,
) -> Vec<RoutingOption> {
    let filter = TableFilter::new(config.capacity_slack);
    let tables = filter.eligible(&snapshot.tables, party_size, request.table_preference);
    PairRanker::new(config)
        .rank(&tables, &snapshot.waiters, party_size, request.table_preference)
        .into_iter()
        .take(config.top_n)
        .enumerate()
        .map(|(i, pair)| pair.into_option(i + 1, None))
        .collect()
}

fn route_brackets(
    snapshot: &FloorSnapshot,
    request: &PartyRequest,
    config: &RoutingConfig,
) -> Vec<RoutingOption> {
    let filter = TableFilter::new(config.capacity_slack);
    let ranker = PairRanker::new(config);

    let mut options = Vec::with_capacity(config.size_brackets.len());
    for bracket in &config.size_brackets {
        let tables = filter.bracket_tables(&snapshot.tables, bracket, request.table_preference);
        let best = ranker
            .rank(&tables, &snapshot.waiters, bracket.min, request.table_preference)
            .into_iter()
            .next();
        match best {
            Some(pair) => {
                let rank = options.len() + 1;
                options.push(pair.into_option(rank, Some(bracket.name.as_str())));
            }
            None => tracing::debug!(bracket = %bracket.name, "No availability in bracket"),
        }
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{RoutingStatus, Table, TableState, TableType, Waiter};

    fn snapshot() -> FloorSnapshot {
        let mut snapshot = FloorSnapshot {
            version: 4,
            ..Default::default()
        };
        for (id, section, ty, cap) in [
            ("T1", "A", TableType::Bar, 2),
            ("T2", "A", TableType::Booth, 4),
            ("T3", "B", TableType::Regular, 4),
            ("T4", "B", TableType::Window, 6),
        ] {
            let mut t = Table::new(id, section, ty, cap);
            t.state = TableState::Clean;
            snapshot.tables.push(t);
        }
        snapshot.waiters.push(Waiter::new("W1", "Ana", 8.0, "A"));
        snapshot.waiters.push(Waiter::new("W2", "Bo", 7.0, "B"));
        snapshot
    }

    #[test]
    fn test_sized_route_returns_top_n() {
        let mut config = RoutingConfig::default();
        config.top_n = 2;
        let resp = route(&snapshot(), &PartyRequest::new("g-1", Some(4)), &config);

        assert_eq!(resp.status, RoutingStatus::Ok);
        assert_eq!(resp.snapshot_version, 4);
        assert_eq!(resp.options.len(), 2);
        assert_eq!(resp.options[0].rank, 1);
        assert_eq!(resp.options[1].rank, 2);
        // T2 with W1: 4 + 8 beats T3 with W2: 4 + 7
        assert_eq!(resp.options[0].table_id, "T2");
        assert_eq!(resp.options[0].waiter_id, "W1");
        assert_eq!(resp.options[0].score, 12.0);
        assert!(resp.options.iter().all(|o| o.bracket.is_none()));
    }

    #[test]
    fn test_unknown_size_returns_one_per_bracket() {
        let config = RoutingConfig::default();
        let resp = route(&snapshot(), &PartyRequest::new("g-2", None), &config);

        let brackets: Vec<&str> = resp
            .options
            .iter()
            .map(|o| o.bracket.as_deref().unwrap())
            .collect();
        assert_eq!(brackets, vec!["Small", "Medium", "Large"]);
        assert_eq!(resp.options[0].table_id, "T1");
        assert_eq!(resp.options[1].table_id, "T2");
        assert_eq!(resp.options[2].table_id, "T4");
        let ranks: Vec<usize> = resp.options.iter().map(|o| o.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_floor_is_no_availability() {
        let config = RoutingConfig::default();
        let resp = route(
            &FloorSnapshot::default(),
            &PartyRequest::new("g-3", Some(2)),
            &config,
        );
        assert_eq!(resp.status, RoutingStatus::NoAvailability);
        assert!(resp.options.is_empty());
    }
}
