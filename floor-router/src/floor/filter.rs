//! Table Filter
//!
//! Narrows the floor to tables a party can be seated at. Tables linked to a
//! group are never candidates, whatever the classifier says about them.

use shared::{Table, TableType};
use std::fmt;

/// Party-size bracket used when the head count is unknown (人数档位)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeBracket {
    pub name: String,
    pub min: u32,
    pub max: u32,
}

/// Error parsing a `Name:min-max,...` bracket list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketParseError(String);

impl fmt::Display for BracketParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for BracketParseError {}

impl SizeBracket {
    pub fn new(name: impl Into<String>, min: u32, max: u32) -> Self {
        Self {
            name: name.into(),
            min,
            max,
        }
    }

    /// Small 1-2, Medium 3-4, Large 5-8
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("Small", 1, 2),
            Self::new("Medium", 3, 4),
            Self::new("Large", 5, 8),
        ]
    }

    pub fn contains(&self, capacity: u32) -> bool {
        (self.min..=self.max).contains(&capacity)
    }

    /// Parse `Small:1-2,Medium:3-4,Large:5-8`
    pub fn parse_list(list: &str) -> Result<Vec<Self>, BracketParseError> {
        let mut brackets = Vec::new();
        for part in list.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (name, range) = part
                .split_once(':')
                .ok_or_else(|| BracketParseError(format!("missing ':' in {part:?}")))?;
            let (min, max) = range
                .split_once('-')
                .ok_or_else(|| BracketParseError(format!("missing '-' in {part:?}")))?;
            let min: u32 = min
                .trim()
                .parse()
                .map_err(|_| BracketParseError(format!("bad minimum in {part:?}")))?;
            let max: u32 = max
                .trim()
                .parse()
                .map_err(|_| BracketParseError(format!("bad maximum in {part:?}")))?;
            if name.trim().is_empty() || min == 0 || min > max {
                return Err(BracketParseError(format!("invalid bracket {part:?}")));
            }
            brackets.push(Self::new(name.trim(), min, max));
        }
        if brackets.is_empty() {
            return Err(BracketParseError("no brackets given".into()));
        }
        Ok(brackets)
    }
}

/// Selects eligible tables for a known party size or a size bracket
#[derive(Debug, Clone, Copy)]
pub struct TableFilter {
    capacity_slack: Option<u32>,
}

impl TableFilter {
    pub fn new(capacity_slack: Option<u32>) -> Self {
        Self { capacity_slack }
    }

    /// Clean, unlinked tables that seat `party_size`.
    ///
    /// The tight band `capacity <= party_size + slack` is tried first; an
    /// empty band falls back to every table large enough. A preference that
    /// matches nothing is dropped. Result is ordered by capacity, then id.
    pub fn eligible<'a>(
        &self,
        tables: &'a [Table],
        party_size: u32,
        preference: Option<TableType>,
    ) -> Vec<&'a Table> {
        let fits: Vec<&Table> = tables
            .iter()
            .filter(|t| t.is_seatable() && t.capacity >= party_size)
            .collect();

        let sized = match self.capacity_slack {
            Some(slack) => {
                let limit = party_size.saturating_add(slack);
                let band: Vec<&Table> =
                    fits.iter().copied().filter(|t| t.capacity <= limit).collect();
                if band.is_empty() { fits } else { band }
            }
            None => fits,
        };

        let mut result = apply_preference(sized, preference);
        sort_tables(&mut result);
        result
    }

    /// Clean, unlinked tables whose capacity falls inside the bracket
    pub fn bracket_tables<'a>(
        &self,
        tables: &'a [Table],
        bracket: &SizeBracket,
        preference: Option<TableType>,
    ) -> Vec<&'a Table> {
        let inside: Vec<&Table> = tables
            .iter()
            .filter(|t| t.is_seatable() && bracket.contains(t.capacity))
            .collect();
        let mut result = apply_preference(inside, preference);
        sort_tables(&mut result);
        result
    }
}

fn apply_preference(tables: Vec<&Table>, preference: Option<TableType>) -> Vec<&Table> {
    let Some(wanted) = preference else {
        return tables;
    };
    let matching: Vec<&Table> = tables
        .iter()
        .copied()
        .filter(|t| t.table_type == wanted)
        .collect();
    if matching.is_empty() {
        tracing::debug!(preference = %wanted, "No table matches preference, ignoring it");
        tables
    } else {
        matching
    }
}

fn sort_tables(tables: &mut [&Table]) {
    tables.sort_by(|a, b| {
        a.capacity
            .cmp(&b.capacity)
            .then_with(|| a.table_id.cmp(&b.table_id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::TableState;

    fn table(id: &str, ty: TableType, capacity: u32, state: TableState) -> Table {
        let mut t = Table::new(id, "A", ty, capacity);
        t.state = state;
        t.state_confidence = 0.9;
        t
    }

    fn ids(tables: &[&Table]) -> Vec<String> {
        tables.iter().map(|t| t.table_id.clone()).collect()
    }

    fn floor() -> Vec<Table> {
        vec![
            table("T1", TableType::Bar, 2, TableState::Clean),
            table("T2", TableType::Regular, 4, TableState::Clean),
            table("T3", TableType::Booth, 4, TableState::Dirty),
            table("T4", TableType::Booth, 6, TableState::Clean),
            table("T5", TableType::Window, 8, TableState::Clean),
            table("T6", TableType::Regular, 4, TableState::Unknown),
        ]
    }

    #[test]
    fn test_only_clean_tables_that_fit() {
        let tables = floor();
        let filter = TableFilter::new(None);
        let result = filter.eligible(&tables, 4, None);
        assert_eq!(ids(&result), vec!["T2", "T4", "T5"]);
        assert!(result.iter().all(|t| t.state == TableState::Clean && t.capacity >= 4));
    }

    #[test]
    fn test_band_prefers_tight_tables() {
        let tables = floor();
        let filter = TableFilter::new(Some(2));
        assert_eq!(ids(&filter.eligible(&tables, 4, None)), vec!["T2", "T4"]);
        assert_eq!(ids(&filter.eligible(&tables, 2, None)), vec!["T1", "T2"]);
    }

    #[test]
    fn test_empty_band_falls_back_to_larger_tables() {
        let tables = vec![
            table("T1", TableType::Regular, 8, TableState::Clean),
            table("T2", TableType::Regular, 2, TableState::Clean),
        ];
        let filter = TableFilter::new(Some(1));
        assert_eq!(ids(&filter.eligible(&tables, 3, None)), vec!["T1"]);
    }

    #[test]
    fn test_preference_restricts_then_falls_back() {
        let tables = floor();
        let filter = TableFilter::new(None);
        assert_eq!(
            ids(&filter.eligible(&tables, 4, Some(TableType::Booth))),
            vec!["T4"]
        );
        // no clean bar seats 4
        assert_eq!(
            ids(&filter.eligible(&tables, 4, Some(TableType::Bar))),
            vec!["T2", "T4", "T5"]
        );
    }

    #[test]
    fn test_linked_tables_are_skipped() {
        let mut tables = floor();
        tables[1].current_group_id = Some("g-1".into());
        let result = TableFilter::new(None).eligible(&tables, 4, None);
        assert_eq!(ids(&result), vec!["T4", "T5"]);
    }

    #[test]
    fn test_nothing_fits_is_empty_not_error() {
        let tables = floor();
        assert!(TableFilter::new(Some(2)).eligible(&tables, 12, None).is_empty());
    }

    #[test]
    fn test_bracket_tables() {
        let tables = floor();
        let filter = TableFilter::new(Some(2));
        let brackets = SizeBracket::defaults();
        assert_eq!(ids(&filter.bracket_tables(&tables, &brackets[0], None)), vec!["T1"]);
        assert_eq!(ids(&filter.bracket_tables(&tables, &brackets[1], None)), vec!["T2"]);
        assert_eq!(
            ids(&filter.bracket_tables(&tables, &brackets[2], None)),
            vec!["T4", "T5"]
        );
    }

    #[test]
    fn test_parse_bracket_list() {
        let parsed = SizeBracket::parse_list("Duo:1-2, Family:3-6").unwrap();
        assert_eq!(
            parsed,
            vec![SizeBracket::new("Duo", 1, 2), SizeBracket::new("Family", 3, 6)]
        );

        assert!(SizeBracket::parse_list("").is_err());
        assert!(SizeBracket::parse_list("Small:2").is_err());
        assert!(SizeBracket::parse_list("Small:4-2").is_err());
        assert!(SizeBracket::parse_list("Small:0-2").is_err());
        assert!(SizeBracket::parse_list(":1-2").is_err());
    }
}
