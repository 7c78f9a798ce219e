use serde::{Deserialize, Serialize};

/// Status label counted as an active case.
pub const STATUS_CONFIRMED: &str = "Confirmed";
/// Status label counted as a recovered case.
pub const STATUS_RECOVERED: &str = "Recovered";
/// Status label counted as a death.
pub const STATUS_DECEASED: &str = "Deceased";

/// Header names the loader requires, in schema order.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "State",
    "Status",
    "Total",
    "Hospitalized",
    "Recovered",
    "Deceased",
    "Mask",
    "Sanitizer",
    "Oxygen",
];

/// One row of the loaded spreadsheet: a state-level status entry with its
/// outcome and supply counts.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct CaseRecord {
    pub state: String,
    pub status: String,
    pub total: i64,
    pub hospitalized: i64,
    pub recovered: i64,
    pub deceased: i64,
    pub mask: i64,
    pub sanitizer: i64,
    pub oxygen: i64,
}

/// The numeric columns a chart can plot.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum ValueColumn {
    Total,
    Hospitalized,
    Recovered,
    Deceased,
    Mask,
    Sanitizer,
    Oxygen,
}

impl ValueColumn {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Total" => Some(ValueColumn::Total),
            "Hospitalized" => Some(ValueColumn::Hospitalized),
            "Recovered" => Some(ValueColumn::Recovered),
            "Deceased" => Some(ValueColumn::Deceased),
            "Mask" => Some(ValueColumn::Mask),
            "Sanitizer" => Some(ValueColumn::Sanitizer),
            "Oxygen" => Some(ValueColumn::Oxygen),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ValueColumn::Total => "Total",
            ValueColumn::Hospitalized => "Hospitalized",
            ValueColumn::Recovered => "Recovered",
            ValueColumn::Deceased => "Deceased",
            ValueColumn::Mask => "Mask",
            ValueColumn::Sanitizer => "Sanitizer",
            ValueColumn::Oxygen => "Oxygen",
        }
    }

    /// The value this column holds in `record`.
    pub fn value(&self, record: &CaseRecord) -> i64 {
        match self {
            ValueColumn::Total => record.total,
            ValueColumn::Hospitalized => record.hospitalized,
            ValueColumn::Recovered => record.recovered,
            ValueColumn::Deceased => record.deceased,
            ValueColumn::Mask => record.mask,
            ValueColumn::Sanitizer => record.sanitizer,
            ValueColumn::Oxygen => record.oxygen,
        }
    }
}

/// The case record table: an ordered, immutable sequence of rows.
///
/// Loaded once at startup and shared read-only for the lifetime of the
/// process. No row is ever added, removed, or edited after load.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct CaseTable {
    records: Vec<CaseRecord>,
}

impl CaseTable {
    pub fn new(records: Vec<CaseRecord>) -> Self {
        CaseTable { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    /// Projects one numeric column, in row order.
    pub fn column(&self, column: ValueColumn) -> Vec<i64> {
        self.records.iter().map(|r| column.value(r)).collect()
    }

    /// Row count per distinct `Status`, in first-seen row order.
    pub fn status_counts(&self) -> Vec<(String, u64)> {
        let mut counts: Vec<(String, u64)> = Vec::new();
        for record in &self.records {
            match counts.iter_mut().find(|(status, _)| status == &record.status) {
                Some((_, count)) => *count += 1,
                None => counts.push((record.status.clone(), 1)),
            }
        }
        counts
    }

    /// Number of rows whose `Status` equals `status`.
    pub fn count_status(&self, status: &str) -> u64 {
        self.records.iter().filter(|r| r.status == status).count() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(state: &str, status: &str, total: i64) -> CaseRecord {
        CaseRecord {
            state: state.to_string(),
            status: status.to_string(),
            total,
            hospitalized: 0,
            recovered: 0,
            deceased: 0,
            mask: 0,
            sanitizer: 0,
            oxygen: 0,
        }
    }

    #[test]
    fn column_projection_preserves_row_order() {
        let table = CaseTable::new(vec![
            record("A", STATUS_CONFIRMED, 10),
            record("B", STATUS_RECOVERED, 5),
            record("C", STATUS_DECEASED, 7),
        ]);
        assert_eq!(table.column(ValueColumn::Total), vec![10, 5, 7]);
    }

    #[test]
    fn status_counts_in_first_seen_order() {
        let table = CaseTable::new(vec![
            record("A", STATUS_CONFIRMED, 1),
            record("B", STATUS_RECOVERED, 1),
            record("C", STATUS_CONFIRMED, 1),
        ]);
        assert_eq!(
            table.status_counts(),
            vec![
                (STATUS_CONFIRMED.to_string(), 2),
                (STATUS_RECOVERED.to_string(), 1)
            ]
        );
    }

    #[test]
    fn column_names_round_trip() {
        for name in ["Total", "Hospitalized", "Recovered", "Deceased", "Mask", "Sanitizer", "Oxygen"] {
            let column = ValueColumn::from_name(name).unwrap();
            assert_eq!(column.name(), name);
        }
        assert!(ValueColumn::from_name("State").is_none());
    }
}
