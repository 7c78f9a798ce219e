use serde::Serialize;

use crate::table::{CaseTable, STATUS_CONFIRMED, STATUS_DECEASED, STATUS_RECOVERED};

/// The four summary-card counters, computed once at startup.
///
/// These never react to dropdown state; the cards show the same numbers for
/// the lifetime of the process.
#[derive(Clone, Copy, Serialize, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: u64,
    pub active: u64,
    pub recovered: u64,
    pub deaths: u64,
}

/// Counts rows per status label. An empty table yields all zeros.
pub fn summarize(table: &CaseTable) -> Summary {
    Summary {
        total: table.len() as u64,
        active: table.count_status(STATUS_CONFIRMED),
        recovered: table.count_status(STATUS_RECOVERED),
        deaths: table.count_status(STATUS_DECEASED),
    }
}
