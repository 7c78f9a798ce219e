use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::table::{CaseTable, ValueColumn};

/// Error returned when a dropdown reports a value outside its option set.
///
/// The web layer logs this and falls back to the `All` behavior; it is never
/// allowed to take the running server down.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognized selection `{0}`")]
pub struct InvalidSelection(pub String);

/// Case-status dropdown driving the bar chart.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub enum CaseSelection {
    #[default]
    All,
    Hospitalized,
    Recovered,
    Deceased,
}

impl CaseSelection {
    pub const OPTIONS: [CaseSelection; 4] = [
        CaseSelection::All,
        CaseSelection::Hospitalized,
        CaseSelection::Recovered,
        CaseSelection::Deceased,
    ];

    pub fn parse(value: &str) -> Result<Self, InvalidSelection> {
        match value {
            "All" => Ok(CaseSelection::All),
            "Hospitalized" => Ok(CaseSelection::Hospitalized),
            "Recovered" => Ok(CaseSelection::Recovered),
            "Deceased" => Ok(CaseSelection::Deceased),
            other => Err(InvalidSelection(other.to_string())),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CaseSelection::All => "All",
            CaseSelection::Hospitalized => "Hospitalized",
            CaseSelection::Recovered => "Recovered",
            CaseSelection::Deceased => "Deceased",
        }
    }

    /// The table column this selection plots. `All` plots `Total`.
    pub fn column(&self) -> ValueColumn {
        match self {
            CaseSelection::All => ValueColumn::Total,
            CaseSelection::Hospitalized => ValueColumn::Hospitalized,
            CaseSelection::Recovered => ValueColumn::Recovered,
            CaseSelection::Deceased => ValueColumn::Deceased,
        }
    }
}

/// Supply dropdown driving the line chart.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub enum SupplySelection {
    #[default]
    All,
    Mask,
    Sanitizer,
    Oxygen,
}

impl SupplySelection {
    pub const OPTIONS: [SupplySelection; 4] = [
        SupplySelection::All,
        SupplySelection::Mask,
        SupplySelection::Sanitizer,
        SupplySelection::Oxygen,
    ];

    pub fn parse(value: &str) -> Result<Self, InvalidSelection> {
        match value {
            "All" => Ok(SupplySelection::All),
            "Mask" => Ok(SupplySelection::Mask),
            "Sanitizer" => Ok(SupplySelection::Sanitizer),
            "Oxygen" => Ok(SupplySelection::Oxygen),
            other => Err(InvalidSelection(other.to_string())),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SupplySelection::All => "All",
            SupplySelection::Mask => "Mask",
            SupplySelection::Sanitizer => "Sanitizer",
            SupplySelection::Oxygen => "Oxygen",
        }
    }

    pub fn column(&self) -> ValueColumn {
        match self {
            SupplySelection::All => ValueColumn::Total,
            SupplySelection::Mask => ValueColumn::Mask,
            SupplySelection::Sanitizer => ValueColumn::Sanitizer,
            SupplySelection::Oxygen => ValueColumn::Oxygen,
        }
    }
}

/// Zone dropdown wired to the pie chart.
///
/// The pie handler accepts this value but does not use it: the pie always
/// shows the full per-status breakdown. The dropdown is kept so the chart is
/// wired like the other two.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub enum ZoneSelection {
    #[default]
    All,
    RedZone,
    BlueZone,
    GreenZone,
    OrangeZone,
}

impl ZoneSelection {
    pub const OPTIONS: [ZoneSelection; 5] = [
        ZoneSelection::All,
        ZoneSelection::RedZone,
        ZoneSelection::BlueZone,
        ZoneSelection::GreenZone,
        ZoneSelection::OrangeZone,
    ];

    pub fn parse(value: &str) -> Result<Self, InvalidSelection> {
        match value {
            "All" => Ok(ZoneSelection::All),
            "Red Zone" => Ok(ZoneSelection::RedZone),
            "Blue Zone" => Ok(ZoneSelection::BlueZone),
            "Green Zone" => Ok(ZoneSelection::GreenZone),
            "Orange Zone" => Ok(ZoneSelection::OrangeZone),
            other => Err(InvalidSelection(other.to_string())),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ZoneSelection::All => "All",
            ZoneSelection::RedZone => "Red Zone",
            ZoneSelection::BlueZone => "Blue Zone",
            ZoneSelection::GreenZone => "Green Zone",
            ZoneSelection::OrangeZone => "Orange Zone",
        }
    }
}

/// Chart shapes the dashboard can render.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Bar chart - one bar per table row, State on the x-axis
    Bar,
    /// Line chart - one point per table row, Status on the x-axis
    Line,
    /// Pie chart - one slice per distinct Status
    Pie,
}

/// One labeled value in a chart series: an x/y pair for bar and line
/// charts, a category/value pair for the pie chart.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct SeriesPoint {
    pub label: String,
    pub value: i64,
}

/// The abstract description of a chart, independent of how it is drawn.
///
/// Recomputed from scratch on every invocation; a spec is a pure function of
/// (selection, table) and nothing accumulates across updates.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<SeriesPoint>,
}

/// Builds the bar chart of the selected case column per state.
///
/// One point per table row, in row order: label = `State`, value = the
/// column named by the selection (`Total` when the selection is `All`).
pub fn bar_chart(table: &CaseTable, selection: CaseSelection) -> ChartSpec {
    let column = selection.column();
    ChartSpec {
        kind: ChartKind::Bar,
        title: format!("Total count of {} cases per State", selection.label()),
        x_label: "State".to_string(),
        y_label: column.name().to_string(),
        points: table
            .records()
            .iter()
            .map(|record| SeriesPoint {
                label: record.state.clone(),
                value: column.value(record),
            })
            .collect(),
    }
}

/// Builds the line chart of the selected supply column against status.
///
/// One point per table row, in row order: label = `Status`, value = the
/// column named by the selection (`Total` when the selection is `All`).
pub fn line_chart(table: &CaseTable, selection: SupplySelection) -> ChartSpec {
    let column = selection.column();
    ChartSpec {
        kind: ChartKind::Line,
        title: format!("Total count of {} supplies per Status", selection.label()),
        x_label: "Status".to_string(),
        y_label: column.name().to_string(),
        points: table
            .records()
            .iter()
            .map(|record| SeriesPoint {
                label: record.status.clone(),
                value: column.value(record),
            })
            .collect(),
    }
}

/// Builds the pie chart of row counts per distinct status.
///
/// The zone selection is accepted but does not constrain the output: the pie
/// always shows the full breakdown, whatever the dropdown says.
pub fn pie_chart(table: &CaseTable, _selection: ZoneSelection) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Pie,
        title: "Case count per Status".to_string(),
        x_label: "Status".to_string(),
        y_label: "Cases".to_string(),
        points: table
            .status_counts()
            .into_iter()
            .map(|(status, count)| SeriesPoint {
                label: status,
                value: count as i64,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CaseRecord;

    fn sample_table() -> CaseTable {
        CaseTable::new(vec![
            CaseRecord {
                state: "Kerala".to_string(),
                status: "Confirmed".to_string(),
                total: 10,
                hospitalized: 4,
                recovered: 3,
                deceased: 1,
                mask: 100,
                sanitizer: 50,
                oxygen: 5,
            },
            CaseRecord {
                state: "Goa".to_string(),
                status: "Recovered".to_string(),
                total: 5,
                hospitalized: 1,
                recovered: 4,
                deceased: 0,
                mask: 40,
                sanitizer: 20,
                oxygen: 2,
            },
            CaseRecord {
                state: "Delhi".to_string(),
                status: "Confirmed".to_string(),
                total: 8,
                hospitalized: 2,
                recovered: 1,
                deceased: 2,
                mask: 60,
                sanitizer: 30,
                oxygen: 4,
            },
        ])
    }

    #[test]
    fn bar_chart_tracks_state_column_for_every_selection() {
        let table = sample_table();
        for selection in CaseSelection::OPTIONS {
            let spec = bar_chart(&table, selection);
            assert_eq!(spec.kind, ChartKind::Bar);
            let labels: Vec<&str> = spec.points.iter().map(|p| p.label.as_str()).collect();
            assert_eq!(labels, ["Kerala", "Goa", "Delhi"]);
            let values: Vec<i64> = spec.points.iter().map(|p| p.value).collect();
            assert_eq!(values, table.column(selection.column()));
            assert!(spec.title.contains(selection.label()));
        }
    }

    #[test]
    fn line_chart_tracks_status_column_for_every_selection() {
        let table = sample_table();
        for selection in SupplySelection::OPTIONS {
            let spec = line_chart(&table, selection);
            assert_eq!(spec.kind, ChartKind::Line);
            let labels: Vec<&str> = spec.points.iter().map(|p| p.label.as_str()).collect();
            assert_eq!(labels, ["Confirmed", "Recovered", "Confirmed"]);
            let values: Vec<i64> = spec.points.iter().map(|p| p.value).collect();
            assert_eq!(values, table.column(selection.column()));
        }
    }

    #[test]
    fn pie_chart_ignores_its_selection() {
        let table = sample_table();
        let baseline = pie_chart(&table, ZoneSelection::All);
        for selection in ZoneSelection::OPTIONS {
            assert_eq!(pie_chart(&table, selection), baseline);
        }
        let points: Vec<(&str, i64)> = baseline
            .points
            .iter()
            .map(|p| (p.label.as_str(), p.value))
            .collect();
        assert_eq!(points, [("Confirmed", 2), ("Recovered", 1)]);
    }

    #[test]
    fn bar_chart_matches_the_two_row_example() {
        let table = CaseTable::new(vec![
            CaseRecord {
                state: "A".to_string(),
                status: "Confirmed".to_string(),
                total: 10,
                hospitalized: 0,
                recovered: 0,
                deceased: 0,
                mask: 0,
                sanitizer: 0,
                oxygen: 0,
            },
            CaseRecord {
                state: "B".to_string(),
                status: "Recovered".to_string(),
                total: 5,
                hospitalized: 0,
                recovered: 0,
                deceased: 0,
                mask: 0,
                sanitizer: 0,
                oxygen: 0,
            },
        ]);
        let spec = bar_chart(&table, CaseSelection::All);
        let points: Vec<(&str, i64)> = spec
            .points
            .iter()
            .map(|p| (p.label.as_str(), p.value))
            .collect();
        assert_eq!(points, [("A", 10), ("B", 5)]);
    }

    #[test]
    fn selection_labels_round_trip() {
        for selection in CaseSelection::OPTIONS {
            assert_eq!(CaseSelection::parse(selection.label()), Ok(selection));
        }
        for selection in SupplySelection::OPTIONS {
            assert_eq!(SupplySelection::parse(selection.label()), Ok(selection));
        }
        for selection in ZoneSelection::OPTIONS {
            assert_eq!(ZoneSelection::parse(selection.label()), Ok(selection));
        }
        assert_eq!(
            CaseSelection::parse("Migrated"),
            Err(InvalidSelection("Migrated".to_string()))
        );
    }

    #[test]
    fn empty_table_yields_empty_specs() {
        let table = CaseTable::default();
        assert!(bar_chart(&table, CaseSelection::All).points.is_empty());
        assert!(line_chart(&table, SupplySelection::All).points.is_empty());
        assert!(pie_chart(&table, ZoneSelection::All).points.is_empty());
    }
}
