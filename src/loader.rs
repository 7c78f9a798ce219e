use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::table::{CaseRecord, CaseTable, REQUIRED_COLUMNS};

/// Errors raised while loading the case record table.
///
/// All of these are fatal: the loader runs exactly once at startup, before
/// the server binds, and the process exits if it fails.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open data file `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read workbook: {0}")]
    Workbook(#[from] calamine::XlsxError),

    #[error("data file is empty")]
    Empty,

    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("unsupported file extension `{0}`")]
    UnsupportedExtension(String),

    #[error("data file has no extension")]
    MissingExtension,
}

/// Load a case record table from a CSV file
///
/// The first row must be a header containing every column named in
/// [`REQUIRED_COLUMNS`]; any additional columns are ignored. Quoted fields
/// and doubled quotes are unescaped.
///
/// # Arguments
/// * `filepath` - Path to the CSV file to load
///
/// # Returns
/// * `Result<CaseTable, LoadError>` - The loaded table or an error
///
/// # Examples
/// ```no_run
/// use covid_dashboard::loader::from_csv;
///
/// match from_csv("state_wise_daily.csv") {
///     Ok(table) => println!("Loaded {} case records", table.len()),
///     Err(e) => eprintln!("Error loading CSV: {}", e),
/// }
/// ```
pub fn from_csv(filepath: impl AsRef<Path>) -> Result<CaseTable, LoadError> {
    let path = filepath.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let reader = BufReader::new(file);
    let lines: Vec<String> = reader
        .lines()
        .collect::<Result<_, _>>()
        .map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;

    let (header_line, data_lines) = match lines.split_first() {
        Some(split) => split,
        None => return Err(LoadError::Empty),
    };

    let headers = parse_csv_row(header_line);
    let schema = Schema::from_headers(&headers)?;

    let mut records = Vec::with_capacity(data_lines.len());
    for line in data_lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields = parse_csv_row(line);
        records.push(schema.record_from(|idx| fields.get(idx).cloned().unwrap_or_default()));
    }

    Ok(CaseTable::new(records))
}

/// Load a case record table from an Excel file
///
/// Reads the first worksheet of an XLSX workbook. The first row must be the
/// header; numeric cells holding text that does not parse as a number load
/// as 0, since data cleaning is out of scope.
///
/// # Arguments
/// * `filepath` - Path to the Excel file to load
///
/// # Returns
/// * `Result<CaseTable, LoadError>` - The loaded table or an error
///
/// # Examples
/// ```no_run
/// use covid_dashboard::loader::from_excel;
///
/// match from_excel("state_wise_daily data file.xlsx") {
///     Ok(table) => println!("Loaded {} case records", table.len()),
///     Err(e) => eprintln!("Error loading Excel: {}", e),
/// }
/// ```
pub fn from_excel(filepath: impl AsRef<Path>) -> Result<CaseTable, LoadError> {
    use calamine::{open_workbook, Data, Reader, Xlsx};

    fn cell_to_string(cell: &Data) -> String {
        match cell {
            Data::String(s) => s.trim().to_string(),
            Data::Empty => String::new(),
            other => other.to_string(),
        }
    }

    let mut workbook: Xlsx<_> = open_workbook(filepath)?;

    // Read the first worksheet
    let sheet_name = workbook
        .sheet_names()
        .first()
        .ok_or(LoadError::Empty)?
        .clone();

    let range = workbook.worksheet_range(&sheet_name)?;

    let mut rows = range.rows();
    let header_row = rows.next().ok_or(LoadError::Empty)?;

    let headers: Vec<String> = header_row.iter().map(cell_to_string).collect();
    let schema = Schema::from_headers(&headers)?;

    let mut records = Vec::new();
    for row in rows {
        records
            .push(schema.record_from(|idx| row.get(idx).map(cell_to_string).unwrap_or_default()));
    }

    Ok(CaseTable::new(records))
}

/// Detect file type and load appropriate format
///
/// Examines the file extension and calls the appropriate loader for CSV or
/// Excel files.
///
/// # Arguments
/// * `filepath` - Path to the file to load
///
/// # Returns
/// * `Result<CaseTable, LoadError>` - The loaded table or an error
///
/// # Examples
/// ```no_run
/// use covid_dashboard::loader::load_table;
///
/// match load_table("state_wise_daily data file.xlsx") {
///     Ok(table) => println!("Successfully loaded {} records", table.len()),
///     Err(e) => eprintln!("Error loading file: {}", e),
/// }
/// ```
pub fn load_table(filepath: impl AsRef<Path>) -> Result<CaseTable, LoadError> {
    let path = filepath.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match extension.as_deref() {
        Some("csv") => from_csv(path),
        Some("xlsx") | Some("xls") => from_excel(path),
        Some(ext) => Err(LoadError::UnsupportedExtension(ext.to_string())),
        None => Err(LoadError::MissingExtension),
    }
}

/// Column positions of the required schema within a header row.
struct Schema {
    state: usize,
    status: usize,
    total: usize,
    hospitalized: usize,
    recovered: usize,
    deceased: usize,
    mask: usize,
    sanitizer: usize,
    oxygen: usize,
}

impl Schema {
    fn from_headers(headers: &[String]) -> Result<Self, LoadError> {
        let index = |name: &'static str| -> Result<usize, LoadError> {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(LoadError::MissingColumn(name))
        };

        // REQUIRED_COLUMNS order: State, Status, then the numeric columns
        Ok(Schema {
            state: index(REQUIRED_COLUMNS[0])?,
            status: index(REQUIRED_COLUMNS[1])?,
            total: index(REQUIRED_COLUMNS[2])?,
            hospitalized: index(REQUIRED_COLUMNS[3])?,
            recovered: index(REQUIRED_COLUMNS[4])?,
            deceased: index(REQUIRED_COLUMNS[5])?,
            mask: index(REQUIRED_COLUMNS[6])?,
            sanitizer: index(REQUIRED_COLUMNS[7])?,
            oxygen: index(REQUIRED_COLUMNS[8])?,
        })
    }

    /// Build one record by pulling each schema column out of a row via
    /// `field`. Missing or non-numeric count fields load as 0.
    fn record_from(&self, field: impl Fn(usize) -> String) -> CaseRecord {
        let number = |idx: usize| -> i64 {
            let raw = field(idx);
            let raw = raw.trim();
            raw.parse::<i64>()
                .or_else(|_| raw.parse::<f64>().map(|f| f as i64))
                .unwrap_or(0)
        };

        CaseRecord {
            state: field(self.state).trim().to_string(),
            status: field(self.status).trim().to_string(),
            total: number(self.total),
            hospitalized: number(self.hospitalized),
            recovered: number(self.recovered),
            deceased: number(self.deceased),
            mask: number(self.mask),
            sanitizer: number(self.sanitizer),
            oxygen: number(self.oxygen),
        }
    }
}

// Parse a CSV row into a vector of fields, honoring quoted fields and
// doubled quotes.
fn parse_csv_row(line: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current_field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if let Some(&next) = chars.peek() {
                    if next == '"' && in_quotes {
                        // Double quote inside quoted field - add a single quote
                        current_field.push('"');
                        chars.next();
                    } else {
                        in_quotes = !in_quotes;
                    }
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                result.push(current_field);
                current_field = String::new();
            }
            _ => {
                current_field.push(c);
            }
        }
    }

    result.push(current_field);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "State,Status,Total,Hospitalized,Recovered,Deceased,Mask,Sanitizer,Oxygen";

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_rows_in_order() {
        let file = csv_file(&format!(
            "{HEADER}\nKerala,Confirmed,10,2,3,1,100,50,5\nGoa,Recovered,5,1,4,0,40,20,2\n"
        ));
        let table = from_csv(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].state, "Kerala");
        assert_eq!(table.records()[0].total, 10);
        assert_eq!(table.records()[1].status, "Recovered");
        assert_eq!(table.records()[1].oxygen, 2);
    }

    #[test]
    fn missing_status_column_is_a_load_error() {
        let file = csv_file(
            "State,Total,Hospitalized,Recovered,Deceased,Mask,Sanitizer,Oxygen\nKerala,10,2,3,1,100,50,5\n",
        );
        match from_csv(file.path()) {
            Err(LoadError::MissingColumn(name)) => assert_eq!(name, "Status"),
            Err(other) => panic!("expected MissingColumn, got {other}"),
            Ok(_) => panic!("expected MissingColumn, got a table"),
        }
    }

    #[test]
    fn header_only_file_loads_as_empty_table() {
        let file = csv_file(&format!("{HEADER}\n"));
        let table = from_csv(file.path()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn empty_file_is_a_load_error() {
        let file = csv_file("");
        assert!(matches!(from_csv(file.path()), Err(LoadError::Empty)));
    }

    #[test]
    fn quoted_fields_and_non_numeric_counts() {
        let file = csv_file(&format!(
            "{HEADER}\n\"Tamil, Nadu\",Confirmed,n/a,2,3,1,100,50,5\n"
        ));
        let table = from_csv(file.path()).unwrap();
        assert_eq!(table.records()[0].state, "Tamil, Nadu");
        // non-numeric counts load as 0 rather than failing
        assert_eq!(table.records()[0].total, 0);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        assert!(matches!(
            load_table("data.parquet"),
            Err(LoadError::UnsupportedExtension(_))
        ));
        assert!(matches!(
            load_table("data"),
            Err(LoadError::MissingExtension)
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            load_table("no_such_file.csv"),
            Err(LoadError::Io { .. })
        ));
    }
}
