use std::env;

use covid_dashboard::{app, loader};

/// Default location of the case record spreadsheet, relative to the working
/// directory. One optional positional argument overrides it.
const DATA_FILE: &str = "state_wise_daily data file.xlsx";

/// Main entry point for the dashboard server
///
/// Loads the case record table, then hands it to the web application. A load
/// failure is fatal: the process exits before the server starts.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let data_file = args.get(1).map(String::as_str).unwrap_or(DATA_FILE);

    let table = match loader::load_table(data_file) {
        Ok(table) => table,
        Err(e) => {
            log::error!("could not load case records from `{}`: {}", data_file, e);
            std::process::exit(1);
        }
    };
    log::info!("loaded {} case records from `{}`", table.len(), data_file);

    // Start the web application
    app::run(table).await
}
