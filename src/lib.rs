/*!
# Covid-19 Impact Analysis Dashboard

A single-page analytics dashboard for state-wise pandemic case records,
built in Rust.

## Overview

The server loads one spreadsheet of regional case records into an immutable
in-memory table at startup, computes four aggregate counts, renders the
dashboard page once, and then answers chart requests driven by the page's
three dropdowns. Every chart is recomputed from scratch from the static
table and the current selection; no state accumulates between updates.

## Architecture

The application follows a client-server architecture:

### Frontend Layer
- **Technologies**: HTML, CSS, a few lines of vanilla JavaScript
- **Key Components**:
  - Summary Cards - Total/Active/Recovered/Deaths, fixed at startup
  - Dropdown Selectors - one per chart, defaulting to "All"
  - Chart Images - swap their source when a dropdown changes

### Backend Layer
- **Technologies**: Rust, axum
- **Core Components**:
  - Data Loader - reads the spreadsheet (XLSX or CSV) and validates the schema
  - Aggregator - derives the four summary counters
  - Layout Builder - renders the page template with counts and options
  - Chart Handlers - pure functions from (selection, table) to a chart
    specification
  - Chart Renderer - draws a specification to PNG with plotters

### Data Flow
Loader → Aggregator → Layout Builder run once at process start. Afterwards
each dropdown change issues one request, dispatched to exactly one handler,
which reads the immutable table and returns a fresh chart.

## Modules

- **table**: the case record table and column projections
- **loader**: spreadsheet import and schema validation
- **aggregate**: the four summary counters
- **chart**: selection enums, chart specifications, and the three handlers
- **render**: plotters-based PNG rendering of chart specifications
- **layout**: one-shot dashboard page construction
- **app**: routing and the shared application state

## REST API Endpoints

- `/` - the dashboard page
- `/api/summary` - the four aggregate counts as JSON
- `/api/chart/{kind}?selection=…` - a chart specification as JSON
- `/chart/{kind}.png?selection=…` - a rendered chart image
- `/static/…` - stylesheet and other assets

`{kind}` is one of `bar`, `line`, `pie`. A missing selection defaults to
`All`; an unrecognized one logs a warning and falls back to `All`.
*/

// Re-export all modules so they appear in the documentation
pub mod aggregate;
pub mod app;
pub mod chart;
pub mod layout;
pub mod loader;
pub mod render;
pub mod table;

/// Re-export everything from these modules to make it easier to use
pub use aggregate::*;
pub use chart::*;
pub use loader::*;
pub use table::*;
