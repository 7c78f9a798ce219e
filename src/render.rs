#![cfg(feature = "web")]
use plotters::prelude::*;
use thiserror::Error;

use crate::chart::{ChartKind, ChartSpec};

/// Width of rendered charts in pixels.
const CHART_WIDTH: u32 = 800;
/// Height of rendered charts in pixels.
const CHART_HEIGHT: u32 = 600;

/// Slice colors for the pie chart, cycled when there are more statuses.
const PIE_COLORS: [RGBColor; 6] = [
    RGBColor(66, 133, 244),
    RGBColor(219, 68, 55),
    RGBColor(244, 180, 0),
    RGBColor(15, 157, 88),
    RGBColor(171, 71, 188),
    RGBColor(255, 112, 67),
];

/// Errors raised while drawing a chart specification to a bitmap.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to draw chart: {0}")]
    Draw(String),

    #[error("failed to write chart bitmap: {0}")]
    Io(#[from] std::io::Error),
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

/// Renders a chart specification to PNG bytes
///
/// This is the main entry point for turning an abstract [`ChartSpec`] into an
/// image the dashboard page can display. The bitmap is drawn through a
/// uniquely named temporary file and read back into memory.
///
/// # Arguments
/// * `spec` - The chart specification to draw
///
/// # Returns
/// * A Result containing the PNG image data as bytes or an error
///
/// # Examples
/// ```no_run
/// use covid_dashboard::chart::{bar_chart, CaseSelection};
/// use covid_dashboard::render::render_chart;
/// use covid_dashboard::table::CaseTable;
///
/// let table = CaseTable::default();
/// let spec = bar_chart(&table, CaseSelection::All);
/// match render_chart(&spec) {
///     Ok(png_data) => println!("Chart rendered: {} bytes", png_data.len()),
///     Err(e) => eprintln!("Failed to render chart: {}", e),
/// }
/// ```
pub fn render_chart(spec: &ChartSpec) -> Result<Vec<u8>, RenderError> {
    // Unique scratch file per call; a fixed name would collide when two
    // chart requests render at once.
    let file = tempfile::Builder::new().suffix(".png").tempfile()?;
    save_chart(spec, file.path())?;
    let png_data = std::fs::read(file.path())?;
    Ok(png_data)
}

/// Draws a chart specification to a PNG file
///
/// Like [`render_chart`] but writes directly to the given path instead of
/// returning the bytes. Useful for generating example charts on disk.
///
/// # Arguments
/// * `spec` - The chart specification to draw
/// * `path` - File path where the chart should be saved
///
/// # Returns
/// * A Result indicating success or failure
pub fn save_chart(spec: &ChartSpec, path: impl AsRef<std::path::Path>) -> Result<(), RenderError> {
    let root = BitMapBackend::new(path.as_ref(), (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    match spec.kind {
        ChartKind::Bar => draw_bar_chart(spec, &root)?,
        ChartKind::Line => draw_line_chart(spec, &root)?,
        ChartKind::Pie => draw_pie_chart(spec, &root)?,
    }

    root.present().map_err(draw_err)?;
    Ok(())
}

type Bitmap<'a> = DrawingArea<BitMapBackend<'a>, plotters::coord::Shift>;

/// Draws one bar per point, labeled with the point's category.
fn draw_bar_chart(spec: &ChartSpec, root: &Bitmap) -> Result<(), RenderError> {
    let bars = spec.points.len().max(1);
    let max_y = spec.points.iter().map(|p| p.value).max().unwrap_or(0).max(1);

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(0f64..bars as f64, 0i64..max_y + 1)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_desc(&spec.x_label)
        .y_desc(&spec.y_label)
        .x_labels(bars)
        .x_label_formatter(&|x| {
            spec.points
                .get(*x as usize)
                .map(|p| p.label.clone())
                .unwrap_or_default()
        })
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(spec.points.iter().enumerate().map(|(i, p)| {
            Rectangle::new(
                [(i as f64 + 0.15, 0), (i as f64 + 0.85, p.value)],
                BLUE.filled(),
            )
        }))
        .map_err(draw_err)?;

    Ok(())
}

/// Draws the points as a connected series, in spec order.
fn draw_line_chart(spec: &ChartSpec, root: &Bitmap) -> Result<(), RenderError> {
    let n = spec.points.len().max(1);
    let min_y = spec.points.iter().map(|p| p.value).min().unwrap_or(0).min(0);
    let max_y = spec.points.iter().map(|p| p.value).max().unwrap_or(1);

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(0f64..n as f64, min_y..max_y + 1)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_desc(&spec.x_label)
        .y_desc(&spec.y_label)
        .x_labels(n)
        .x_label_formatter(&|x| {
            spec.points
                .get(*x as usize)
                .map(|p| p.label.clone())
                .unwrap_or_default()
        })
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(LineSeries::new(
            spec.points
                .iter()
                .enumerate()
                .map(|(i, p)| (i as f64, p.value)),
            &BLUE,
        ))
        .map_err(draw_err)?;

    Ok(())
}

/// Draws one slice per point, sized by the point's value.
fn draw_pie_chart(spec: &ChartSpec, root: &Bitmap) -> Result<(), RenderError> {
    let root = root
        .titled(&spec.title, ("sans-serif", 30).into_font())
        .map_err(draw_err)?;

    if spec.points.is_empty() {
        return Ok(());
    }

    let sizes: Vec<f64> = spec.points.iter().map(|p| p.value as f64).collect();
    let labels: Vec<String> = spec.points.iter().map(|p| p.label.clone()).collect();
    let colors: Vec<RGBColor> = (0..spec.points.len())
        .map(|i| PIE_COLORS[i % PIE_COLORS.len()])
        .collect();

    let (w, h) = root.dim_in_pixel();
    let center = (w as i32 / 2, h as i32 / 2);
    let radius = (w.min(h) as f64 / 2.0) * 0.7;

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.label_style(("sans-serif", 18).into_font().color(&BLACK));
    root.draw(&pie).map_err(draw_err)?;

    Ok(())
}

/// Creates example charts for demonstration purposes
///
/// Renders one chart of each kind from a small sample table and saves them
/// to disk in the "chart_output" directory.
///
/// # Returns
/// * A vector of tuples containing chart kind name and file path
pub fn create_example_charts() -> Vec<(String, String)> {
    use crate::chart::{bar_chart, line_chart, pie_chart, CaseSelection, SupplySelection, ZoneSelection};
    use crate::table::{CaseRecord, CaseTable};

    let mut result = Vec::new();

    let output_dir = "chart_output";
    std::fs::create_dir_all(output_dir).unwrap_or_else(|_| {
        eprintln!("Output directory already exists or couldn't be created");
    });

    let table = CaseTable::new(vec![
        CaseRecord {
            state: "Kerala".to_string(),
            status: "Confirmed".to_string(),
            total: 120,
            hospitalized: 40,
            recovered: 60,
            deceased: 5,
            mask: 900,
            sanitizer: 300,
            oxygen: 25,
        },
        CaseRecord {
            state: "Goa".to_string(),
            status: "Recovered".to_string(),
            total: 45,
            hospitalized: 10,
            recovered: 30,
            deceased: 2,
            mask: 400,
            sanitizer: 150,
            oxygen: 8,
        },
        CaseRecord {
            state: "Delhi".to_string(),
            status: "Deceased".to_string(),
            total: 210,
            hospitalized: 80,
            recovered: 95,
            deceased: 20,
            mask: 1500,
            sanitizer: 600,
            oxygen: 60,
        },
    ]);

    let charts = [
        ("Bar", bar_chart(&table, CaseSelection::All)),
        ("Line", line_chart(&table, SupplySelection::All)),
        ("Pie", pie_chart(&table, ZoneSelection::All)),
    ];

    for (name, spec) in charts {
        let path = format!("{}/{}_chart.png", output_dir, name.to_lowercase());
        if save_chart(&spec, &path).is_ok() {
            result.push((name.to_string(), path));
        }
    }

    result
}
