#![cfg(feature = "web")]
use handlebars::Handlebars;
use serde_json::json;
use thiserror::Error;

use crate::aggregate::Summary;
use crate::chart::{CaseSelection, SupplySelection, ZoneSelection};

/// Errors raised while building the dashboard page.
///
/// Fatal at startup: the page is rendered once, before the server binds.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("invalid dashboard template: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    #[error("failed to render dashboard page: {0}")]
    Render(#[from] handlebars::RenderError),
}

/// Renders the dashboard page from the embedded template.
///
/// The page is the fixed widget tree: four summary cards with the startup
/// counts baked in, three dropdowns with their option lists, and the three
/// chart slots. It is built exactly once and served as-is afterwards.
pub fn build_page(summary: &Summary) -> Result<String, LayoutError> {
    let mut registry = Handlebars::new();
    registry
        .register_template_string("dashboard", include_str!("static/dashboard.hbs"))
        .map_err(Box::new)?;

    let case_options: Vec<&str> = CaseSelection::OPTIONS.iter().map(|s| s.label()).collect();
    let supply_options: Vec<&str> = SupplySelection::OPTIONS.iter().map(|s| s.label()).collect();
    let zone_options: Vec<&str> = ZoneSelection::OPTIONS.iter().map(|s| s.label()).collect();

    let page = registry.render(
        "dashboard",
        &json!({
            "total": summary.total,
            "active": summary.active,
            "recovered": summary.recovered,
            "deaths": summary.deaths,
            "case_options": case_options,
            "supply_options": supply_options,
            "zone_options": zone_options,
        }),
    )?;

    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_contains_counts_and_dropdown_options() {
        let summary = Summary {
            total: 42,
            active: 12,
            recovered: 25,
            deaths: 5,
        };
        let page = build_page(&summary).unwrap();

        assert!(page.contains("Covid-19 Impact Analysis"));
        assert!(page.contains("42"));
        assert!(page.contains("12"));
        assert!(page.contains("Hospitalized"));
        assert!(page.contains("Sanitizer"));
        assert!(page.contains("Orange Zone"));
        // the three chart slots the dropdowns drive
        assert!(page.contains("/chart/bar.png"));
        assert!(page.contains("/chart/line.png"));
        assert!(page.contains("/chart/pie.png"));
    }
}
