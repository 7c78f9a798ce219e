#[cfg(feature = "web")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Render one chart of each kind from sample data - returns file paths
    let charts = covid_dashboard::render::create_example_charts();

    for (name, file_path) in charts {
        println!("Created {} chart at {}", name, file_path);
    }

    Ok(())
}
