//! Price chart rendering

use chrono::{DateTime, TimeZone, Utc};
use plotters::prelude::*;

use crate::models::{PriceSample, Timeframe};

/// Price axis bounds with 10% padding, clamped at zero
fn price_bounds(samples: &[PriceSample]) -> (f64, f64) {
    let min_price = samples
        .iter()
        .map(|p| p.price)
        .fold(f64::INFINITY, f64::min);
    let max_price = samples
        .iter()
        .map(|p| p.price)
        .fold(f64::NEG_INFINITY, f64::max);

    let price_range = (max_price - min_price).max(1e-8); // Avoid division by zero
    let padding = price_range * 0.1;
    ((min_price - padding).max(0.0), max_price + padding)
}

fn to_datetime(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms).single().unwrap_or_else(Utc::now)
}

/// Generate a price chart image as PNG bytes
pub fn generate_chart(
    samples: &[PriceSample],
    symbol: &str,
    timeframe: Timeframe,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, String> {
    if samples.len() < 2 {
        return Err(
            "❌ Not enough price data to generate chart (minimum 2 points required).".to_string(),
        );
    }

    // Use a temporary file path for BitMapBackend
    let temp_file = format!(
        "/tmp/orbitalverse_chart_{}.png",
        chrono::Utc::now().timestamp_millis()
    );

    {
        let backend = BitMapBackend::new(&temp_file, (width, height));
        let root = backend.into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| format!("Failed to fill canvas: {}", e))?;

        let (y_min, y_max) = price_bounds(samples);
        let x_min = to_datetime(samples[0].timestamp);
        let x_max = to_datetime(samples[samples.len() - 1].timestamp);

        let mut chart = ChartBuilder::on(&root)
            .caption(
                &format!("{} Price Chart ({})", symbol, timeframe),
                ("sans-serif", 40.0).into_font(),
            )
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(|e| format!("Failed to build chart: {}", e))?;

        chart
            .configure_mesh()
            .y_desc(&format!("{} (USD)", symbol))
            .x_desc("Time")
            .draw()
            .map_err(|e| format!("Failed to draw mesh: {}", e))?;

        chart
            .draw_series(LineSeries::new(
                samples.iter().map(|p| (to_datetime(p.timestamp), p.price)),
                &BLUE,
            ))
            .map_err(|e| format!("Failed to draw series: {}", e))?;

        root.present()
            .map_err(|e| format!("Failed to render chart: {}", e))?;
    }

    // Read the temporary file into memory
    use std::fs;
    let image_data =
        fs::read(&temp_file).map_err(|e| format!("Failed to read chart file: {}", e))?;

    // Clean up temporary file
    let _ = fs::remove_file(&temp_file);

    Ok(image_data)
}
