use plotters::prelude::*;

use crate::calculator::ChartPoint;
use crate::error::CalcError;

/// Configuration options for the results bar chart.
#[derive(Clone, Debug)]
pub struct GraphOptions {
    /// Title displayed at the top of the chart
    pub title: String,

    /// Label for the X-axis
    pub x_label: String,

    /// Label for the Y-axis
    pub y_label: String,

    /// Width of the chart in pixels
    pub width: u32,

    /// Height of the chart in pixels
    pub height: u32,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            title: "Revenue vs Expenses vs Profit".to_string(),
            x_label: "Metric".to_string(),
            y_label: "Amount ($)".to_string(),
            width: 800,
            height: 500,
        }
    }
}

/// Render the chart series as a bar chart and return the PNG bytes.
///
/// The bitmap backend draws into a temporary file which is read back and
/// removed when the guard drops, so no image artifact survives the call on
/// any exit path.
pub fn render_bar_chart(series: &[ChartPoint], options: &GraphOptions) -> Result<Vec<u8>, CalcError> {
    let tmp = tempfile::Builder::new()
        .prefix("profitcalc-chart-")
        .suffix(".png")
        .tempfile()?;

    {
        let root =
            BitMapBackend::new(tmp.path(), (options.width, options.height)).into_drawing_area();
        root.fill(&WHITE).map_err(to_chart_err)?;

        let max_v = series.iter().map(|p| p.value).fold(0.0_f64, f64::max);
        let min_v = series.iter().map(|p| p.value).fold(0.0_f64, f64::min);
        // Headroom above the tallest bar; extend below zero when a loss is plotted.
        let upper = if max_v > 0.0 { max_v * 1.05 } else { 1.0 };
        let lower = if min_v < 0.0 { min_v * 1.05 } else { 0.0 };

        let mut chart = ChartBuilder::on(&root)
            .caption(&options.title, ("sans-serif", 28).into_font())
            .margin(12)
            .x_label_area_size(36)
            .y_label_area_size(64)
            .build_cartesian_2d((0..series.len() as i32).into_segmented(), lower..upper)
            .map_err(to_chart_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(&options.x_label)
            .y_desc(&options.y_label)
            .x_label_formatter(&|segment| match segment {
                SegmentValue::CenterOf(i) => series
                    .get(*i as usize)
                    .map(|p| p.label.to_string())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .draw()
            .map_err(to_chart_err)?;

        chart
            .draw_series(series.iter().enumerate().map(|(i, point)| {
                let mut bar = Rectangle::new(
                    [
                        (SegmentValue::Exact(i as i32), 0.0),
                        (SegmentValue::Exact(i as i32 + 1), point.value),
                    ],
                    BLUE.filled(),
                );
                bar.set_margin(0, 0, 18, 18);
                bar
            }))
            .map_err(to_chart_err)?;

        root.present().map_err(to_chart_err)?;
    }

    let buffer = std::fs::read(tmp.path())?;
    Ok(buffer)
}

fn to_chart_err<E: std::fmt::Display>(err: E) -> CalcError {
    CalcError::Chart(err.to_string())
}
