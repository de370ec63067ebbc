//! Presentation model for forecast reports
//!
//! Rounding happens here and nowhere else. Everything a template needs is
//! pre-formatted so the text and HTML templates stay free of arithmetic.

use application::{ForecastReport, RegionalSummary};
use domain::{ForecastModel, ModelSummary, RoundingMode, StationForecast};
use serde::Serialize;

/// Dashboard title
pub const TITLE: &str = "SWM Weather Contest Dashboard";

/// Shown instead of tables and charts when no station has data
pub const NO_DATA_MESSAGE: &str = "No forecast data available";

/// Placeholder for a value a model did not provide
const MISSING_VALUE: &str = "—";

/// Width of the longest text bar in characters
const TEXT_BAR_WIDTH: f64 = 30.0;

/// Column alignment in the text table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Pad on the right
    Left,
    /// Pad on the left
    Right,
}

/// One table cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellView {
    /// Formatted content
    pub text: String,
    /// Column width in characters
    pub width: usize,
    /// Alignment within the column
    pub align: Align,
}

/// One table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    /// Cells in column order
    pub cells: Vec<CellView>,
    /// Whether the station meets the rain threshold
    pub rainy: bool,
}

/// Headline metrics for one region
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionView {
    /// Region name
    pub name: String,
    /// Region heading
    pub label: String,
    /// `32.8 °C @ Meenambakkam`, or "No data"
    pub max_temp: String,
    /// `k / n`
    pub rainy: String,
}

/// One bar of a grouped bar chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarView {
    /// Model label
    pub model: &'static str,
    /// Formatted value
    pub value: String,
    /// Text rendering of the bar
    pub fill: String,
    /// Bar length relative to the chart's largest value, 0-100
    pub percent: f64,
}

/// Bars of one station
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarGroupView {
    /// Station name
    pub place: String,
    /// One bar per model
    pub bars: Vec<BarView>,
}

/// A grouped per-model bar chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    /// Chart heading
    pub title: String,
    /// Station groups in table order
    pub groups: Vec<BarGroupView>,
}

/// Everything the report templates render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    /// Page title
    pub title: String,
    /// Models and period line
    pub caption: String,
    /// Generation time
    pub generated_at: String,
    /// Whether any station produced a forecast
    pub has_data: bool,
    /// Message shown when `has_data` is false
    pub no_data_message: String,
    /// Table header cells
    pub headers: Vec<CellView>,
    /// Separator line under the text table header
    pub rule: String,
    /// Table rows in station order
    pub rows: Vec<RowView>,
    /// Headline metrics per region
    pub regions: Vec<RegionView>,
    /// Temperature and precipitation comparisons
    pub charts: Vec<ChartView>,
}

impl ReportView {
    /// Build the view of a report with the given display rounding
    #[must_use]
    pub fn new(report: &ForecastReport, rounding: RoundingMode) -> Self {
        let threshold = format_threshold(report.rules.rain_threshold_mm);
        let header_texts = [
            "Place".to_string(),
            "ECMWF Max Temp (°C)".to_string(),
            "GFS Max Temp (°C)".to_string(),
            "ECMWF Rain (mm)".to_string(),
            "GFS Rain (mm)".to_string(),
            "Confidence".to_string(),
            "Final Temp (°C)".to_string(),
            "Final Rain (mm)".to_string(),
            format!("Rain ≥{threshold}mm?"),
        ];
        let aligns = [
            Align::Left,
            Align::Right,
            Align::Right,
            Align::Right,
            Align::Right,
            Align::Left,
            Align::Right,
            Align::Right,
            Align::Left,
        ];

        let raw_rows: Vec<[String; 9]> = report
            .forecasts
            .iter()
            .map(|forecast| table_row(forecast, rounding))
            .collect();

        let mut widths = header_texts.clone().map(|h| h.chars().count());
        for row in &raw_rows {
            for (width, text) in widths.iter_mut().zip(row) {
                *width = (*width).max(text.chars().count());
            }
        }

        let cells = |texts: [String; 9]| -> Vec<CellView> {
            texts
                .into_iter()
                .zip(widths)
                .zip(aligns)
                .map(|((text, width), align)| CellView { text, width, align })
                .collect()
        };

        let rows = raw_rows
            .into_iter()
            .zip(&report.forecasts)
            .map(|(texts, forecast)| RowView {
                cells: cells(texts),
                rainy: forecast.meets_rain_threshold,
            })
            .collect();

        let rule_width = widths.iter().sum::<usize>() + 3 * (widths.len() - 1);

        Self {
            title: TITLE.to_string(),
            caption: format!("Based on ECMWF and GFS models | Period: {}", report.window),
            generated_at: report.generated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            has_data: !report.is_empty(),
            no_data_message: NO_DATA_MESSAGE.to_string(),
            headers: cells(header_texts),
            rule: "-".repeat(rule_width),
            rows,
            regions: report
                .regions
                .iter()
                .map(|summary| region_view(summary, rounding))
                .collect(),
            charts: vec![
                chart(
                    "Max Temperature (°C)",
                    &report.forecasts,
                    rounding,
                    |s| s.max_temperature_c,
                ),
                chart(
                    "Total Rain (mm)",
                    &report.forecasts,
                    rounding,
                    |s| s.total_precipitation_mm,
                ),
            ],
        }
    }
}

/// Threshold without a trailing `.0` for integral values, e.g. `2.5`, `5`
fn format_threshold(value: f64) -> String {
    let text = format!("{value}");
    text.strip_suffix(".0").map_or(text.clone(), ToString::to_string)
}

fn table_row(forecast: &StationForecast, rounding: RoundingMode) -> [String; 9] {
    let summary_value = |model: ForecastModel, value: fn(&ModelSummary) -> f64| {
        forecast
            .summary(model)
            .map_or_else(|| MISSING_VALUE.to_string(), |s| rounding.format_tenth(value(s)))
    };

    [
        forecast.station.clone(),
        summary_value(ForecastModel::Ecmwf, |s| s.max_temperature_c),
        summary_value(ForecastModel::Gfs, |s| s.max_temperature_c),
        summary_value(ForecastModel::Ecmwf, |s| s.total_precipitation_mm),
        summary_value(ForecastModel::Gfs, |s| s.total_precipitation_mm),
        forecast.confidence.to_string(),
        rounding.format_tenth(forecast.final_temperature_c),
        rounding.format_tenth(forecast.final_precipitation_mm),
        if forecast.meets_rain_threshold {
            "Yes".to_string()
        } else {
            "No".to_string()
        },
    ]
}

fn region_view(summary: &RegionalSummary, rounding: RoundingMode) -> RegionView {
    RegionView {
        name: summary.region.clone(),
        label: summary.label.clone(),
        max_temp: summary.hottest.as_ref().map_or_else(
            || "No data".to_string(),
            |h| format!("{} °C @ {}", rounding.format_tenth(h.temperature_c), h.station),
        ),
        rainy: summary.rainy.to_string(),
    }
}

fn chart(
    title: &str,
    forecasts: &[StationForecast],
    rounding: RoundingMode,
    value: fn(&ModelSummary) -> f64,
) -> ChartView {
    let scale = forecasts
        .iter()
        .flat_map(|f| ForecastModel::ALL.map(|m| f.summary(m).map(value)))
        .flatten()
        .fold(0.0_f64, f64::max);

    let groups = forecasts
        .iter()
        .map(|forecast| BarGroupView {
            place: forecast.station.clone(),
            bars: ForecastModel::ALL
                .iter()
                .map(|&model| bar(model, forecast.summary(model).map(value), scale, rounding))
                .collect(),
        })
        .collect();

    ChartView {
        title: title.to_string(),
        groups,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar(model: ForecastModel, value: Option<f64>, scale: f64, rounding: RoundingMode) -> BarView {
    let Some(value) = value else {
        return BarView {
            model: model.label(),
            value: MISSING_VALUE.to_string(),
            fill: String::new(),
            percent: 0.0,
        };
    };

    let ratio = if scale > 0.0 {
        (value.max(0.0) / scale).min(1.0)
    } else {
        0.0
    };

    BarView {
        model: model.label(),
        value: rounding.format_tenth(value),
        fill: "█".repeat((ratio * TEXT_BAR_WIDTH).round() as usize),
        percent: (ratio * 1000.0).round() / 10.0,
    }
}
