//! Report rendering
//!
//! Uses Tera with templates embedded at compile time:
//! - `report/forecast.txt`: terminal table and text bar charts
//! - `report/dashboard.html`: standalone dashboard page
//!
//! JSON output skips the templates and serializes the report itself.
//!
//! # Example
//!
//! ```rust,ignore
//! use infrastructure::templates::{OutputFormat, TemplateEngine};
//!
//! let engine = TemplateEngine::new()?;
//! let text = engine.render_report(&report, RoundingMode::default(), OutputFormat::Text)?;
//! ```

mod report_view;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use application::ForecastReport;
use domain::RoundingMode;
use serde::{Deserialize, Serialize};
use tera::{Context, Tera, Value};
use thiserror::Error;
use tracing::debug;

pub use report_view::{
    Align, BarGroupView, BarView, CellView, ChartView, NO_DATA_MESSAGE, RegionView, ReportView,
    RowView, TITLE,
};

/// Error type for template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template not found
    #[error("Template not found: {0}")]
    NotFound(String),

    /// Template rendering failed
    #[error("Template rendering failed: {0}")]
    Render(String),

    /// Template compilation failed
    #[error("Template compilation failed: {0}")]
    Compile(String),

    /// Invalid template context
    #[error("Invalid context: {0}")]
    Context(String),

    /// JSON serialization failed
    #[error("Serialization failed: {0}")]
    Serialize(String),
}

impl From<tera::Error> for TemplateError {
    fn from(e: tera::Error) -> Self {
        match e.kind {
            tera::ErrorKind::TemplateNotFound(name) => Self::NotFound(name),
            _ => Self::Render(e.to_string()),
        }
    }
}

/// Report output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text table and bar charts
    #[default]
    Text,
    /// HTML dashboard
    Html,
    /// Report as JSON
    Json,
}

impl OutputFormat {
    /// MIME type of rendered output
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Text => "text/plain; charset=utf-8",
            Self::Html => "text/html; charset=utf-8",
            Self::Json => "application/json",
        }
    }

    const fn template(self) -> Option<&'static str> {
        match self {
            Self::Text => Some(TEXT_REPORT),
            Self::Html => Some(HTML_DASHBOARD),
            Self::Json => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Html => "html",
            Self::Json => "json",
        })
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            other => Err(format!("Unknown output format: {other}")),
        }
    }
}

/// Template context wrapper for type-safe context building
#[derive(Debug, Clone)]
pub struct TemplateContext {
    inner: Context,
}

impl TemplateContext {
    /// Context whose top-level keys are the fields of `value`
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self, TemplateError> {
        Context::from_serialize(value)
            .map(|inner| Self { inner })
            .map_err(|e| TemplateError::Context(e.to_string()))
    }
}

const TEXT_REPORT: &str = "report/forecast.txt";
const HTML_DASHBOARD: &str = "report/dashboard.html";

/// Embedded templates - compiled into the binary
mod embedded {
    pub const FORECAST_TEXT: &str = r"{{ title }}
{{ caption }}
Generated {{ generated_at }}
{% if has_data %}
{%- for region in regions %}
{{ region.label }} Max Temp: {{ region.max_temp }}
{{ region.label }} Rainy Stations: {{ region.rainy }}
{%- endfor %}

{% for cell in headers %}{{ cell.text | pad(width=cell.width, align=cell.align) }}{% if not loop.last %} | {% endif %}{% endfor %}
{{ rule }}
{% for row in rows %}{% for cell in row.cells %}{{ cell.text | pad(width=cell.width, align=cell.align) }}{% if not loop.last %} | {% endif %}{% endfor %}
{% endfor %}
{%- for chart in charts %}
{{ chart.title }}
{%- for group in chart.groups %}
{{ group.place }}
{%- for bar in group.bars %}
  {{ bar.model | pad(width=5) }} {{ bar.fill }} {{ bar.value }}
{%- endfor %}
{%- endfor %}
{% endfor %}
{%- else %}
{{ no_data_message }}
{% endif %}";

    pub const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{{ title }}</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 2rem; color: #222; }
        .caption, .generated { color: #666; margin: 0.2rem 0; }
        .metrics { display: flex; flex-wrap: wrap; gap: 1rem; margin: 1.5rem 0; }
        .metric { border: 1px solid #ddd; border-radius: 6px; padding: 0.8rem 1.2rem; min-width: 12rem; }
        .metric .label { display: block; color: #666; font-size: 0.9rem; }
        .metric .value { display: block; font-size: 1.4rem; font-weight: bold; }
        table { border-collapse: collapse; }
        th, td { border: 1px solid #ddd; padding: 0.3rem 0.6rem; }
        td.right { text-align: right; }
        tr.rainy { background: #eef6ff; }
        .group { margin: 0.6rem 0; }
        .bar-row { display: flex; align-items: center; gap: 0.5rem; }
        .bar-row .model { width: 3.5rem; }
        .bar-row .track { width: 20rem; background: #f2f2f2; }
        .bar { display: block; height: 0.9rem; }
        .bar.ecmwf { background: #1f77b4; }
        .bar.gfs { background: #ff7f0e; }
        .empty { color: #a00; }
    </style>
</head>
<body>
    <h1>{{ title }}</h1>
    <p class="caption">{{ caption }}</p>
    <p class="generated">Generated {{ generated_at }}</p>
{% if has_data %}
    <section class="metrics">
{% for region in regions %}
        <div class="metric"><span class="label">{{ region.label }} Max Temp</span><span class="value">{{ region.max_temp }}</span></div>
        <div class="metric"><span class="label">{{ region.label }} Rainy Stations</span><span class="value">{{ region.rainy }}</span></div>
{% endfor %}
    </section>
    <h2>Forecast Table</h2>
    <table>
        <thead><tr>{% for cell in headers %}<th>{{ cell.text }}</th>{% endfor %}</tr></thead>
        <tbody>
{% for row in rows %}
            <tr{% if row.rainy %} class="rainy"{% endif %}>{% for cell in row.cells %}<td class="{{ cell.align }}">{{ cell.text }}</td>{% endfor %}</tr>
{% endfor %}
        </tbody>
    </table>
{% for chart in charts %}
    <h2>{{ chart.title }}</h2>
{% for group in chart.groups %}
    <div class="group">
        <strong>{{ group.place }}</strong>
{% for bar in group.bars %}
        <div class="bar-row"><span class="model">{{ bar.model }}</span><span class="track"><span class="bar {{ bar.model | lower }}" style="width: {{ bar.percent }}%"></span></span><span class="value">{{ bar.value }}</span></div>
{% endfor %}
    </div>
{% endfor %}
{% endfor %}
{% else %}
    <p class="empty">{{ no_data_message }}</p>
{% endif %}
</body>
</html>
"#;
}

/// Template engine using Tera
#[derive(Clone)]
pub struct TemplateEngine {
    tera: Arc<Tera>,
}

impl fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateEngine")
            .field("templates", &self.list_templates())
            .finish_non_exhaustive()
    }
}

impl TemplateEngine {
    /// Create a template engine with the embedded report templates
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html"]);

        tera.add_raw_template(TEXT_REPORT, embedded::FORECAST_TEXT)
            .map_err(|e| TemplateError::Compile(e.to_string()))?;
        tera.add_raw_template(HTML_DASHBOARD, embedded::DASHBOARD_HTML)
            .map_err(|e| TemplateError::Compile(e.to_string()))?;

        tera.register_filter("pad", pad_filter);

        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    /// Render a template with the given context
    pub fn render(
        &self,
        template_name: &str,
        context: &TemplateContext,
    ) -> Result<String, TemplateError> {
        self.tera
            .render(template_name, &context.inner)
            .map_err(TemplateError::from)
    }

    /// Render a forecast report in the requested format
    pub fn render_report(
        &self,
        report: &ForecastReport,
        rounding: RoundingMode,
        format: OutputFormat,
    ) -> Result<String, TemplateError> {
        let Some(template) = format.template() else {
            return serde_json::to_string_pretty(report)
                .map_err(|e| TemplateError::Serialize(e.to_string()));
        };

        let view = ReportView::new(report, rounding);
        debug!(
            template,
            rows = view.rows.len(),
            "Rendering forecast report"
        );
        self.render(template, &TemplateContext::from_serialize(&view)?)
    }

    /// List all available template names
    #[must_use]
    pub fn list_templates(&self) -> Vec<&str> {
        self.tera.get_template_names().collect()
    }
}

/// Custom filter: pad a value to `width` characters, `align` is `left` or `right`
#[allow(clippy::cast_possible_truncation)]
fn pad_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    let width = args.get("width").and_then(Value::as_u64).unwrap_or(0) as usize;
    let fill = " ".repeat(width.saturating_sub(text.chars().count()));

    match args.get("align").and_then(Value::as_str).unwrap_or("left") {
        "left" => Ok(Value::String(text + &fill)),
        "right" => Ok(Value::String(fill + &text)),
        other => Err(tera::Error::msg(format!("pad: unknown align `{other}`"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use application::{RainyCount, RegionalSummary, SkipReason, SkippedStation};
    use chrono::{TimeZone, Utc};
    use domain::{
        ForecastModel, ForecastWindow, ModelSeries, ReconciliationRules, StationForecast,
        Timezone,
    };

    fn reconciled(name: &str, ecmwf: ModelSeries, gfs: ModelSeries) -> StationForecast {
        StationForecast::reconcile(name, &ecmwf, &gfs, &ReconciliationRules::default()).unwrap()
    }

    fn sample_report() -> ForecastReport {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 4, 30, 0).unwrap();
        let forecasts = vec![
            reconciled(
                "Nungambakkam",
                ModelSeries::new(vec![28.0, 30.4], vec![3.0, 2.0]),
                ModelSeries::new(vec![29.0, 30.9], vec![1.0, 1.0]),
            ),
            reconciled(
                "Dharmapuri",
                ModelSeries::new(vec![33.0], vec![0.0]),
                ModelSeries::new(vec![31.0], vec![0.4]),
            ),
        ];
        ForecastReport {
            window: ForecastWindow::daily_from(now, Timezone::kolkata(), 8, 30, 24).unwrap(),
            generated_at: now,
            rules: ReconciliationRules::default(),
            regions: vec![RegionalSummary {
                region: "Tamil Nadu".to_string(),
                label: "TN".to_string(),
                hottest: Some(application::HottestStation {
                    station: "Dharmapuri".to_string(),
                    temperature_c: 31.0,
                }),
                rainy: RainyCount { rainy: 1, total: 2 },
            }],
            forecasts,
            skipped: vec![SkippedStation {
                station: "Pasighat".to_string(),
                reason: SkipReason::NoData,
            }],
        }
    }

    fn empty_report() -> ForecastReport {
        ForecastReport {
            forecasts: vec![],
            regions: vec![],
            ..sample_report()
        }
    }

    #[test]
    fn test_template_engine_creation() {
        let engine = TemplateEngine::new().unwrap();
        let mut names = engine.list_templates();
        names.sort_unstable();
        assert_eq!(names, vec!["report/dashboard.html", "report/forecast.txt"]);
    }

    #[test]
    fn test_text_report() {
        let engine = TemplateEngine::new().unwrap();
        let text = engine
            .render_report(&sample_report(), RoundingMode::default(), OutputFormat::Text)
            .unwrap();

        assert!(text.starts_with("SWM Weather Contest Dashboard\n"));
        assert!(text.contains("Based on ECMWF and GFS models | Period: 2026-10-18 08:30"));
        assert!(text.contains("TN Max Temp: 31.0 °C @ Dharmapuri"));
        assert!(text.contains("TN Rainy Stations: 1 / 2"));
        assert!(text.contains("Place        | ECMWF Max Temp (°C)"));
        assert!(text.contains("Rain ≥2.5mm?"));
        assert!(text.contains("Nungambakkam |                30.4 |              30.9 |"));
        assert!(text.contains("Max Temperature (°C)"));
        assert!(text.contains("Total Rain (mm)"));
        assert!(text.contains("  ECMWF █"));
        assert!(!text.contains("Pasighat"));
        assert!(!text.contains(NO_DATA_MESSAGE));
    }

    #[test]
    fn test_text_rows_are_aligned() {
        let engine = TemplateEngine::new().unwrap();
        let text = engine
            .render_report(&sample_report(), RoundingMode::default(), OutputFormat::Text)
            .unwrap();

        let table: Vec<&str> = text
            .lines()
            .filter(|line| line.matches(" | ").count() == 8)
            .collect();
        assert_eq!(table.len(), 3);
        let width = table[0].chars().count();
        assert!(table.iter().all(|line| line.chars().count() == width));
    }

    #[test]
    fn test_empty_report_shows_message() {
        let engine = TemplateEngine::new().unwrap();
        for format in [OutputFormat::Text, OutputFormat::Html] {
            let output = engine
                .render_report(&empty_report(), RoundingMode::default(), format)
                .unwrap();
            assert!(output.contains(NO_DATA_MESSAGE), "{format}");
            assert!(!output.contains("Forecast Table"), "{format}");
        }
    }

    #[test]
    fn test_html_dashboard() {
        let engine = TemplateEngine::new().unwrap();
        let html = engine
            .render_report(&sample_report(), RoundingMode::default(), OutputFormat::Html)
            .unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>SWM Weather Contest Dashboard</title>"));
        assert!(html.contains("<th>ECMWF Max Temp (°C)</th>"));
        assert!(html.contains(r#"<tr class="rainy">"#));
        assert!(html.contains(r#"class="bar ecmwf""#));
        assert!(html.contains("TN Rainy Stations"));
        assert!(!html.contains("Pasighat"));
    }

    #[test]
    fn test_html_escapes_station_names() {
        let mut report = sample_report();
        report.forecasts[0].station = "<script>alert(1)</script>".to_string();

        let engine = TemplateEngine::new().unwrap();
        let html = engine
            .render_report(&report, RoundingMode::default(), OutputFormat::Html)
            .unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_json_report_is_unrounded() {
        let engine = TemplateEngine::new().unwrap();
        let json = engine
            .render_report(&sample_report(), RoundingMode::default(), OutputFormat::Json)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["forecasts"][0]["station"], "Nungambakkam");
        assert_eq!(value["forecasts"][0]["confidence"], "ECMWF");
        assert_eq!(value["forecasts"][0]["final_temperature_c"], 30.4);
        assert_eq!(value["skipped"][0]["reason"]["kind"], "no_data");
        assert_eq!(value["regions"][0]["rainy"]["total"], 2);
    }

    #[test]
    fn test_confidence_in_table() {
        let report = sample_report();
        assert_eq!(report.forecasts[0].confidence, ForecastModel::Ecmwf);
        assert_eq!(report.forecasts[1].confidence, ForecastModel::Gfs);
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("HTML".parse::<OutputFormat>().unwrap(), OutputFormat::Html);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("csv".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Html.to_string(), "html");
        assert_eq!(OutputFormat::Json.content_type(), "application/json");
    }

    #[test]
    fn test_custom_context() {
        let engine = TemplateEngine::new().unwrap();
        let mut view = ReportView::new(&empty_report(), RoundingMode::default());
        view.title = "Custom Title".to_string();
        let ctx = TemplateContext::from_serialize(&view).unwrap();

        let text = engine.render("report/forecast.txt", &ctx).unwrap();
        assert!(text.starts_with("Custom Title\n"));
    }

    #[test]
    fn test_unknown_template() {
        let engine = TemplateEngine::new().unwrap();
        let view = ReportView::new(&empty_report(), RoundingMode::default());
        let ctx = TemplateContext::from_serialize(&view).unwrap();
        let result = engine.render("report/missing.txt", &ctx);
        assert!(matches!(result, Err(TemplateError::NotFound(_))));
    }

    #[test]
    fn test_pad_filter() {
        let mut args = HashMap::new();
        args.insert("width".to_string(), Value::from(6));
        let left = pad_filter(&Value::from("GFS"), &args).unwrap();
        assert_eq!(left.as_str().unwrap(), "GFS   ");

        args.insert("align".to_string(), Value::from("right"));
        let right = pad_filter(&Value::from("30.4"), &args).unwrap();
        assert_eq!(right.as_str().unwrap(), "  30.4");

        let wide = pad_filter(&Value::from("Nungambakkam"), &args).unwrap();
        assert_eq!(wide.as_str().unwrap(), "Nungambakkam");

        args.insert("align".to_string(), Value::from("center"));
        assert!(pad_filter(&Value::from("x"), &args).is_err());
    }

    #[test]
    fn test_pad_counts_characters() {
        let mut args = HashMap::new();
        args.insert("width".to_string(), Value::from(5));
        let padded = pad_filter(&Value::from("°C"), &args).unwrap();
        assert_eq!(padded.as_str().unwrap().chars().count(), 5);
    }
}
