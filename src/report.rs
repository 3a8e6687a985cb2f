use std::fmt::Write;

use serde::Serialize;

use crate::aggregate;
use crate::error::Result;
use crate::filter::RecordFilter;
use crate::forecast;
use crate::models::{CrimeRecord, DashboardStats, Forecast, MapMarker, MonthCount, TypeCount};

/// Monthly trend as a chart would plot it: observed months followed by the
/// forecast months, with both series aligned to `labels`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub labels: Vec<String>,
    pub actual: Vec<Option<f64>>,
    pub forecast: Vec<Option<f64>>,
    pub delta: f64,
}

impl TrendSeries {
    pub fn new(history: &[MonthCount], projection: &Forecast) -> Self {
        let mut labels: Vec<String> = history.iter().map(|m| m.month.clone()).collect();
        labels.extend(projection.points.iter().map(|p| p.month.clone()));

        let actual = history
            .iter()
            .map(|m| Some(m.count as f64))
            .chain(projection.points.iter().map(|_| None))
            .collect();
        let forecast = history
            .iter()
            .map(|_| None)
            .chain(projection.points.iter().map(|p| Some(p.value)))
            .collect();

        Self {
            labels,
            actual,
            forecast,
            delta: projection.delta,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub crime_type: String,
    pub location: String,
    pub date: String,
    pub status: String,
}

/// Everything a presenter needs, derived fresh from the record sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub stats: DashboardStats,
    pub months: Vec<MonthCount>,
    pub forecast: Forecast,
    pub trend: TrendSeries,
    pub types: Vec<TypeCount>,
    pub markers: Vec<MapMarker>,
    pub type_options: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl DashboardView {
    pub fn build(records: &[CrimeRecord], filter: &RecordFilter, current_month: &str) -> Self {
        let months = aggregate::month_histogram(records);
        let projection = forecast::forecast(&months);
        let trend = TrendSeries::new(&months, &projection);

        Self {
            stats: aggregate::summarize(records, current_month),
            trend,
            forecast: projection,
            months,
            types: aggregate::type_histogram(records),
            markers: map_markers(records),
            type_options: aggregate::type_options(records),
            rows: filter.apply(records).into_iter().map(TableRow::from).collect(),
        }
    }
}

pub fn map_markers(records: &[CrimeRecord]) -> Vec<MapMarker> {
    records
        .iter()
        .filter_map(|record| {
            record.coordinates.map(|coords| MapMarker {
                lat: coords.lat,
                lng: coords.lng,
                crime_type: record.crime_type.clone(),
                location: record.location.clone(),
                date: record.date.clone(),
            })
        })
        .collect()
}

impl From<&CrimeRecord> for TableRow {
    fn from(record: &CrimeRecord) -> Self {
        TableRow {
            crime_type: record.crime_type.clone(),
            location: record.location.clone(),
            date: record.date.clone(),
            status: record.status.to_string(),
        }
    }
}

pub trait Presenter {
    fn render(&self, view: &DashboardView) -> Result<String>;
}

pub struct MarkdownPresenter;

pub struct JsonPresenter;

impl Presenter for JsonPresenter {
    fn render(&self, view: &DashboardView) -> Result<String> {
        Ok(serde_json::to_string_pretty(view)?)
    }
}

impl Presenter for MarkdownPresenter {
    fn render(&self, view: &DashboardView) -> Result<String> {
        let mut output = String::new();

        let _ = writeln!(output, "# Crime Dashboard");
        let _ = writeln!(output);
        let _ = writeln!(output, "- Total crimes: {}", view.stats.total);
        let _ = writeln!(output, "- Crime types: {}", view.stats.distinct_types);
        let _ = writeln!(output, "- This month: {}", view.stats.this_month);

        let _ = writeln!(output);
        output.push_str(&render_trend(&view.months, &view.forecast));

        let _ = writeln!(output);
        let _ = writeln!(output, "## Crime Type Distribution");
        if view.types.is_empty() {
            let _ = writeln!(output, "No crimes recorded.");
        } else {
            for entry in &view.types {
                let _ = writeln!(output, "- {}: {}", entry.crime_type, entry.count);
            }
        }

        let _ = writeln!(output);
        let _ = writeln!(output, "## Map Markers");
        if view.markers.is_empty() {
            let _ = writeln!(output, "No records with coordinates.");
        } else {
            for marker in &view.markers {
                let _ = writeln!(
                    output,
                    "- ({:.4}, {:.4}) {} at {} on {}",
                    marker.lat, marker.lng, marker.crime_type, marker.location, marker.date
                );
            }
        }

        let _ = writeln!(output);
        let _ = writeln!(output, "## Records");
        if !view.type_options.is_empty() {
            let _ = writeln!(output, "Types: {}", view.type_options.join(", "));
            let _ = writeln!(output);
        }
        output.push_str(&render_table(&view.rows));

        Ok(output)
    }
}

pub fn render_trend(months: &[MonthCount], projection: &Forecast) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "## Monthly Trend");
    if months.is_empty() {
        let _ = writeln!(output, "No crimes recorded.");
    } else {
        for month in months {
            let _ = writeln!(output, "- {}: {}", month.month, month.count);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Forecast (trend {:+.2} per month)", projection.delta);
    for point in &projection.points {
        let _ = writeln!(output, "- {}: {:.1}", point.month, point.value);
    }

    output
}

pub fn render_table(rows: &[TableRow]) -> String {
    let mut output = String::new();

    if rows.is_empty() {
        let _ = writeln!(output, "No matching records.");
        return output;
    }

    let _ = writeln!(output, "| Crime Type | Location | Date | Status |");
    let _ = writeln!(output, "|---|---|---|---|");
    for row in rows {
        let _ = writeln!(
            output,
            "| {} | {} | {} | {} |",
            row.crime_type, row.location, row.date, row.status
        );
    }

    output
}
