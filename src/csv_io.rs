use std::path::Path;

use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, Trim, WriterBuilder};
use rand::Rng;

use crate::config::ImportSettings;
use crate::error::Result;
use crate::models::{Coordinates, CrimeRecord, Status};

pub const CSV_HEADER: &str = "Crime Type,Location,Date,Status";
pub const DEFAULT_LOCATION: &str = "Unknown";

pub fn export_csv(records: &[CrimeRecord]) -> Result<String> {
    let mut buffer = Vec::new();
    buffer.extend_from_slice(CSV_HEADER.as_bytes());
    buffer.push(b'\n');

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(buffer);

    for record in records {
        writer.write_record([
            record.crime_type.as_str(),
            record.location.as_str(),
            record.date.as_str(),
            record.status.as_str(),
        ])?;
    }

    let buffer = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(String::from_utf8(buffer)?)
}

pub fn write_csv(path: &Path, records: &[CrimeRecord]) -> Result<()> {
    let content = export_csv(records)?;
    std::fs::write(path, content)?;
    tracing::info!(path = %path.display(), records = records.len(), "exported records");
    Ok(())
}

/// Parses an uploaded CSV. The first line is always treated as a header.
/// Lines are split on every comma; quotes only get stripped from field edges.
/// Rows without a crime type or a date are dropped.
pub fn parse_csv<R: Rng>(
    text: &str,
    settings: &ImportSettings,
    rng: &mut R,
) -> Result<Vec<CrimeRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .quoting(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for row in reader.records() {
        let row = row?;
        match record_from_row(&row, settings, rng) {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::debug!(dropped, "skipped rows missing a crime type or date");
    }

    Ok(records)
}

pub fn read_csv<R: Rng>(
    path: &Path,
    settings: &ImportSettings,
    rng: &mut R,
) -> Result<Vec<CrimeRecord>> {
    let text = std::fs::read_to_string(path)?;
    let records = parse_csv(&text, settings, rng)?;
    tracing::info!(path = %path.display(), records = records.len(), "imported records");
    Ok(records)
}

fn record_from_row<R: Rng>(
    row: &StringRecord,
    settings: &ImportSettings,
    rng: &mut R,
) -> Option<CrimeRecord> {
    let field = |idx: usize| row.get(idx).map(clean_field).filter(|v| !v.is_empty());

    let crime_type = field(0)?;
    let date = field(2)?;
    let location = field(1).unwrap_or_else(|| DEFAULT_LOCATION.to_string());
    let status = field(3).map(|s| Status::parse(&s)).unwrap_or(Status::Logged);

    Some(CrimeRecord {
        crime_type,
        location,
        date,
        status,
        coordinates: Some(jittered(settings, rng)),
    })
}

fn clean_field(raw: &str) -> String {
    let value = raw.trim();
    let value = value.strip_prefix('"').unwrap_or(value);
    let value = value.strip_suffix('"').unwrap_or(value);
    value.trim().to_string()
}

fn jittered<R: Rng>(settings: &ImportSettings, rng: &mut R) -> Coordinates {
    Coordinates {
        lat: settings.origin_lat + rng.gen::<f64>() * settings.jitter,
        lng: settings.origin_lng + rng.gen::<f64>() * settings.jitter,
    }
}
