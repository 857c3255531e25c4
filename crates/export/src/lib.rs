//! Export helpers for JSON results and CSV runway rankings.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

/// Errors raised while writing exports.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod json {
    use std::io::Write;
    use std::path::Path;

    use chrono::{SecondsFormat, Utc};
    use serde::Serialize;
    use serde_json::to_writer_pretty;

    use super::{ExportError, writer_for_path};

    /// Wrapper stamped around every exported document.
    #[derive(Debug, Serialize)]
    pub struct Envelope<'a, T: Serialize> {
        pub kind: &'a str,
        pub generated_at: String,
        pub payload: &'a T,
    }

    impl<'a, T: Serialize> Envelope<'a, T> {
        pub fn new(kind: &'a str, payload: &'a T) -> Self {
            Self {
                kind,
                generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
                payload,
            }
        }
    }

    /// Write `payload` inside an [`Envelope`] as pretty JSON.
    pub fn write_to<T: Serialize>(
        writer: &mut dyn Write,
        kind: &str,
        payload: &T,
    ) -> Result<(), ExportError> {
        to_writer_pretty(&mut *writer, &Envelope::new(kind, payload))?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write the envelope to `path`, or stdout for `-`.
    pub fn write_path<T: Serialize>(path: &Path, kind: &str, payload: &T) -> Result<(), ExportError> {
        let mut writer = writer_for_path(path)?;
        write_to(writer.as_mut(), kind, payload)
    }
}

pub mod runways {
    use std::io::Write;
    use std::path::Path;

    use aeroperf_wind::RunwayAnalysis;
    use serde::Serialize;

    use super::{ExportError, writer_for_path};

    /// CSV row emitted by the runway ranking exporter.
    #[derive(Debug, Clone, Serialize)]
    pub struct Record<'a> {
        pub rank: usize,
        pub ident: &'a str,
        pub heading_deg: f64,
        pub surface: &'a str,
        pub headwind_kt: String,
        pub crosswind_kt: String,
        pub gust_crosswind_kt: Option<String>,
        pub crosswind_side: String,
        pub angle_diff_deg: String,
        pub category: String,
        pub tailwind: bool,
        pub score: String,
    }

    impl<'a> Record<'a> {
        pub fn from_analysis(rank: usize, analysis: &'a RunwayAnalysis) -> Self {
            Self {
                rank,
                ident: &analysis.ident,
                heading_deg: analysis.heading_deg,
                surface: analysis.surface.as_deref().unwrap_or(""),
                headwind_kt: format!("{:.1}", analysis.headwind_kt),
                crosswind_kt: format!("{:.1}", analysis.crosswind_kt),
                gust_crosswind_kt: analysis.gust_crosswind_kt.map(|g| format!("{g:.1}")),
                crosswind_side: analysis.crosswind_side.to_string(),
                angle_diff_deg: format!("{:.1}", analysis.angle_diff_deg),
                category: analysis.category.to_string(),
                tailwind: analysis.is_tailwind,
                score: format!("{:.2}", analysis.score),
            }
        }
    }

    /// Write ranked runway ends as CSV with a header row, best first.
    pub fn write_to(writer: &mut dyn Write, runways: &[RunwayAnalysis]) -> Result<(), ExportError> {
        let mut csv = csv::Writer::from_writer(writer);
        for (index, analysis) in runways.iter().enumerate() {
            csv.serialize(Record::from_analysis(index + 1, analysis))?;
        }
        csv.flush()?;
        Ok(())
    }

    /// Write the ranking to `path`, or stdout for `-`.
    pub fn write_path(path: &Path, runways: &[RunwayAnalysis]) -> Result<(), ExportError> {
        let mut writer = writer_for_path(path)?;
        write_to(writer.as_mut(), runways)
    }
}
