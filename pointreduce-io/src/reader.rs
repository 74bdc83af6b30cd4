//! Point batch readers.
//!

use crate::{Error, Result};
use pointreduce_core::Point;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// On-disk encodings of a point batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointFormat {
    /// One `x,y` pair per line.
    Csv,
    /// Array of `{"x": .., "y": ..}` objects or `[x, y]` pairs.
    Json,
}

impl PointFormat {
    /// Picks the format from a file extension (`csv`, `txt` or `json`).
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedFormat`] for any other extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "csv" | "txt" => Ok(PointFormat::Csv),
            "json" => Ok(PointFormat::Json),
            _ => Err(Error::UnsupportedFormat(path.as_ref().display().to_string())),
        }
    }
}

/// Reads a point batch, choosing the format from the file extension.
///
/// # Errors
/// Returns an error if the file cannot be read, has an unknown extension or
/// contains malformed data.
pub fn read_points<P: AsRef<Path>>(path: P) -> Result<Vec<Point>> {
    let format = PointFormat::from_path(&path)?;
    let content = fs::read_to_string(&path)?;
    match format {
        PointFormat::Csv => parse_csv_points(&content),
        PointFormat::Json => parse_json_points(&content),
    }
}

/// Parses `x,y` lines.
///
/// Blank lines and lines starting with `#` are ignored. The first data line
/// is treated as a header when neither of its fields is a number. Columns
/// after the second are ignored.
///
/// # Errors
/// Returns [`Error::Parse`] with the 1-based line number of the first bad line.
pub fn parse_csv_points(content: &str) -> Result<Vec<Point>> {
    let mut points = Vec::new();
    let mut seen_data = false;

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split(',').map(str::trim);
        let (Some(fx), Some(fy)) = (fields.next(), fields.next()) else {
            return Err(Error::Parse {
                line: idx + 1,
                message: format!("expected two comma-separated values, got {line:?}"),
            });
        };

        match (fx.parse::<f64>(), fy.parse::<f64>()) {
            (Ok(x), Ok(y)) => points.push(Point::new(x, y)),
            (Err(_), Err(_)) if !seen_data => {}
            (Err(err), _) | (_, Err(err)) => {
                return Err(Error::Parse {
                    line: idx + 1,
                    message: format!("{err} in {line:?}"),
                });
            }
        }
        seen_data = true;
    }

    Ok(points)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonPoint {
    Object { x: f64, y: f64 },
    Pair([f64; 2]),
}

impl From<JsonPoint> for Point {
    fn from(value: JsonPoint) -> Self {
        match value {
            JsonPoint::Object { x, y } | JsonPoint::Pair([x, y]) => Point::new(x, y),
        }
    }
}

/// Parses a JSON array of points.
///
/// # Errors
/// Returns [`Error::Json`] if the document is not an array of points.
pub fn parse_json_points(content: &str) -> Result<Vec<Point>> {
    let raw: Vec<JsonPoint> = serde_json::from_str(content)?;
    Ok(raw.into_iter().map(Point::from).collect())
}
