//! Writers for reduction results.

use crate::Result;
use pointreduce_core::Reduction;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writer for reduction output.
///
/// Writes the weighted points of a [`Reduction`] in various formats.
pub struct ReductionWriter<W: Write> {
    writer: W,
}

impl ReductionWriter<BufWriter<File>> {
    /// Creates a new file writer.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> ReductionWriter<W> {
    /// Wraps an existing writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes the weighted points as CSV with an `x,y,weight` header.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_csv(&mut self, reduction: &Reduction) -> Result<()> {
        writeln!(self.writer, "x,y,weight")?;
        for wp in &reduction.clusters {
            writeln!(self.writer, "{},{},{}", wp.x, wp.y, wp.weight)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Writes the whole reduction as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if serialization or writing fails.
    pub fn write_json(&mut self, reduction: &Reduction) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, reduction)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Writes the weighted points as binary records.
    ///
    /// Format: for each cluster f64 (x) + f64 (y) + u64 (weight), little endian.
    /// Total: 24 bytes per cluster
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_binary(&mut self, reduction: &Reduction) -> Result<()> {
        for wp in &reduction.clusters {
            self.writer.write_all(&wp.x.to_le_bytes())?;
            self.writer.write_all(&wp.y.to_le_bytes())?;
            self.writer.write_all(&wp.weight.to_le_bytes())?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Writes a human-readable summary, one line per cluster.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_report(&mut self, reduction: &Reduction) -> Result<()> {
        writeln!(self.writer, "Clusters found: {}", reduction.len())?;
        for (i, wp) in reduction.clusters.iter().enumerate() {
            writeln!(
                self.writer,
                "Cluster {}: ({}, {}) weight: {}",
                i + 1,
                wp.x,
                wp.y,
                wp.weight
            )?;
        }
        writeln!(
            self.writer,
            "Total points represented: {}",
            reduction.total_weight()
        )?;
        if reduction.dropped > 0 {
            writeln!(
                self.writer,
                "Points dropped: {} of {}",
                reduction.dropped, reduction.input_len
            )?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Unwraps the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
