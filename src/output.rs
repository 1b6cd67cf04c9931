// src/output.rs

use anyhow::{Context, Result};
use clap::ValueEnum;
use std::io::Write;

use crate::dataset::UnifiedDataset;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Comma-separated, header row first, blanks for missing values.
    #[default]
    Csv,
    /// `{"columns": [...], "rows": [[...]]}` with `null` for missing values.
    Json,
}

pub fn write_dataset<W: Write>(dataset: &UnifiedDataset, format: OutputFormat, out: W) -> Result<()> {
    match format {
        OutputFormat::Csv => write_csv(dataset, out),
        OutputFormat::Json => write_json(dataset, out),
    }
}

pub fn write_csv<W: Write>(dataset: &UnifiedDataset, out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(&dataset.columns)
        .context("writing CSV header")?;
    for row in &dataset.rows {
        wtr.write_record(row.iter().map(|c| c.as_deref().unwrap_or("")))
            .context("writing CSV row")?;
    }
    wtr.flush().context("flushing CSV output")?;
    Ok(())
}

pub fn write_json<W: Write>(dataset: &UnifiedDataset, mut out: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, dataset).context("writing JSON output")?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
