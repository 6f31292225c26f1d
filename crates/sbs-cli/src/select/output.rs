use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use sbs_selector::SelectionResult;

use crate::select::load_data::TabularData;
use crate::util::{delimiter_for, lowercase_extension};

/// One selection level with column headers alongside the indices.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedRecord {
    pub feature_size: usize,
    pub score: f64,
    pub features: Vec<usize>,
    pub feature_names: Vec<String>,
}

pub fn named_records(result: &SelectionResult, data: &TabularData) -> Vec<NamedRecord> {
    result
        .iter()
        .map(|record| NamedRecord {
            feature_size: record.feature_count(),
            score: record.score(),
            features: record.features().as_slice().to_vec(),
            feature_names: data.names_for(record.features().as_slice()),
        })
        .collect()
}

/// Write the records as JSON to stdout, or to `output_path`: CSV/TSV for
/// `.csv`/`.tsv` files, JSON otherwise.
pub fn write_selection_output(
    result: &SelectionResult,
    data: &TabularData,
    output_path: Option<&Path>,
) -> Result<()> {
    let records = named_records(result, data);

    let Some(path) = output_path else {
        return write_json(&records, std::io::stdout().lock());
    };

    let file = File::create(path).with_context(|| format!("Failed to create output file: {:?}", path))?;
    let writer = BufWriter::new(file);

    let written = match lowercase_extension(path).as_deref() {
        Some("csv") | Some("tsv") => write_delimited(&records, writer, delimiter_for(path)),
        _ => write_json(&records, writer),
    };
    written.with_context(|| format!("Failed to write selection output: {:?}", path))?;

    log::info!("Wrote {} selection levels to {:?}", records.len(), path);
    Ok(())
}

fn write_json<W: Write>(records: &[NamedRecord], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn write_delimited<W: Write>(records: &[NamedRecord], writer: W, delimiter: u8) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    wtr.write_record(["feature_size", "score", "features", "feature_names"])?;
    for record in records {
        let features = record
            .features
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(";");
        wtr.write_record([
            record.feature_size.to_string(),
            record.score.to_string(),
            features,
            record.feature_names.join(";"),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
