use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use ndarray::{Array1, Array2};

use crate::util::delimiter_for;

/// A numeric table split into a feature matrix and a target column.
#[derive(Debug, Clone)]
pub struct TabularData {
    /// Header of every feature column, in matrix column order.
    pub feature_names: Vec<String>,
    pub target_name: String,
    pub x: Array2<f64>,
    pub y: Array1<f64>,
}

impl TabularData {
    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// Column headers for a list of feature indices.
    pub fn names_for(&self, indices: &[usize]) -> Vec<String> {
        indices
            .iter()
            .map(|&i| {
                self.feature_names
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("feature_{}", i))
            })
            .collect()
    }
}

/// Load a CSV or TSV file with a header row. Every cell must parse as a
/// number. `target_column` names the target; the last column is used when it
/// is `None`.
pub fn load_tabular_data<P: AsRef<Path>>(
    path: P,
    target_column: Option<&str>,
) -> Result<TabularData> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;

    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter_for(path))
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let headers = rdr
        .headers()
        .with_context(|| format!("Failed to read header row: {:?}", path))?
        .clone();
    if headers.len() < 2 {
        bail!(
            "Expected at least one feature column and a target column, found {} column(s) in {:?}",
            headers.len(),
            path
        );
    }

    let target_idx = match target_column {
        Some(name) => headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("Target column '{}' not found in {:?}", name, path))?,
        None => headers.len() - 1,
    };

    let feature_names: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != target_idx)
        .map(|(_, h)| h.to_string())
        .collect();
    let n_features = feature_names.len();

    let mut values = Vec::new();
    let mut targets = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row + 1))?;
        for (col, field) in record.iter().enumerate() {
            let value: f64 = field.parse().with_context(|| {
                format!(
                    "Row {}, column '{}': cannot parse '{}' as a number",
                    row + 1,
                    headers.get(col).unwrap_or("?"),
                    field
                )
            })?;
            if col == target_idx {
                targets.push(value);
            } else {
                values.push(value);
            }
        }
    }

    let n_samples = targets.len();
    let x = Array2::from_shape_vec((n_samples, n_features), values)
        .context("Rows have inconsistent column counts")?;

    log::info!(
        "Loaded {} rows x {} feature columns from {:?} (target: '{}')",
        n_samples,
        n_features,
        path,
        &headers[target_idx]
    );

    Ok(TabularData {
        feature_names,
        target_name: headers[target_idx].to_string(),
        x,
        y: Array1::from_vec(targets),
    })
}
