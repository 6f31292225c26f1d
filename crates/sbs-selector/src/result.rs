//! Per-level records of a selection run.
use std::io::Write;

use serde::Serialize;

use crate::feature_set::FeatureSet;

/// The best subset found for one feature count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRecord {
    #[serde(rename = "featureSize")]
    feature_count: usize,
    score: f64,
    features: FeatureSet,
}

impl ScoreRecord {
    pub(crate) fn new(score: f64, features: FeatureSet) -> Self {
        ScoreRecord {
            feature_count: features.len(),
            score,
            features,
        }
    }

    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }
}

/// Ordered records of a completed run, from the full feature count down to
/// the configured floor.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SelectionResult {
    records: Vec<ScoreRecord>,
}

impl SelectionResult {
    pub(crate) fn with_capacity(levels: usize) -> Self {
        SelectionResult {
            records: Vec::with_capacity(levels),
        }
    }

    pub(crate) fn push(&mut self, record: ScoreRecord) {
        debug_assert!(self
            .records
            .last()
            .map_or(true, |last| last.feature_count == record.feature_count + 1));
        self.records.push(record);
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoreRecord> {
        self.records.iter()
    }

    /// The record for subsets of exactly `feature_count` features.
    pub fn for_size(&self, feature_count: usize) -> Option<&ScoreRecord> {
        self.records
            .iter()
            .find(|record| record.feature_count == feature_count)
    }

    /// The highest-scoring record. Ties keep the larger subset.
    pub fn best(&self) -> Option<&ScoreRecord> {
        self.records.iter().fold(None, |best: Option<&ScoreRecord>, record| match best {
            Some(current) if current.score >= record.score => Some(current),
            _ => Some(record),
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write `feature_size,score,features` rows; features are `;`-separated.
    pub fn write_csv<W: Write>(&self, writer: W) -> csv::Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["feature_size", "score", "features"])?;
        for record in &self.records {
            let features = record
                .features
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join(";");
            wtr.write_record([
                record.feature_count.to_string(),
                record.score.to_string(),
                features,
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a SelectionResult {
    type Item = &'a ScoreRecord;
    type IntoIter = std::slice::Iter<'a, ScoreRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
