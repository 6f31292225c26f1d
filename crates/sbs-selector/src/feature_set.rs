//! Ordered, duplicate-free column index sets.
use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SelectionError;

/// An ordered sequence of unique column indices into a feature matrix.
///
/// Sets are never edited in place: [`FeatureSet::without`] returns a new set,
/// so the set handed to one reduction level is never shared with the next.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct FeatureSet(Vec<usize>);

impl FeatureSet {
    /// The full index range `[0, n_features)`.
    pub fn full(n_features: usize) -> Self {
        FeatureSet((0..n_features).collect())
    }

    /// Build a set from caller-supplied indices, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::DuplicateFeature`] if an index is repeated.
    pub fn from_indices(indices: Vec<usize>) -> Result<Self, SelectionError> {
        let mut seen = HashSet::with_capacity(indices.len());
        for &index in &indices {
            if !seen.insert(index) {
                return Err(SelectionError::DuplicateFeature { index });
            }
        }
        Ok(FeatureSet(indices))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &usize> + '_ {
        self.0.iter()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    /// A new set with the element at `position` removed.
    ///
    /// # Panics
    ///
    /// Panics if `position >= self.len()`.
    pub fn without(&self, position: usize) -> FeatureSet {
        let mut indices = Vec::with_capacity(self.0.len().saturating_sub(1));
        indices.extend_from_slice(&self.0[..position]);
        indices.extend_from_slice(&self.0[position + 1..]);
        FeatureSet(indices)
    }

    /// Every set obtained by dropping exactly one element, paired with the
    /// dropped column index, in the order the elements appear in `self`.
    pub fn drop_one_candidates(&self) -> Vec<(usize, FeatureSet)> {
        (0..self.0.len())
            .map(|position| (self.0[position], self.without(position)))
            .collect()
    }

    pub fn is_subset_of(&self, other: &FeatureSet) -> bool {
        self.0.iter().all(|index| other.contains(*index))
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }
}

impl fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl TryFrom<Vec<usize>> for FeatureSet {
    type Error = SelectionError;

    fn try_from(indices: Vec<usize>) -> Result<Self, Self::Error> {
        FeatureSet::from_indices(indices)
    }
}

impl From<FeatureSet> for Vec<usize> {
    fn from(set: FeatureSet) -> Self {
        set.0
    }
}

impl AsRef<[usize]> for FeatureSet {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_set_covers_every_column() {
        let set = FeatureSet::full(4);
        assert_eq!(set.as_slice(), &[0, 1, 2, 3]);
        assert_eq!(set.len(), 4);
        assert!(FeatureSet::full(0).is_empty());
    }

    #[test]
    fn without_returns_a_new_set() {
        let set = FeatureSet::full(3);
        let reduced = set.without(1);
        assert_eq!(reduced.as_slice(), &[0, 2]);
        assert_eq!(set.as_slice(), &[0, 1, 2]);
        assert!(reduced.is_subset_of(&set));
        assert!(!set.is_subset_of(&reduced));
    }

    #[test]
    fn drop_one_candidates_follow_ascending_dropped_index() {
        let set = FeatureSet::from_indices(vec![1, 3, 4]).unwrap();
        let candidates = set.drop_one_candidates();
        let dropped: Vec<usize> = candidates.iter().map(|(d, _)| *d).collect();
        assert_eq!(dropped, vec![1, 3, 4]);
        assert_eq!(candidates[0].1.as_slice(), &[3, 4]);
        assert_eq!(candidates[1].1.as_slice(), &[1, 4]);
        assert_eq!(candidates[2].1.as_slice(), &[1, 3]);
    }

    #[test]
    fn duplicates_are_rejected() {
        let err = FeatureSet::from_indices(vec![0, 2, 2]).unwrap_err();
        assert!(matches!(err, SelectionError::DuplicateFeature { index: 2 }));
    }

    #[test]
    fn serializes_as_plain_array() {
        let set = FeatureSet::from_indices(vec![0, 2]).unwrap();
        assert_eq!(serde_json::to_string(&set).unwrap(), "[0,2]");
        assert_eq!(set.to_string(), "[0, 2]");
        let parsed: Result<FeatureSet, _> = serde_json::from_str("[1,1]");
        assert!(parsed.is_err());
    }

    #[test]
    #[should_panic]
    fn without_panics_past_the_end() {
        FeatureSet::full(2).without(2);
    }
}
