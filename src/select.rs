use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::dataset::{Dataset, SampleRecord, SubjectId, SubjectProfile};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no record found for subject {0}")]
    NotFound(SubjectId),

    #[error("subject {0} matches more than one record")]
    Ambiguous(SubjectId),
}

/// Precomputed id -> position lookup over a dataset's metadata and sample
/// collections. Exactly one record per id is expected; a duplicated id is
/// remembered and reported as `Ambiguous` at resolution time instead of
/// silently taking the first match.
pub struct SelectorIndex {
    profiles: HashMap<SubjectId, usize>,
    samples: HashMap<SubjectId, usize>,
    ambiguous_profiles: HashSet<SubjectId>,
    ambiguous_samples: HashSet<SubjectId>,
}

impl SelectorIndex {
    pub fn build(dataset: &Dataset) -> Self {
        let mut profiles = HashMap::new();
        let mut ambiguous_profiles = HashSet::new();
        for (idx, profile) in dataset.metadata.iter().enumerate() {
            if profiles.insert(profile.id, idx).is_some() {
                ambiguous_profiles.insert(profile.id);
            }
        }

        let mut samples = HashMap::new();
        let mut ambiguous_samples = HashSet::new();
        for (idx, sample) in dataset.samples.iter().enumerate() {
            if samples.insert(sample.id, idx).is_some() {
                ambiguous_samples.insert(sample.id);
            }
        }

        SelectorIndex {
            profiles,
            samples,
            ambiguous_profiles,
            ambiguous_samples,
        }
    }

    /// Resolve the metadata record for a subject.
    pub fn resolve_profile<'a>(
        &self,
        dataset: &'a Dataset,
        key: SubjectId,
    ) -> Result<&'a SubjectProfile, SelectionError> {
        if self.ambiguous_profiles.contains(&key) {
            return Err(SelectionError::Ambiguous(key));
        }
        self.profiles
            .get(&key)
            .map(|&idx| &dataset.metadata[idx])
            .ok_or(SelectionError::NotFound(key))
    }

    /// Resolve the sample record for a subject.
    pub fn resolve_sample<'a>(
        &self,
        dataset: &'a Dataset,
        key: SubjectId,
    ) -> Result<&'a SampleRecord, SelectionError> {
        if self.ambiguous_samples.contains(&key) {
            return Err(SelectionError::Ambiguous(key));
        }
        self.samples
            .get(&key)
            .map(|&idx| &dataset.samples[idx])
            .ok_or(SelectionError::NotFound(key))
    }
}
