use thiserror::Error;

use super::types::{BubbleSeries, RankedSeries, ViewModel};
use crate::dataset::{SampleRecord, SubjectId, SubjectProfile};

/// How many taxa the ranked bar panel shows.
pub const RANKED_TOP_N: usize = 10;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ViewError {
    #[error("subject {0} has no recorded wash frequency")]
    MissingWashFrequency(SubjectId),
}

/// Derive the three chart projections plus the metadata list for one subject.
/// Pure; no I/O.
///
/// The sample's sequences are pre-sorted by value descending, so the ranked
/// series is a slice of the leading entries, reversed in lockstep so the
/// largest value lands last (horizontal bars render bottom-up).
pub fn build(profile: &SubjectProfile, sample: &SampleRecord) -> Result<ViewModel, ViewError> {
    let gauge = profile
        .wfreq
        .ok_or(ViewError::MissingWashFrequency(profile.id))?;

    let top = RANKED_TOP_N.min(sample.len());
    let mut labels: Vec<String> = sample.otu_ids[..top]
        .iter()
        .map(|id| format!("OTU {}", id))
        .collect();
    let mut values = sample.sample_values[..top].to_vec();
    let mut hover = sample.otu_labels[..top].to_vec();
    labels.reverse();
    values.reverse();
    hover.reverse();

    Ok(ViewModel {
        ranked: RankedSeries {
            labels,
            values,
            hover,
        },
        bubble: BubbleSeries {
            otu_ids: sample.otu_ids.clone(),
            values: sample.sample_values.clone(),
            labels: sample.otu_labels.clone(),
        },
        gauge,
        metadata: profile.field_pairs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn profile(wfreq: Option<f64>) -> SubjectProfile {
        SubjectProfile {
            id: SubjectId::new(940),
            ethnicity: Some("Caucasian".to_string()),
            gender: Some("F".to_string()),
            age: Some(24),
            location: None,
            bbtype: Some("I".to_string()),
            wfreq,
        }
    }

    fn sample(count: usize) -> SampleRecord {
        // Descending values, the order the source guarantees.
        SampleRecord {
            id: SubjectId::new(940),
            otu_ids: (1..=count as u64).collect(),
            sample_values: (0..count).map(|i| 100.0 - i as f64 * 5.0).collect(),
            otu_labels: (1..=count).map(|i| format!("taxon-{}", i)).collect(),
        }
    }

    #[test]
    fn test_ranked_series_short_sample() {
        let model = build(&profile(Some(8.0)), &sample(3)).unwrap();

        // All three entries, reversed: smallest first, largest last.
        assert_eq!(model.ranked.len(), 3);
        assert_eq!(model.ranked.values, vec![90.0, 95.0, 100.0]);
        assert_eq!(model.ranked.labels, vec!["OTU 3", "OTU 2", "OTU 1"]);
        assert_eq!(model.ranked.hover, vec!["taxon-3", "taxon-2", "taxon-1"]);
    }

    #[test]
    fn test_ranked_series_caps_at_top_ten() {
        let model = build(&profile(Some(8.0)), &sample(25)).unwrap();

        assert_eq!(model.ranked.len(), RANKED_TOP_N);
        // Leading ten of the descending data, so after reversal the series
        // is non-decreasing and ends at the overall maximum.
        let mut sorted = model.ranked.values.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(model.ranked.values, sorted);
        assert_eq!(*model.ranked.values.last().unwrap(), 100.0);
        assert_eq!(model.ranked.labels[9], "OTU 1");
    }

    #[test]
    fn test_bubble_series_is_full_passthrough() {
        let record = sample(25);
        let model = build(&profile(Some(8.0)), &record).unwrap();

        assert_eq!(model.bubble.otu_ids, record.otu_ids);
        assert_eq!(model.bubble.values, record.sample_values);
        assert_eq!(model.bubble.labels, record.otu_labels);
    }

    #[test]
    fn test_gauge_passes_value_through_unclamped() {
        let model = build(&profile(Some(13.5)), &sample(1)).unwrap();
        assert_eq!(model.gauge, 13.5);
    }

    #[test]
    fn test_missing_wash_frequency_is_an_error() {
        assert_eq!(
            build(&profile(None), &sample(1)),
            Err(ViewError::MissingWashFrequency(SubjectId::new(940)))
        );
    }

    #[test]
    fn test_metadata_covers_present_fields() {
        let model = build(&profile(Some(8.0)), &sample(1)).unwrap();

        // `location` is absent on this profile, everything else present.
        let names: Vec<&str> = model.metadata.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["id", "ethnicity", "gender", "age", "bbtype", "wfreq"]);
    }

    #[test]
    fn test_empty_sample_yields_empty_series() {
        let model = build(&profile(Some(8.0)), &sample(0)).unwrap();
        assert!(model.ranked.is_empty());
        assert!(model.bubble.otu_ids.is_empty());
    }
}
