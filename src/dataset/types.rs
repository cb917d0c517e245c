use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Canonical key for one individual in the dataset.
///
/// The source JSON is inconsistent about key representation: `names` holds
/// numeric strings, `metadata.id` holds integers, and `samples.id` holds
/// strings again. Every inbound key (JSON field or CLI argument) is
/// normalized to an integer here, so lookups everywhere else are plain
/// equality instead of loose cross-type comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubjectId(i64);

impl SubjectId {
    pub fn new(id: i64) -> Self {
        SubjectId(id)
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SubjectId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(SubjectId)
    }
}

impl Serialize for SubjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for SubjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl<'de> Visitor<'de> for KeyVisitor {
            type Value = SubjectId;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an integer key or a numeric string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<SubjectId, E> {
                Ok(SubjectId(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<SubjectId, E> {
                i64::try_from(v)
                    .map(SubjectId)
                    .map_err(|_| E::custom(format!("subject id {} out of range", v)))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<SubjectId, E> {
                v.parse()
                    .map_err(|_| E::custom(format!("subject id {:?} is not numeric", v)))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}

/// Metadata record for one individual.
///
/// Field presence varies per record in the source data, so every field
/// except `id` is optional; an absent field is simply absent from the
/// rendered metadata list rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectProfile {
    pub id: SubjectId,
    pub ethnicity: Option<String>,
    pub gender: Option<String>,
    pub age: Option<u32>,
    pub location: Option<String>,
    pub bbtype: Option<String>,
    /// Belly button wash frequency, scrubs per week (nominally 0-10).
    pub wfreq: Option<f64>,
}

impl SubjectProfile {
    /// Present fields as (name, value) string pairs, in declared order.
    pub fn field_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("id".to_string(), self.id.to_string())];
        if let Some(v) = &self.ethnicity {
            pairs.push(("ethnicity".to_string(), v.clone()));
        }
        if let Some(v) = &self.gender {
            pairs.push(("gender".to_string(), v.clone()));
        }
        if let Some(v) = self.age {
            pairs.push(("age".to_string(), v.to_string()));
        }
        if let Some(v) = &self.location {
            pairs.push(("location".to_string(), v.clone()));
        }
        if let Some(v) = &self.bbtype {
            pairs.push(("bbtype".to_string(), v.clone()));
        }
        if let Some(v) = self.wfreq {
            pairs.push(("wfreq".to_string(), v.to_string()));
        }
        pairs
    }
}

/// OTU observations for one individual.
///
/// The three sequences are index-aligned (entry *i* of each describes the
/// same taxon) and arrive pre-sorted by `sample_values` descending; the
/// dashboard only ever slices them, it never re-sorts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub id: SubjectId,
    pub otu_ids: Vec<u64>,
    pub sample_values: Vec<f64>,
    pub otu_labels: Vec<String>,
}

impl SampleRecord {
    /// Number of taxon observations in this record.
    pub fn len(&self) -> usize {
        self.otu_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.otu_ids.is_empty()
    }

    pub fn is_aligned(&self) -> bool {
        self.otu_ids.len() == self.sample_values.len()
            && self.otu_ids.len() == self.otu_labels.len()
    }
}

/// The full dataset as served by the data source: selectable keys, one
/// metadata record per individual, one sample record per individual.
/// Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub names: Vec<SubjectId>,
    pub metadata: Vec<SubjectProfile>,
    pub samples: Vec<SampleRecord>,
}
