use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use log::info;
use thiserror::Error;

use super::types::{Dataset, SubjectId};

/// Where the dataset JSON comes from: the hosted document, or a local copy.
#[derive(Debug, Clone)]
pub enum DatasetSource {
    Url(String),
    File(PathBuf),
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::Url(url) => write!(f, "{}", url),
            DatasetSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to fetch dataset from {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read dataset file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed dataset JSON")]
    Parse(#[from] serde_json::Error),

    #[error("sample {id} has misaligned sequences ({ids} ids, {values} values, {labels} labels)")]
    MisalignedSample {
        id: SubjectId,
        ids: usize,
        values: usize,
        labels: usize,
    },

    #[error("more than one metadata record for subject {0}")]
    DuplicateProfile(SubjectId),

    #[error("more than one sample record for subject {0}")]
    DuplicateSample(SubjectId),
}

/// Loads and validates the dataset. One fetch per page session; there is no
/// retry policy, a failed load leaves the dashboard uninitialized.
pub struct DatasetLoader {
    client: reqwest::Client,
}

impl DatasetLoader {
    pub fn new() -> Self {
        DatasetLoader {
            client: reqwest::Client::new(),
        }
    }

    pub async fn load(&self, source: &DatasetSource) -> Result<Dataset, LoadError> {
        let body = match source {
            DatasetSource::Url(url) => self.fetch(url).await?,
            DatasetSource::File(path) => {
                std::fs::read_to_string(path).map_err(|source| LoadError::Read {
                    path: path.clone(),
                    source,
                })?
            }
        };

        let dataset = parse(&body)?;
        info!(
            "Loaded dataset: {} subjects, {} metadata records, {} sample records",
            dataset.names.len(),
            dataset.metadata.len(),
            dataset.samples.len()
        );
        Ok(dataset)
    }

    async fn fetch(&self, url: &str) -> Result<String, LoadError> {
        let fetch_err = |source| LoadError::Fetch {
            url: url.to_string(),
            source,
        };

        self.client
            .get(url)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(fetch_err)?
            .text()
            .await
            .map_err(fetch_err)
    }
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a dataset document and check its shape invariants: every sample's
/// three sequences aligned, at most one metadata and one sample record per
/// subject id.
fn parse(body: &str) -> Result<Dataset, LoadError> {
    let dataset: Dataset = serde_json::from_str(body)?;

    for sample in &dataset.samples {
        if !sample.is_aligned() {
            return Err(LoadError::MisalignedSample {
                id: sample.id,
                ids: sample.otu_ids.len(),
                values: sample.sample_values.len(),
                labels: sample.otu_labels.len(),
            });
        }
    }

    let mut seen = HashSet::new();
    for profile in &dataset.metadata {
        if !seen.insert(profile.id) {
            return Err(LoadError::DuplicateProfile(profile.id));
        }
    }

    seen.clear();
    for sample in &dataset.samples {
        if !seen.insert(sample.id) {
            return Err(LoadError::DuplicateSample(sample.id));
        }
    }

    Ok(dataset)
}
