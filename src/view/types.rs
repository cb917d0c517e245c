/// Top-N taxon observations, reshaped for a horizontal bar panel: reversed so
/// the largest value renders at the top, ids formatted as display labels.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSeries {
    /// Display labels, "OTU {id}".
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    /// Taxon descriptions, shown as hover text.
    pub hover: Vec<String>,
}

impl RankedSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The complete, unfiltered observation set for the bubble panel. Position is
/// (otu_id, value); value also drives marker size and otu_id marker color.
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleSeries {
    pub otu_ids: Vec<u64>,
    pub values: Vec<f64>,
    pub labels: Vec<String>,
}

/// Everything the panels need for one subject. Recomputed on every selection
/// change, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub ranked: RankedSeries,
    pub bubble: BubbleSeries,
    /// Wash frequency, passed through unclamped.
    pub gauge: f64,
    /// (field name, field value) pairs in the profile's declared order.
    pub metadata: Vec<(String, String)>,
}
