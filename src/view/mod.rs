pub(crate) mod builder;
pub(crate) mod types;

pub use builder::{build, ViewError, RANKED_TOP_N};
pub use types::{BubbleSeries, RankedSeries, ViewModel};
