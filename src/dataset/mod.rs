pub(crate) mod loader;
pub(crate) mod types;

pub use loader::{DatasetLoader, DatasetSource, LoadError};
pub use types::{Dataset, SampleRecord, SubjectId, SubjectProfile};
