pub(crate) mod figures;
pub(crate) mod host;
pub(crate) mod types;

pub use host::JsonPanelHost;
pub use types::{Figure, PanelError, PanelHost, PanelTarget, Restyle};
