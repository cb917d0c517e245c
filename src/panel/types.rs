use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// The three chart panel targets. `as_str` gives the container id each panel
/// renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelTarget {
    Ranked,
    Bubble,
    Gauge,
}

impl PanelTarget {
    pub const ALL: [PanelTarget; 3] = [PanelTarget::Ranked, PanelTarget::Bubble, PanelTarget::Gauge];

    pub fn as_str(&self) -> &'static str {
        match self {
            PanelTarget::Ranked => "bar",
            PanelTarget::Bubble => "bubble",
            PanelTarget::Gauge => "gauge",
        }
    }
}

impl fmt::Display for PanelTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Plotly-shaped figure: a list of traces, a layout, and a config.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Value>,
    pub layout: Value,
    pub config: Value,
}

/// An in-place patch in Plotly restyle shape: attribute paths (possibly
/// dotted, e.g. `marker.size`) mapped to per-trace value arrays or scalars.
pub type Restyle = Map<String, Value>;

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("panel {0} already exists")]
    AlreadyCreated(PanelTarget),

    #[error("panel {0} has not been created")]
    NoSuchPanel(PanelTarget),

    #[error("panel {0} has no trace to restyle")]
    NoTraces(PanelTarget),
}

/// Rendering collaborator for the dashboard: three chart panels plus the
/// metadata container. `create` is first paint; `restyle` patches an
/// existing panel in place without recreating it; `replace_metadata` fully
/// replaces the rendered (name, value) list.
pub trait PanelHost {
    fn create(&mut self, target: PanelTarget, figure: Figure) -> Result<(), PanelError>;

    fn restyle(&mut self, target: PanelTarget, patch: Restyle) -> Result<(), PanelError>;

    fn replace_metadata(&mut self, pairs: &[(String, String)]) -> Result<(), PanelError>;
}
