use std::collections::HashMap;
use std::fs::{create_dir_all, File};
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};
use serde_json::{Map, Value};

use super::types::{Figure, PanelError, PanelHost, PanelTarget, Restyle};

/// A panel host that keeps each figure as JSON and applies restyle patches
/// onto the stored trace, the way a Plotly `restyle` call would. Used by the
/// CLI to write figures out, and by tests to observe rendered state.
#[derive(Debug, Default)]
pub struct JsonPanelHost {
    panels: HashMap<PanelTarget, PanelState>,
    metadata: Vec<(String, String)>,
}

#[derive(Debug)]
struct PanelState {
    figure: Figure,
    restyles: u32,
}

impl JsonPanelHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn figure(&self, target: PanelTarget) -> Option<&Figure> {
        self.panels.get(&target).map(|state| &state.figure)
    }

    /// How many restyle patches a panel has absorbed since creation.
    pub fn restyle_count(&self, target: PanelTarget) -> u32 {
        self.panels.get(&target).map_or(0, |state| state.restyles)
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    pub fn metadata(&self) -> &[(String, String)] {
        &self.metadata
    }

    /// Write each figure and the metadata list to `dir` as JSON files, one
    /// per panel, named after the panel container ids.
    pub fn write_to_dir(&self, dir: &Path) -> Result<()> {
        create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

        for target in PanelTarget::ALL {
            let Some(state) = self.panels.get(&target) else {
                continue;
            };
            let path = dir.join(format!("{}.json", target.as_str()));
            let file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            serde_json::to_writer_pretty(file, &state.figure)?;
            info!("Wrote {} figure to {}", target, path.display());
        }

        let path = dir.join("metadata.json");
        let file =
            File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &self.metadata)?;
        info!("Wrote metadata to {}", path.display());

        Ok(())
    }
}

impl PanelHost for JsonPanelHost {
    fn create(&mut self, target: PanelTarget, figure: Figure) -> Result<(), PanelError> {
        if self.panels.contains_key(&target) {
            return Err(PanelError::AlreadyCreated(target));
        }
        debug!("Creating {} panel", target);
        self.panels.insert(target, PanelState { figure, restyles: 0 });
        Ok(())
    }

    fn restyle(&mut self, target: PanelTarget, patch: Restyle) -> Result<(), PanelError> {
        let state = self
            .panels
            .get_mut(&target)
            .ok_or(PanelError::NoSuchPanel(target))?;

        let trace = state
            .figure
            .data
            .first_mut()
            .ok_or(PanelError::NoTraces(target))?;
        for (path, value) in &patch {
            set_attribute(trace, path, unwrap_per_trace(value));
        }

        state.restyles += 1;
        debug!("Restyled {} panel ({} attributes)", target, patch.len());
        Ok(())
    }

    fn replace_metadata(&mut self, pairs: &[(String, String)]) -> Result<(), PanelError> {
        // Remove-all-then-append: every call fully replaces the list.
        self.metadata.clear();
        self.metadata.extend_from_slice(pairs);
        Ok(())
    }
}

/// Restyle wraps per-trace values in a one-element array; a scalar applies
/// as-is.
fn unwrap_per_trace(value: &Value) -> Value {
    match value {
        Value::Array(items) if items.len() == 1 => items[0].clone(),
        other => other.clone(),
    }
}

/// Set a possibly-dotted attribute path (e.g. `marker.size`) on a trace,
/// creating intermediate objects as needed.
fn set_attribute(trace: &mut Value, path: &str, value: Value) {
    let mut parts: Vec<&str> = path.split('.').collect();
    let Some(last) = parts.pop() else {
        return;
    };

    let mut node = trace;
    for part in parts {
        let Value::Object(map) = node else {
            return;
        };
        node = map
            .entry(part.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    if let Value::Object(map) = node {
        map.insert(last.to_string(), value);
    }
}
