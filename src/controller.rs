use log::{debug, info};
use thiserror::Error;

use crate::dataset::{Dataset, SubjectId};
use crate::panel::{figures, PanelError, PanelHost, PanelTarget};
use crate::select::{SelectionError, SelectorIndex};
use crate::view::{self, ViewError, ViewModel};

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("dashboard has already been rendered")]
    AlreadyRendered,

    #[error("dashboard has not been rendered yet")]
    NotRendered,

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    View(#[from] ViewError),

    #[error(transparent)]
    Panel(#[from] PanelError),
}

/// Keeps the three chart panels and the metadata list in sync with the
/// selected subject.
///
/// Two states: uninitialized (no panels exist) until `render_initial`
/// succeeds once, rendered thereafter. Every later selection change goes
/// through `update`, which patches the existing panels in place; panel
/// identity never changes after first paint.
pub struct Dashboard<H: PanelHost> {
    dataset: Dataset,
    index: SelectorIndex,
    host: H,
    current: Option<SubjectId>,
}

impl<H: PanelHost> Dashboard<H> {
    pub fn new(dataset: Dataset, host: H) -> Self {
        let index = SelectorIndex::build(&dataset);
        Dashboard {
            dataset,
            index,
            host,
            current: None,
        }
    }

    /// The subject rendered first when none is asked for: the leading entry
    /// of `names`, matching the dropdown's initial position.
    pub fn default_subject(&self) -> Option<SubjectId> {
        self.dataset.names.first().copied()
    }

    /// The currently rendered subject, if the first paint has happened.
    pub fn current(&self) -> Option<SubjectId> {
        self.current
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// First paint: create all three panels and the metadata list for `key`.
    pub fn render_initial(&mut self, key: SubjectId) -> Result<(), DashboardError> {
        if self.current.is_some() {
            return Err(DashboardError::AlreadyRendered);
        }

        let model = self.view_model(key)?;
        self.host
            .create(PanelTarget::Ranked, figures::ranked_figure(&model.ranked))?;
        self.host
            .create(PanelTarget::Bubble, figures::bubble_figure(&model.bubble))?;
        self.host
            .create(PanelTarget::Gauge, figures::gauge_figure(model.gauge))?;
        self.host.replace_metadata(&model.metadata)?;

        self.current = Some(key);
        info!("Initial render complete for subject {}", key);
        Ok(())
    }

    /// Selection change: restyle the existing panels for `key` and rebuild
    /// the metadata list.
    pub fn update(&mut self, key: SubjectId) -> Result<(), DashboardError> {
        if self.current.is_none() {
            return Err(DashboardError::NotRendered);
        }

        // Resolve and derive before touching any panel, so a bad key leaves
        // the rendered state exactly as it was.
        let model = self.view_model(key)?;

        self.host
            .restyle(PanelTarget::Ranked, figures::ranked_restyle(&model.ranked))?;
        self.host
            .restyle(PanelTarget::Bubble, figures::bubble_restyle(&model.bubble))?;
        self.host
            .restyle(PanelTarget::Gauge, figures::gauge_restyle(model.gauge))?;
        self.host.replace_metadata(&model.metadata)?;

        self.current = Some(key);
        debug!("Panels updated for subject {}", key);
        Ok(())
    }

    fn view_model(&self, key: SubjectId) -> Result<ViewModel, DashboardError> {
        let profile = self.index.resolve_profile(&self.dataset, key)?;
        let sample = self.index.resolve_sample(&self.dataset, key)?;
        Ok(view::build(profile, sample)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::JsonPanelHost;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn dataset() -> Dataset {
        serde_json::from_value(json!({
            "names": ["940", "941"],
            "metadata": [
                {"id": 940, "ethnicity": "Caucasian", "gender": "F", "age": 24,
                 "location": "Beaufort/NC", "bbtype": "I", "wfreq": 8.0},
                {"id": 941, "ethnicity": "Caucasian", "gender": "F", "age": 34,
                 "location": "Chicago/IL", "bbtype": "I", "wfreq": 2.0}
            ],
            "samples": [
                {"id": "940", "otu_ids": [1, 2, 3],
                 "sample_values": [90.0, 50.0, 10.0], "otu_labels": ["a", "b", "c"]},
                {"id": "941", "otu_ids": [4], "sample_values": [5.0], "otu_labels": ["d"]}
            ]
        }))
        .unwrap()
    }

    fn rendered_dashboard() -> Dashboard<JsonPanelHost> {
        let mut dashboard = Dashboard::new(dataset(), JsonPanelHost::new());
        let initial = dashboard.default_subject().unwrap();
        dashboard.render_initial(initial).unwrap();
        dashboard
    }

    #[test]
    fn test_initial_render_builds_all_panels() {
        let dashboard = rendered_dashboard();

        assert_eq!(dashboard.current(), Some(SubjectId::new(940)));
        let host = dashboard.host();
        assert_eq!(host.panel_count(), 3);

        // Ranked series for 940: three entries reversed to ascending order.
        let bar = &host.figure(PanelTarget::Ranked).unwrap().data[0];
        assert_eq!(bar["x"], json!([10.0, 50.0, 90.0]));
        assert_eq!(bar["y"], json!(["OTU 3", "OTU 2", "OTU 1"]));

        let gauge = &host.figure(PanelTarget::Gauge).unwrap().data[0];
        assert_eq!(gauge["value"], json!(8.0));

        assert_eq!(host.metadata().len(), 7);
        assert_eq!(host.metadata()[0], ("id".to_string(), "940".to_string()));
    }

    #[test]
    fn test_double_initial_render_is_rejected() {
        let mut dashboard = rendered_dashboard();
        let result = dashboard.render_initial(SubjectId::new(941));
        assert!(matches!(result, Err(DashboardError::AlreadyRendered)));
    }

    #[test]
    fn test_update_before_initial_render_is_rejected() {
        let mut dashboard = Dashboard::new(dataset(), JsonPanelHost::new());
        let result = dashboard.update(SubjectId::new(940));
        assert!(matches!(result, Err(DashboardError::NotRendered)));
    }

    #[test]
    fn test_selection_change_patches_panels_in_place() {
        let mut dashboard = rendered_dashboard();
        dashboard.update(SubjectId::new(941)).unwrap();

        assert_eq!(dashboard.current(), Some(SubjectId::new(941)));
        let host = dashboard.host();

        // Same three panels, restyled once each rather than recreated.
        assert_eq!(host.panel_count(), 3);
        for target in PanelTarget::ALL {
            assert_eq!(host.restyle_count(target), 1);
        }

        let bar = &host.figure(PanelTarget::Ranked).unwrap().data[0];
        assert_eq!(bar["x"], json!([5.0]));
        assert_eq!(bar["y"], json!(["OTU 4"]));

        let gauge = &host.figure(PanelTarget::Gauge).unwrap().data[0];
        assert_eq!(gauge["value"], json!(2.0));

        assert_eq!(host.metadata()[0], ("id".to_string(), "941".to_string()));
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut dashboard = rendered_dashboard();
        dashboard.update(SubjectId::new(941)).unwrap();
        let first: Vec<_> = PanelTarget::ALL
            .iter()
            .map(|&t| dashboard.host().figure(t).unwrap().clone())
            .collect();

        dashboard.update(SubjectId::new(941)).unwrap();
        let second: Vec<_> = PanelTarget::ALL
            .iter()
            .map(|&t| dashboard.host().figure(t).unwrap().clone())
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_failed_selection_keeps_prior_state() {
        let mut dashboard = rendered_dashboard();

        let missing = SubjectId::new(999);
        let result = dashboard.update(missing);
        assert!(matches!(
            result,
            Err(DashboardError::Selection(SelectionError::NotFound(id))) if id == missing
        ));

        // Still showing 940: no panel touched, selection unchanged.
        assert_eq!(dashboard.current(), Some(SubjectId::new(940)));
        let host = dashboard.host();
        for target in PanelTarget::ALL {
            assert_eq!(host.restyle_count(target), 0);
        }
        let gauge = &host.figure(PanelTarget::Gauge).unwrap().data[0];
        assert_eq!(gauge["value"], json!(8.0));
        assert_eq!(host.metadata()[0], ("id".to_string(), "940".to_string()));
    }

    #[test]
    fn test_missing_wash_frequency_blocks_update() {
        let mut data = dataset();
        data.metadata[1].wfreq = None;
        let mut dashboard = Dashboard::new(data, JsonPanelHost::new());
        dashboard.render_initial(SubjectId::new(940)).unwrap();

        let result = dashboard.update(SubjectId::new(941));
        assert!(matches!(
            result,
            Err(DashboardError::View(ViewError::MissingWashFrequency(_)))
        ));
        assert_eq!(dashboard.current(), Some(SubjectId::new(940)));
    }
}
