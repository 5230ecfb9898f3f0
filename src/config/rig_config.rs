use nalgebra::Point3;

use crate::{config::PanelField, curve::CurveType};

/// Tunables of the spline rig and its animation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RigConfig {
    /// Control points the rig starts with
    pub initial_points: Vec<[f64; 3]>,
    pub curve_type: CurveType<f64>,
    /// Preview resolution right after startup
    pub initial_resolution: usize,
    /// Preview resolution after every edit
    pub edit_resolution: usize,
    /// Edge length of a handle marker
    pub marker_size: f64,
    /// Edge length of the traveler cube
    pub traveler_size: f64,
    /// Parameter advance of the traveler per frame
    pub traveler_step: f64,
    /// Fraction of the curve the flow mesh advances per frame
    pub flow_step: f64,
    pub panel: PanelField,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            initial_points: vec![[1., 0., -1.], [1., 0., 1.]],
            curve_type: CurveType::Chordal,
            initial_resolution: 5000,
            edit_resolution: 50,
            marker_size: 0.05,
            traveler_size: 0.2,
            traveler_step: 0.005,
            flow_step: 0.001,
            panel: PanelField::default(),
        }
    }
}

impl RigConfig {
    pub fn initial_positions(&self) -> Vec<Point3<f64>> {
        self.initial_points
            .iter()
            .map(|p| Point3::from(*p))
            .collect()
    }

    /// Check the values the rig cannot work with.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.initial_points.is_empty(),
            "At least one initial control point is required"
        );
        anyhow::ensure!(
            self.edit_resolution > 0 && self.initial_resolution > 0,
            "Preview resolutions must be greater than zero"
        );
        anyhow::ensure!(
            self.marker_size > 0.,
            "The marker size must be greater than zero"
        );
        self.panel.validate()
    }
}
