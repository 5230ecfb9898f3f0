use log::debug;
use nalgebra::{Point3, Vector3};

use crate::{
    config::RigConfig,
    curve::CatmullRomCurve3,
    rig::ControlHandle,
};

/// Ordered control handles and the closed curve derived from them.
///
/// The curve never observes the handles by itself: after moving a handle
/// call [`CurveRig::refresh`] (or [`CurveRig::rebuild`] and [`CurveRig::sample`])
/// so sampling reflects the current positions.
#[derive(Clone, Debug)]
pub struct CurveRig {
    handles: Vec<ControlHandle>,
    curve: CatmullRomCurve3<f64>,
    preview: Vec<Point3<f64>>,
    marker_size: f64,
    edit_resolution: usize,
    revision: u64,
}

impl CurveRig {
    /// Create the rig from the initial points of `config`
    /// and sample the preview at the startup resolution.
    pub fn try_new(config: &RigConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let positions = config.initial_positions();
        let handles = positions
            .iter()
            .map(|p| ControlHandle::new(*p, config.marker_size))
            .collect();
        let curve = CatmullRomCurve3::try_new(positions, true, config.curve_type)?;
        let preview = curve.points(config.initial_resolution);
        debug!(
            "curve rig created with {} handles, {} preview points",
            config.initial_points.len(),
            preview.len()
        );
        Ok(Self {
            handles,
            curve,
            preview,
            marker_size: config.marker_size,
            edit_resolution: config.edit_resolution,
            revision: 0,
        })
    }

    pub fn handles(&self) -> &[ControlHandle] {
        &self.handles
    }

    pub fn handle(&self, index: usize) -> Option<&ControlHandle> {
        self.handles.get(index)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn curve(&self) -> &CatmullRomCurve3<f64> {
        &self.curve
    }

    /// Latest preview polyline.
    pub fn preview(&self) -> &[Point3<f64>] {
        &self.preview
    }

    /// Incremented every time the preview polyline is regenerated.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Move a handle in place. The curve is not rebuilt.
    pub fn set_handle_position(
        &mut self,
        index: usize,
        position: Point3<f64>,
    ) -> anyhow::Result<()> {
        let handle = self
            .handles
            .get_mut(index)
            .ok_or_else(|| anyhow::anyhow!("No handle at index {}", index))?;
        handle.set_position(position);
        Ok(())
    }

    /// Re-read every handle position into the curve in index order.
    pub fn rebuild(&mut self) -> anyhow::Result<()> {
        let positions = self.handles.iter().map(|h| *h.position()).collect();
        self.curve.try_set_points(positions)
    }

    /// Sample `resolution + 1` points evenly spaced in parameter space.
    pub fn sample(&self, resolution: usize) -> Vec<Point3<f64>> {
        self.curve.points(resolution)
    }

    /// Rebuild the curve and regenerate the preview at the edit resolution.
    pub fn refresh(&mut self) -> anyhow::Result<()> {
        self.rebuild()?;
        self.preview = self.sample(self.edit_resolution);
        self.revision += 1;
        debug!(
            "curve refreshed (revision {}, {} handles)",
            self.revision,
            self.handles.len()
        );
        Ok(())
    }

    /// Append a new handle at `position` and refresh the curve.
    /// Returns the index of the new handle.
    pub fn append_point(&mut self, position: Point3<f64>) -> anyhow::Result<usize> {
        self.handles
            .push(ControlHandle::new(position, self.marker_size));
        self.refresh()?;
        let index = self.handles.len() - 1;
        debug!("appended handle {} at {:?}", index, position);
        Ok(index)
    }

    /// Point at normalized arc length `u`.
    pub fn point_at(&self, u: f64) -> Point3<f64> {
        self.curve.point_at(u)
    }

    /// Unit tangent at normalized arc length `u`.
    pub fn tangent_at(&self, u: f64) -> Vector3<f64> {
        self.curve.tangent_at(u)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn rig() -> CurveRig {
        CurveRig::try_new(&RigConfig::default()).unwrap()
    }

    #[test]
    fn startup_preview_is_dense() {
        let rig = rig();
        assert_eq!(rig.len(), 2);
        assert_eq!(rig.preview().len(), 5001);
        assert_eq!(rig.revision(), 0);
    }

    #[test]
    fn append_refreshes_once() {
        let mut rig = rig();
        let index = rig.append_point(Point3::origin()).unwrap();
        assert_eq!(index, 2);
        assert_eq!(rig.len(), 3);
        assert_eq!(rig.curve().control_points().len(), 3);
        assert_eq!(rig.preview().len(), 51);
        assert_eq!(rig.revision(), 1);
        assert_eq!(rig.preview(), rig.sample(50).as_slice());
    }

    #[test]
    fn moving_a_handle_needs_a_rebuild() {
        let mut rig = rig();
        rig.append_point(Point3::origin()).unwrap();
        let before = rig.preview().to_vec();

        rig.set_handle_position(2, Point3::new(-1., 0.5, 0.)).unwrap();
        // the curve does not observe the handle
        assert_eq!(rig.sample(50), before);

        rig.refresh().unwrap();
        assert_ne!(rig.preview(), before.as_slice());
        assert_eq!(rig.preview(), rig.sample(50).as_slice());
        assert_relative_eq!(
            rig.curve().control_points()[2],
            Point3::new(-1., 0.5, 0.)
        );
    }

    #[test]
    fn unknown_handle_is_an_error() {
        let mut rig = rig();
        assert!(rig.set_handle_position(5, Point3::origin()).is_err());
    }

    #[test]
    fn empty_config_is_rejected() {
        let config = RigConfig {
            initial_points: vec![],
            ..Default::default()
        };
        assert!(CurveRig::try_new(&config).is_err());
    }
}
