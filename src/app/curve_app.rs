use log::{debug, info};
use nalgebra::{Point2, Vector2};

#[cfg(feature = "flow")]
use crate::rig::CurveFlow;
use crate::{
    camera::{ndc_from_client, PerspectiveCamera},
    config::RigConfig,
    misc::Ray,
    rig::{
        intersect_handles, AddPointPanel, CurveRig, Picker, TransformGizmo, Traveler,
        TravelerPose,
    },
};

/// What a frame produced for the host to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameOutput {
    /// Handle newly attached to the gizmo by a pick this frame
    pub picked: Option<usize>,
    pub traveler: TravelerPose,
}

/// All state of the interactive spline rig, driven by one frame loop.
///
/// Input handlers mutate it synchronously between frames;
/// [`CurveApp::tick`] runs once per displayed frame.
#[derive(Clone, Debug)]
pub struct CurveApp {
    config: RigConfig,
    rig: CurveRig,
    camera: PerspectiveCamera,
    picker: Picker,
    gizmo: TransformGizmo,
    traveler: Traveler,
    panel: AddPointPanel,
    #[cfg(feature = "flow")]
    flow: Option<CurveFlow>,
}

impl CurveApp {
    pub fn try_new(config: RigConfig) -> anyhow::Result<Self> {
        let rig = CurveRig::try_new(&config)?;
        let panel = AddPointPanel::try_new(config.panel)?;
        info!("spline rig ready with {} control points", rig.len());
        Ok(Self {
            rig,
            camera: PerspectiveCamera::default(),
            picker: Picker::default(),
            gizmo: TransformGizmo::default(),
            traveler: Traveler::new(config.traveler_step),
            panel,
            #[cfg(feature = "flow")]
            flow: None,
            config,
        })
    }

    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    pub fn rig(&self) -> &CurveRig {
        &self.rig
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut PerspectiveCamera {
        &mut self.camera
    }

    pub fn picker(&self) -> &Picker {
        &self.picker
    }

    pub fn gizmo(&self) -> &TransformGizmo {
        &self.gizmo
    }

    pub fn traveler(&self) -> &Traveler {
        &self.traveler
    }

    pub fn traveler_mut(&mut self) -> &mut Traveler {
        &mut self.traveler
    }

    pub fn panel(&self) -> &AddPointPanel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut AddPointPanel {
        &mut self.panel
    }

    /// Attach a flow mesh given by its rest positions to the current curve.
    #[cfg(feature = "flow")]
    pub fn set_flow(&mut self, rest: Vec<nalgebra::Point3<f64>>) {
        self.flow = Some(CurveFlow::new(rest, self.rig.curve()));
    }

    #[cfg(feature = "flow")]
    pub fn flow(&self) -> Option<&CurveFlow> {
        self.flow.as_ref()
    }

    /// The viewport changed size: only the camera projection follows.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.camera.set_viewport(Vector2::new(width, height));
    }

    /// Pointer pressed at `client` pixels inside a viewport of `viewport` pixels.
    pub fn pointer_down(&mut self, client: &Point2<f64>, viewport: &Vector2<f64>) {
        self.picker.pointer_down(client, viewport);
    }

    /// Picking ray through the pointer at `client` pixels.
    pub fn pointer_ray(&self, client: &Point2<f64>, viewport: &Vector2<f64>) -> Ray<f64> {
        self.camera.ray_from_ndc(&ndc_from_client(client, viewport))
    }

    /// Start dragging the attached handle if `ray` grabs it.
    pub fn begin_drag(&mut self, ray: &Ray<f64>) -> bool {
        let Some(handle) = self.gizmo.attached().and_then(|i| self.rig.handle(i)) else {
            return false;
        };
        if ray.intersect_bounding_box(&handle.bounding_box()).is_none() {
            return false;
        }
        let position = *handle.position();
        let normal = self.camera.forward();
        self.gizmo.begin_drag(ray, &position, &normal)
    }

    /// Move the dragged handle under the pointer `ray`.
    /// The curve is only rebuilt when the drag ends.
    pub fn drag(&mut self, ray: &Ray<f64>) -> anyhow::Result<Option<usize>> {
        let (Some(index), Some(position)) = (self.gizmo.attached(), self.gizmo.drag(ray)) else {
            return Ok(None);
        };
        self.rig.set_handle_position(index, position)?;
        Ok(Some(index))
    }

    /// Close the drag session and bring the curve up to date.
    /// Returns `true` if a drag had been in progress.
    pub fn end_drag(&mut self) -> anyhow::Result<bool> {
        if !self.gizmo.end_drag() {
            return Ok(false);
        }
        self.refresh()?;
        Ok(true)
    }

    /// Append a handle at the panel position.
    pub fn commit_panel(&mut self) -> anyhow::Result<usize> {
        let index = self.panel.commit(&mut self.rig)?;
        self.update_flow();
        Ok(index)
    }

    fn refresh(&mut self) -> anyhow::Result<()> {
        self.rig.refresh()?;
        self.update_flow();
        Ok(())
    }

    fn update_flow(&mut self) {
        #[cfg(feature = "flow")]
        if let Some(flow) = self.flow.as_mut() {
            flow.update_curve(self.rig.curve());
        }
    }

    /// Resolve a pending pick against the handles only.
    /// A press that grabbed the attached handle keeps it attached.
    fn resolve_pick(&mut self) -> Option<usize> {
        let ndc = self.picker.take()?;
        if self.gizmo.is_dragging() {
            debug!("pick ignored while dragging handle {:?}", self.gizmo.attached());
            return None;
        }
        let ray = self.camera.ray_from_ndc(&ndc);
        let nearest = intersect_handles(&ray, self.rig.handles()).into_iter().next()?;
        self.gizmo.attach(nearest.index);
        debug!("picked handle {} at {:?}", nearest.index, nearest.point);
        Some(nearest.index)
    }

    /// Advance one frame: pick, flow, traveler.
    pub fn tick(&mut self) -> FrameOutput {
        let picked = self.resolve_pick();

        #[cfg(feature = "flow")]
        if let Some(flow) = self.flow.as_mut() {
            flow.move_along_curve(self.config.flow_step);
        }

        self.traveler.advance();
        let traveler = self.traveler.pose(self.rig.curve());

        FrameOutput { picked, traveler }
    }
}
