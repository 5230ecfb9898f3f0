use nalgebra::Point3;

use crate::{config::PanelField, rig::CurveRig};

/// Three numeric fields and an "Add Point" action.
#[derive(Clone, Debug, PartialEq)]
pub struct AddPointPanel {
    field: PanelField,
    x: f64,
    y: f64,
    z: f64,
}

impl AddPointPanel {
    /// Create a panel with every field at the value nearest to zero.
    ///
    /// # Failures
    /// - If `field` has an inverted or non-finite range or an unusable step
    pub fn try_new(field: PanelField) -> anyhow::Result<Self> {
        field.validate()?;
        Ok(Self {
            field,
            x: field.apply(0.),
            y: field.apply(0.),
            z: field.apply(0.),
        })
    }

    pub fn field(&self) -> &PanelField {
        &self.field
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn set_x(&mut self, value: f64) {
        self.x = self.field.apply(value);
    }

    pub fn set_y(&mut self, value: f64) {
        self.y = self.field.apply(value);
    }

    pub fn set_z(&mut self, value: f64) {
        self.z = self.field.apply(value);
    }

    pub fn position(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    /// Append a handle at the panel position.
    /// Returns the index of the new handle.
    pub fn commit(&self, rig: &mut CurveRig) -> anyhow::Result<usize> {
        rig.append_point(self.position())
    }
}
