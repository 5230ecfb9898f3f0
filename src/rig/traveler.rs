use nalgebra::{Point3, UnitQuaternion, Vector3};

use crate::curve::CatmullRomCurve3;

/// Position and orientation of the traveler for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct TravelerPose {
    pub position: Point3<f64>,
    /// Rotation taking the local +Z axis onto the curve tangent
    pub rotation: UnitQuaternion<f64>,
}

/// An object looping along the curve at a fixed parameter step per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Traveler {
    t: f64,
    step: f64,
}

impl Traveler {
    pub fn new(step: f64) -> Self {
        Self { t: 0., step }
    }

    /// Normalized arc length of the traveler in [0, 1].
    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn set_t(&mut self, t: f64) {
        self.t = t;
    }

    /// Advance by one step, restarting at 0 once past the end of the curve.
    ///
    /// # Examples
    /// ```
    /// use spline_handles::prelude::Traveler;
    ///
    /// let mut traveler = Traveler::new(0.005);
    /// traveler.set_t(0.998);
    /// assert_eq!(traveler.advance(), 0.);
    /// ```
    pub fn advance(&mut self) -> f64 {
        self.t += self.step;
        if self.t > 1. {
            self.t = 0.;
        }
        self.t
    }

    /// Place the traveler on `curve`, facing along the tangent.
    pub fn pose(&self, curve: &CatmullRomCurve3<f64>) -> TravelerPose {
        let position = curve.point_at(self.t);
        let tangent = curve.tangent_at(self.t);
        TravelerPose {
            position,
            rotation: face_towards(&tangent),
        }
    }
}

/// Rotation taking +Z onto `direction` with +Y kept as up where possible.
fn face_towards(direction: &Vector3<f64>) -> UnitQuaternion<f64> {
    if direction.norm_squared() <= f64::EPSILON {
        return UnitQuaternion::identity();
    }
    let up = if direction.cross(&Vector3::y()).norm_squared() <= f64::EPSILON {
        Vector3::z()
    } else {
        Vector3::y()
    };
    UnitQuaternion::face_towards(direction, &up)
}
