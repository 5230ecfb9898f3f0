use log::debug;
use nalgebra::Point3;

use crate::{curve::CatmullRomCurve3, misc::FrenetFrame};

/// Number of frame rows sampled along the curve.
pub const FLOW_SAMPLES: usize = 1024;

/// Bends a rest-pose mesh along a curve.
///
/// A vertex's `x` is read as arc length along the curve, its `y` and `z`
/// as offsets along the normal and binormal of the frame found there.
/// The whole mesh slides along the closed curve as the offset advances.
#[derive(Clone, Debug)]
pub struct CurveFlow {
    rest: Vec<Point3<f64>>,
    frames: Vec<FrenetFrame<f64>>,
    length: f64,
    offset: f64,
}

impl CurveFlow {
    pub fn new(rest: Vec<Point3<f64>>, curve: &CatmullRomCurve3<f64>) -> Self {
        let mut flow = Self {
            rest,
            frames: vec![],
            length: 0.,
            offset: 0.,
        };
        flow.update_curve(curve);
        flow
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Current position of the mesh origin along the curve, as a fraction in [0, 1).
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Re-derive the frame table after the curve changed.
    pub fn update_curve(&mut self, curve: &CatmullRomCurve3<f64>) {
        self.frames = curve.compute_frenet_frames(FLOW_SAMPLES);
        self.length = curve.length();
        debug!("flow frames updated, curve length {:.4}", self.length);
    }

    /// Slide the mesh by `amount`, a fraction of the curve length.
    pub fn move_along_curve(&mut self, amount: f64) {
        self.offset = (self.offset + amount).rem_euclid(1.);
    }

    /// Interpolated frame at normalized arc length `u`, wrapping around the curve.
    pub fn frame_at(&self, u: f64) -> Option<FrenetFrame<f64>> {
        let last = self.frames.len().checked_sub(1)?;
        if last == 0 {
            return self.frames.first().cloned();
        }
        let f = u.rem_euclid(1.) * last as f64;
        let i = (f.floor() as usize).min(last - 1);
        let w = f - i as f64;
        Some(self.frames[i].lerp(&self.frames[i + 1], w))
    }

    /// Rest positions bent onto the curve at the current offset.
    pub fn deformed_positions(&self) -> Vec<Point3<f64>> {
        if self.length <= f64::EPSILON {
            return self.rest.clone();
        }
        self.rest
            .iter()
            .map(|v| match self.frame_at(v.x / self.length + self.offset) {
                Some(frame) => frame.cross_section_point(v.y, v.z),
                None => *v,
            })
            .collect()
    }
}

/// An indexed triangle mesh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RibbonMesh {
    pub positions: Vec<Point3<f64>>,
    pub indices: Vec<u32>,
}

/// Build a box of `length` along +X starting at the origin,
/// subdivided into `segments` slices so it can bend smoothly.
///
/// # Examples
/// ```
/// use spline_handles::prelude::ribbon_mesh;
///
/// let mesh = ribbon_mesh(1., 0.1, 0.05, 10);
/// assert_eq!(mesh.positions.len(), 44);
/// assert_eq!(mesh.indices.len(), (10 * 8 + 4) * 3);
/// ```
pub fn ribbon_mesh(length: f64, height: f64, depth: f64, segments: usize) -> RibbonMesh {
    let segments = segments.max(1);
    let (hy, hz) = (height * 0.5, depth * 0.5);
    // cross section corners, counter clockwise seen from +X
    let corners = [(-hy, -hz), (hy, -hz), (hy, hz), (-hy, hz)];

    let positions: Vec<_> = (0..=segments)
        .flat_map(|i| {
            let x = length * i as f64 / segments as f64;
            corners.iter().map(move |(y, z)| Point3::new(x, *y, *z))
        })
        .collect();

    let vertex = |ring: usize, corner: usize| (ring * 4 + corner % 4) as u32;
    let mut indices = Vec::with_capacity((segments * 8 + 4) * 3);
    for ring in 0..segments {
        for corner in 0..4 {
            let a = vertex(ring, corner);
            let b = vertex(ring, corner + 1);
            let c = vertex(ring + 1, corner + 1);
            let d = vertex(ring + 1, corner);
            indices.extend_from_slice(&[a, b, c, a, c, d]);
        }
    }

    // end caps
    let (s, e) = (0, segments);
    indices.extend_from_slice(&[
        vertex(s, 0),
        vertex(s, 2),
        vertex(s, 1),
        vertex(s, 0),
        vertex(s, 3),
        vertex(s, 2),
        vertex(e, 0),
        vertex(e, 1),
        vertex(e, 2),
        vertex(e, 0),
        vertex(e, 2),
        vertex(e, 3),
    ]);

    RibbonMesh { positions, indices }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::curve::CurveType;

    fn circle_like() -> CatmullRomCurve3<f64> {
        let points = (0..8)
            .map(|i| {
                let a = i as f64 / 8. * std::f64::consts::TAU;
                Point3::new(a.cos(), 0., a.sin())
            })
            .collect();
        CatmullRomCurve3::try_new(points, true, CurveType::Chordal).unwrap()
    }

    #[test]
    fn centerline_follows_curve() {
        let curve = circle_like();
        let rest = vec![Point3::origin(), Point3::new(curve.length() * 0.25, 0., 0.)];
        let flow = CurveFlow::new(rest, &curve);
        let bent = flow.deformed_positions();
        assert_relative_eq!(bent[0], curve.point_at(0.), epsilon = 1e-6);
        assert_relative_eq!(bent[1], curve.point_at(0.25), epsilon = 1e-3);
    }

    #[test]
    fn offsets_stay_on_cross_section() {
        let curve = circle_like();
        let flow = CurveFlow::new(vec![Point3::new(0.3, 0.1, 0.05)], &curve);
        let bent = flow.deformed_positions()[0];
        let frame = flow.frame_at(0.3 / flow.length()).unwrap();
        let offset = bent - frame.position();
        assert_relative_eq!(offset.norm(), (0.1f64.powi(2) + 0.05f64.powi(2)).sqrt(), epsilon = 1e-6);
        assert!(offset.dot(frame.tangent()).abs() < 1e-3);
    }

    #[test]
    fn moving_wraps_offset() {
        let curve = circle_like();
        let mut flow = CurveFlow::new(vec![Point3::origin()], &curve);
        flow.move_along_curve(0.75);
        flow.move_along_curve(0.5);
        assert_relative_eq!(flow.offset(), 0.25);
        let bent = flow.deformed_positions()[0];
        assert_relative_eq!(bent, curve.point_at(0.25), epsilon = 1e-3);
        flow.move_along_curve(-0.5);
        assert_relative_eq!(flow.offset(), 0.75);
    }

    #[test]
    fn update_curve_follows_new_geometry() {
        let curve = circle_like();
        let mut flow = CurveFlow::new(vec![Point3::origin()], &curve);
        let scaled = CatmullRomCurve3::try_new(
            curve.control_points().iter().map(|p| p * 2.).collect(),
            true,
            CurveType::Chordal,
        )
        .unwrap();
        flow.update_curve(&scaled);
        assert_relative_eq!(flow.length(), curve.length() * 2., epsilon = 1e-9);
        assert_relative_eq!(flow.deformed_positions()[0], Point3::new(2., 0., 0.), epsilon = 1e-6);
    }

    #[test]
    fn ribbon_faces_point_outwards() {
        let mesh = ribbon_mesh(2., 0.2, 0.2, 4);
        let centroid = mesh
            .positions
            .iter()
            .fold(nalgebra::Vector3::zeros(), |acc, p| acc + p.coords)
            / mesh.positions.len() as f64;
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|k| mesh.positions[tri[k] as usize]);
            let normal = (b - a).cross(&(c - a));
            let center = (a.coords + b.coords + c.coords) / 3.;
            assert!(normal.dot(&(center - centroid)) > 0.);
        }
    }
}
