use nalgebra::{Point3, Rotation3, Unit, Vector3};

use crate::{
    curve::{ArcLengthTable, CubicPoly, CurveType},
    misc::{FloatingPoint, FrenetFrame},
};

/// Default number of divisions used to build the arc-length table.
pub const ARC_LENGTH_DIVISIONS: usize = 200;

/// Catmull-Rom spline through an ordered list of 3D points.
///
/// The curve passes through every control point. A closed curve wraps from the
/// last point back to the first; an open curve extrapolates its end tangents.
/// Queries named `*_at` take normalized arc length, plain queries take the raw
/// parameter.
#[derive(Clone, Debug)]
pub struct CatmullRomCurve3<T: FloatingPoint> {
    points: Vec<Point3<T>>,
    closed: bool,
    curve_type: CurveType<T>,
    arc_lengths: ArcLengthTable<T>,
}

impl<T: FloatingPoint> CatmullRomCurve3<T> {
    /// Create a curve through `points`.
    ///
    /// # Failures
    /// - If `points` is empty
    ///
    /// # Examples
    /// ```
    /// use nalgebra::Point3;
    /// use spline_handles::prelude::*;
    ///
    /// let curve = CatmullRomCurve3::try_new(
    ///     vec![
    ///         Point3::new(1., 0., -1.),
    ///         Point3::new(1., 0., 1.),
    ///         Point3::new(0., 0., 0.),
    ///     ],
    ///     true,
    ///     CurveType::Chordal,
    /// )
    /// .unwrap();
    /// let samples = curve.points(50);
    /// assert_eq!(samples.len(), 51);
    /// assert_eq!(samples.first(), samples.last());
    /// ```
    pub fn try_new(
        points: Vec<Point3<T>>,
        closed: bool,
        curve_type: CurveType<T>,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(!points.is_empty(), "Too few control points for curve");
        let mut curve = Self {
            points,
            closed,
            curve_type,
            arc_lengths: ArcLengthTable::default(),
        };
        curve.update_arc_lengths();
        Ok(curve)
    }

    pub fn control_points(&self) -> &[Point3<T>] {
        &self.points
    }

    pub fn curve_type(&self) -> &CurveType<T> {
        &self.curve_type
    }

    /// Replace every control point and re-derive the arc-length table.
    ///
    /// # Failures
    /// - If `points` is empty, in which case the curve is left untouched
    pub fn try_set_points(&mut self, points: Vec<Point3<T>>) -> anyhow::Result<()> {
        anyhow::ensure!(!points.is_empty(), "Too few control points for curve");
        self.points = points;
        self.update_arc_lengths();
        Ok(())
    }

    fn update_arc_lengths(&mut self) {
        let samples = self.points(ARC_LENGTH_DIVISIONS);
        self.arc_lengths = ArcLengthTable::from_samples(&samples);
    }

    /// Evaluate the curve at the raw parameter `t` in [0, 1].
    pub fn point(&self, t: T) -> Point3<T> {
        let points = &self.points;
        let l = points.len();
        if l == 1 {
            return points[0];
        }

        let span = if self.closed { l } else { l - 1 };
        let p = T::from_usize_lossy(span) * t;
        let floor = p.floor();
        let mut weight = p - floor;
        let mut index = floor.to_isize().unwrap_or(0);

        if self.closed {
            index = index.rem_euclid(l as isize);
        } else {
            let last_segment = (l - 2) as isize;
            if index > last_segment {
                weight = p - T::from_usize_lossy(l - 2);
                index = last_segment;
            } else if index < 0 {
                weight = p;
                index = 0;
            }
        }

        let at = |i: isize| points[i.rem_euclid(l as isize) as usize];
        let p0 = if self.closed || index > 0 {
            at(index - 1)
        } else {
            // extrapolate the first point
            points[0] + (points[0] - points[1])
        };
        let p1 = at(index);
        let p2 = at(index + 1);
        let p3 = if self.closed || index + 2 < l as isize {
            at(index + 2)
        } else {
            // extrapolate the last point
            points[l - 1] + (points[l - 1] - points[l - 2])
        };

        let polys: [CubicPoly<T>; 3] = match self.curve_type.exponent() {
            Some(exponent) => {
                let interval = |a: &Point3<T>, b: &Point3<T>| (b - a).norm_squared().powf(exponent);
                let threshold = T::from_f64_lossy(1e-4);
                let mut dt1 = interval(&p1, &p2);
                let mut dt0 = interval(&p0, &p1);
                let mut dt2 = interval(&p2, &p3);

                // safety check for repeated points
                if dt1 < threshold {
                    dt1 = T::one();
                }
                if dt0 < threshold {
                    dt0 = dt1;
                }
                if dt2 < threshold {
                    dt2 = dt1;
                }
                std::array::from_fn(|i| {
                    CubicPoly::nonuniform_catmull_rom(p0[i], p1[i], p2[i], p3[i], dt0, dt1, dt2)
                })
            }
            None => {
                let tension = match self.curve_type {
                    CurveType::CatmullRom { tension } => tension,
                    _ => T::from_f64_lossy(0.5),
                };
                std::array::from_fn(|i| CubicPoly::catmull_rom(p0[i], p1[i], p2[i], p3[i], tension))
            }
        };

        Point3::new(
            polys[0].calc(weight),
            polys[1].calc(weight),
            polys[2].calc(weight),
        )
    }

    /// Unit tangent at the raw parameter `t`, estimated by central differences.
    /// Returns the zero vector where the curve does not move.
    pub fn tangent(&self, t: T) -> Vector3<T> {
        let delta = T::from_f64_lossy(1e-4);
        let t1 = (t - delta).max(T::zero());
        let t2 = (t + delta).min(T::one());
        let d = self.point(t2) - self.point(t1);
        d.try_normalize(T::default_epsilon())
            .unwrap_or_else(Vector3::zeros)
    }

    /// Sample `divisions + 1` points at evenly spaced raw parameters.
    /// On a closed curve the first and the last sample coincide.
    pub fn points(&self, divisions: usize) -> Vec<Point3<T>> {
        if divisions == 0 {
            return vec![self.point(T::zero())];
        }
        let n = T::from_usize_lossy(divisions);
        (0..=divisions)
            .map(|d| self.point(T::from_usize_lossy(d) / n))
            .collect()
    }

    /// Sample `divisions + 1` points evenly spaced by arc length.
    pub fn spaced_points(&self, divisions: usize) -> Vec<Point3<T>> {
        if divisions == 0 {
            return vec![self.point_at(T::zero())];
        }
        let n = T::from_usize_lossy(divisions);
        (0..=divisions)
            .map(|d| self.point_at(T::from_usize_lossy(d) / n))
            .collect()
    }

    pub fn arc_lengths(&self) -> &ArcLengthTable<T> {
        &self.arc_lengths
    }

    /// Approximate total length of the curve.
    pub fn length(&self) -> T {
        self.arc_lengths.total()
    }

    /// Evaluate the curve at normalized arc length `u` in [0, 1].
    pub fn point_at(&self, u: T) -> Point3<T> {
        self.point(self.arc_lengths.u_to_t(u))
    }

    /// Unit tangent at normalized arc length `u` in [0, 1].
    pub fn tangent_at(&self, u: T) -> Vector3<T> {
        self.tangent(self.arc_lengths.u_to_t(u))
    }

    /// Compute `segments + 1` rotation minimizing frames at `u = i / segments`.
    /// On a closed curve the accumulated twist is spread over all frames
    /// so the first and the last frame agree.
    pub fn compute_frenet_frames(&self, segments: usize) -> Vec<FrenetFrame<T>> {
        let segments = segments.max(1);
        let n = T::from_usize_lossy(segments);
        let parameters: Vec<T> = (0..=segments)
            .map(|i| T::from_usize_lossy(i) / n)
            .collect();

        let tangents: Vec<_> = parameters.iter().map(|u| self.tangent_at(*u)).collect();

        let mut normal = Vector3::zeros();
        let tx = tangents[0].x.abs();
        let ty = tangents[0].y.abs();
        let tz = tangents[0].z.abs();

        let mut min = T::from_f64_lossy(f64::INFINITY);
        if tx <= min {
            min = tx;
            normal = Vector3::x();
        }
        if ty <= min {
            min = ty;
            normal = Vector3::y();
        }
        if tz <= min {
            normal = Vector3::z();
        }

        let orthogonal = |a: &Vector3<T>, b: &Vector3<T>| {
            a.cross(b)
                .try_normalize(T::default_epsilon())
                .unwrap_or_else(Vector3::zeros)
        };

        let v = orthogonal(&tangents[0], &normal);
        let mut normals = vec![orthogonal(&tangents[0], &v)];

        for i in 1..parameters.len() {
            let prev_normal = normals[i - 1];
            let axis = tangents[i - 1].cross(&tangents[i]);
            let next = match Unit::try_new(axis, T::default_epsilon()) {
                Some(axis) => {
                    let theta = tangents[i - 1]
                        .dot(&tangents[i])
                        .clamp(-T::one(), T::one())
                        .acos();
                    Rotation3::from_axis_angle(&axis, theta) * prev_normal
                }
                None => prev_normal,
            };
            normals.push(next);
        }

        if self.closed {
            let last = normals.len() - 1;
            let mut theta = normals[0].dot(&normals[last]).clamp(-T::one(), T::one()).acos() / n;
            if tangents[0].dot(&normals[0].cross(&normals[last])) > T::zero() {
                theta = -theta;
            }
            for i in 1..normals.len() {
                if let Some(axis) = Unit::try_new(tangents[i], T::default_epsilon()) {
                    let angle = theta * T::from_usize_lossy(i);
                    normals[i] = Rotation3::from_axis_angle(&axis, angle) * normals[i];
                }
            }
        }

        parameters
            .iter()
            .zip(tangents.iter().zip(normals.iter()))
            .map(|(u, (t, n))| {
                let binormal = orthogonal(t, n);
                FrenetFrame::new(self.point_at(*u), *t, *n, binormal)
            })
            .collect()
    }
}
