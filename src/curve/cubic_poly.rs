use crate::misc::FloatingPoint;

/// A cubic polynomial `c0 + c1 t + c2 t^2 + c3 t^3` describing one coordinate
/// of a spline segment between `x0` (t = 0) and `x1` (t = 1).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicPoly<T: FloatingPoint> {
    c0: T,
    c1: T,
    c2: T,
    c3: T,
}

impl<T: FloatingPoint> CubicPoly<T> {
    /// Hermite form from end values and end derivatives.
    pub fn hermite(x0: T, x1: T, t0: T, t1: T) -> Self {
        let two = T::from_f64_lossy(2.);
        let three = T::from_f64_lossy(3.);
        Self {
            c0: x0,
            c1: t0,
            c2: -three * x0 + three * x1 - two * t0 - t1,
            c3: two * x0 - two * x1 + t0 + t1,
        }
    }

    /// Uniform Catmull-Rom segment between `x1` and `x2`.
    pub fn catmull_rom(x0: T, x1: T, x2: T, x3: T, tension: T) -> Self {
        Self::hermite(x1, x2, tension * (x2 - x0), tension * (x3 - x1))
    }

    /// Non-uniform Catmull-Rom segment between `x1` and `x2`,
    /// where `dt0`, `dt1`, `dt2` are the knot intervals of the three spans.
    pub fn nonuniform_catmull_rom(x0: T, x1: T, x2: T, x3: T, dt0: T, dt1: T, dt2: T) -> Self {
        let t1 = (x1 - x0) / dt0 - (x2 - x0) / (dt0 + dt1) + (x2 - x1) / dt1;
        let t2 = (x2 - x1) / dt1 - (x3 - x1) / (dt1 + dt2) + (x3 - x2) / dt2;
        // rescale tangents for parametrization in [0,1]
        Self::hermite(x1, x2, t1 * dt1, t2 * dt1)
    }

    pub fn calc(&self, t: T) -> T {
        let t2 = t * t;
        let t3 = t2 * t;
        self.c0 + self.c1 * t + self.c2 * t2 + self.c3 * t3
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn segment_interpolates_inner_points() {
        let p = CubicPoly::catmull_rom(0., 1., 3., 4., 0.5);
        assert_relative_eq!(p.calc(0.), 1.);
        assert_relative_eq!(p.calc(1.), 3.);

        let q = CubicPoly::nonuniform_catmull_rom(0., 1., 3., 4., 1., 1.4, 1.);
        assert_relative_eq!(q.calc(0.), 1.);
        assert_relative_eq!(q.calc(1.), 3.);
    }

    #[test]
    fn evenly_spaced_values_stay_linear() {
        let p = CubicPoly::catmull_rom(0., 1., 2., 3., 0.5);
        assert_relative_eq!(p.calc(0.25), 1.25);
        assert_relative_eq!(p.calc(0.5), 1.5);
    }
}
