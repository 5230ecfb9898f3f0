use itertools::Itertools;
use nalgebra::Point3;

use crate::misc::FloatingPoint;

/// Cumulative chord lengths of a curve sampled at evenly spaced parameters.
///
/// The table maps normalized arc length `u` to the raw curve parameter `t`
/// so curves can be traversed at constant speed.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcLengthTable<T: FloatingPoint> {
    lengths: Vec<T>,
}

impl<T: FloatingPoint> Default for ArcLengthTable<T> {
    fn default() -> Self {
        Self { lengths: vec![] }
    }
}

impl<T: FloatingPoint> ArcLengthTable<T> {
    /// Build the table from `divisions + 1` samples taken at `i / divisions`.
    pub fn from_samples(samples: &[Point3<T>]) -> Self {
        let mut lengths = Vec::with_capacity(samples.len());
        if !samples.is_empty() {
            lengths.push(T::zero());
        }
        let mut sum = T::zero();
        for (a, b) in samples.iter().tuple_windows() {
            sum += (b - a).norm();
            lengths.push(sum);
        }
        Self { lengths }
    }

    /// Total length of the sampled polyline.
    pub fn total(&self) -> T {
        self.lengths.last().copied().unwrap_or_else(T::zero)
    }

    /// Maps normalized arc length `u` in [0, 1] to the raw parameter `t` in [0, 1].
    ///
    /// # Examples
    /// ```
    /// use nalgebra::Point3;
    /// use spline_handles::prelude::ArcLengthTable;
    ///
    /// // The first division is three times longer than the second.
    /// let table = ArcLengthTable::from_samples(&[
    ///     Point3::new(0., 0., 0.),
    ///     Point3::new(3., 0., 0.),
    ///     Point3::new(4., 0., 0.),
    /// ]);
    /// assert_eq!(table.total(), 4.);
    /// assert_eq!(table.u_to_t(0.75), 0.5);
    /// assert_eq!(table.u_to_t(0.375), 0.25);
    /// ```
    pub fn u_to_t(&self, u: T) -> T {
        let n = self.lengths.len();
        if n < 2 {
            return T::zero();
        }
        let last = T::from_usize_lossy(n - 1);
        let target = u * self.total();

        // index of the first entry not shorter than the target
        let i = self.lengths.partition_point(|l| *l < target);
        if i >= n {
            return T::one();
        }
        if self.lengths[i] == target {
            return T::from_usize_lossy(i) / last;
        }

        let i = i.saturating_sub(1);
        let before = self.lengths[i];
        let after = self.lengths[i + 1];
        let segment = after - before;
        if segment <= T::default_epsilon() {
            return T::from_usize_lossy(i) / last;
        }
        let fraction = (target - before) / segment;
        (T::from_usize_lossy(i) + fraction) / last
    }
}
