use crate::misc::FloatingPoint;

/// Parameterization of a Catmull-Rom spline.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveType<T> {
    /// Knot intervals grow with the square root of chord length.
    #[default]
    Centripetal,
    /// Knot intervals grow with chord length.
    Chordal,
    /// Uniform knot intervals with the given tension.
    CatmullRom { tension: T },
}

impl<T: FloatingPoint> CurveType<T> {
    /// Exponent applied to the squared chord length to get a knot interval.
    /// `None` for uniform parameterization.
    pub fn exponent(&self) -> Option<T> {
        match self {
            CurveType::Centripetal => Some(T::from_f64_lossy(0.25)),
            CurveType::Chordal => Some(T::from_f64_lossy(0.5)),
            CurveType::CatmullRom { .. } => None,
        }
    }

    /// Uniform Catmull-Rom with the conventional tension of 0.5.
    pub fn uniform() -> Self {
        CurveType::CatmullRom {
            tension: T::from_f64_lossy(0.5),
        }
    }
}
