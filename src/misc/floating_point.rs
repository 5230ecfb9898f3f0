use nalgebra::RealField;
use num_traits::ToPrimitive;

/// Trait for floating point types (f32, f64)
/// Mainly used to identify the type of the field in nalgebra
pub trait FloatingPoint: RealField + ToPrimitive + Copy {
    /// Converts an `f64` constant into the field type.
    fn from_f64_lossy(value: f64) -> Self {
        nalgebra::convert(value)
    }

    /// Converts a count or index into the field type.
    fn from_usize_lossy(value: usize) -> Self {
        nalgebra::convert(value as f64)
    }
}

impl FloatingPoint for f32 {}
impl FloatingPoint for f64 {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lossy_conversions() {
        assert_eq!(f32::from_f64_lossy(0.5), 0.5_f32);
        assert_eq!(f64::from_usize_lossy(200), 200.);
        assert!(f32::from_f64_lossy(f64::INFINITY).is_infinite());
    }
}
