/// Range and granularity of a numeric panel field.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PanelField {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for PanelField {
    fn default() -> Self {
        Self {
            min: -10.,
            max: 10.,
            step: 0.001,
        }
    }
}

impl PanelField {
    /// Clamp `value` into the range and snap it onto the multiples of `step`.
    ///
    /// # Examples
    /// ```
    /// use spline_handles::prelude::PanelField;
    ///
    /// let field = PanelField { min: -10., max: 10., step: 0.5 };
    /// assert_eq!(field.apply(12.), 10.);
    /// assert_eq!(field.apply(-11.), -10.);
    /// assert_eq!(field.apply(1.2), 1.0);
    /// assert_eq!(field.apply(1.3), 1.5);
    ///
    /// let fine = PanelField::default();
    /// assert_eq!(fine.apply(0.), 0.);
    /// assert_eq!(fine.apply(0.12345), 0.123);
    /// ```
    pub fn apply(&self, value: f64) -> f64 {
        // NaN falls back to `min`, an inverted range collapses onto `max`
        let clamp = |v: f64| v.max(self.min).min(self.max);
        let clamped = clamp(value);
        if !(self.step.is_finite() && self.step > 0.) {
            return clamped;
        }
        // dividing by the reciprocal keeps decimal steps like 0.001 exact
        let snapped = (clamped / self.step).round() / self.step.recip();
        clamp(snapped)
    }

    /// Check that the range is finite and ordered and the step is usable.
    /// A zero step disables snapping.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.min.is_finite() && self.max.is_finite(),
            "The panel range must be finite"
        );
        anyhow::ensure!(self.min <= self.max, "The panel range is inverted");
        anyhow::ensure!(
            self.step.is_finite() && self.step >= 0.,
            "The panel step must be a finite non-negative number"
        );
        Ok(())
    }
}
