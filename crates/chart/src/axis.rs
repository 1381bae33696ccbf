/// Most x-axis labels drawn before thinning kicks in.
pub const MAX_X_LABELS: usize = 20;

/// Number of gridline intervals on the y axis.
pub const Y_TICKS: usize = 5;

/// Value range mapped onto the plot height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YRange {
    pub min: f64,
    pub max: f64,
}

impl YRange {
    /// Fixed range when given, else `0 ..= max(finite values)`.
    /// A degenerate or inverted range is widened to span at least 1.
    pub fn resolve(fixed: Option<(f64, f64)>, values: &[f64]) -> Self {
        let (min, max) = fixed.unwrap_or_else(|| {
            let peak = values
                .iter()
                .copied()
                .filter(|v| v.is_finite())
                .fold(0.0_f64, f64::max);
            (0.0, peak)
        });

        if !min.is_finite() || !max.is_finite() || max <= min {
            let min = if min.is_finite() { min } else { 0.0 };
            return Self { min, max: min + 1.0 };
        }
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Fraction of the plot height covered by `value`, clamped to `[0, 1]`.
    pub fn fraction(&self, value: f64) -> f64 {
        ((value - self.min) / self.span()).clamp(0.0, 1.0)
    }

    /// Gridline values from `min` to `max` inclusive.
    pub fn ticks(&self) -> impl Iterator<Item = f64> + '_ {
        (0..=Y_TICKS).map(move |i| self.min + self.span() * i as f64 / Y_TICKS as f64)
    }

    pub fn format_tick(&self, value: f64) -> String {
        if self.span() < 10.0 {
            format!("{value:.1}")
        } else {
            format!("{value:.0}")
        }
    }
}

/// Draw every `n`-th x label so at most [`MAX_X_LABELS`] appear.
pub fn label_step(slots: usize) -> usize {
    slots.div_ceil(MAX_X_LABELS).max(1)
}
