//! Numeric tolerances for alignment.

use crate::{AlignError, AlignResult};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for vertex-based alignment.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlignParams {
    /// Minimum length of a point-to-point direction before the rotation it
    /// defines is treated as undefined (default: 1e-12).
    pub direction_epsilon: f64,
    /// Minimum length of the projected third-point vectors before the roll
    /// pass is skipped (default: 1e-4).
    pub roll_epsilon: f64,
}

impl Default for AlignParams {
    fn default() -> Self {
        Self {
            direction_epsilon: 1e-12,
            roll_epsilon: 1e-4,
        }
    }
}

impl AlignParams {
    /// Creates new alignment parameters with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the degenerate-direction tolerance.
    #[must_use]
    pub const fn with_direction_epsilon(mut self, epsilon: f64) -> Self {
        self.direction_epsilon = epsilon;
        self
    }

    /// Sets the collinear-roll tolerance.
    #[must_use]
    pub const fn with_roll_epsilon(mut self, epsilon: f64) -> Self {
        self.roll_epsilon = epsilon;
        self
    }

    /// Checks that both tolerances are finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`AlignError::InvalidParameter`] naming the offending field.
    pub fn validate(&self) -> AlignResult<()> {
        for (name, value) in [
            ("direction_epsilon", self.direction_epsilon),
            ("roll_epsilon", self.roll_epsilon),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AlignError::InvalidParameter(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}
