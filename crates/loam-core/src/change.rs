//! The change specification: one recorded region edit.
//!
//! A [`ChangeSpec`] captures everything needed to reapply an edit to a
//! different dataset: the region, the target category, and the
//! percentage of cells to reassign. It deliberately does *not* capture
//! the random draw; replaying a spec produces a statistically
//! independent perturbation pattern.

use std::fmt;

use crate::error::ChangeError;
use crate::legend::Legend;
use crate::region::Region;

/// A region/category/percentage edit, immutable once recorded.
///
/// The textual form used on replay command lines is six comma-separated
/// numeric fields: `x_min,y_min,x_max,y_max,category,percent`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChangeSpec {
    /// The rectangle to perturb.
    pub region: Region,
    /// The target category code.
    pub category: i32,
    /// Percentage of addressable cells to reassign, in `[0, 100]`.
    pub percent: f64,
}

impl ChangeSpec {
    /// Create a change spec.
    pub fn new(region: Region, category: i32, percent: f64) -> Self {
        Self {
            region,
            category,
            percent,
        }
    }

    /// Decode the replay form `x_min,y_min,x_max,y_max,category,percent`.
    ///
    /// Parsing accepts any numeric values; range and legend checks are
    /// the job of [`validate`](Self::validate).
    ///
    /// # Errors
    ///
    /// Returns [`ChangeError::Malformed`] when the field count is not six
    /// or a field fails to parse.
    pub fn parse(input: &str) -> Result<Self, ChangeError> {
        let fields: Vec<&str> = input.split(',').map(str::trim).collect();
        if fields.len() != 6 {
            return Err(ChangeError::Malformed {
                input: input.to_string(),
                detail: format!("expected 6 comma-separated fields, got {}", fields.len()),
            });
        }
        let int = |s: &str, what: &str| {
            s.parse::<i32>().map_err(|_| ChangeError::Malformed {
                input: input.to_string(),
                detail: format!("{what} '{s}' is not an integer"),
            })
        };
        let region = Region::new(
            int(fields[0], "x_min")?,
            int(fields[1], "y_min")?,
            int(fields[2], "x_max")?,
            int(fields[3], "y_max")?,
        );
        let category = int(fields[4], "category")?;
        let percent = fields[5]
            .parse::<f64>()
            .map_err(|_| ChangeError::Malformed {
                input: input.to_string(),
                detail: format!("percent '{}' is not a number", fields[5]),
            })?;
        Ok(Self {
            region,
            category,
            percent,
        })
    }

    /// Check the spec against a dataset's legend.
    ///
    /// # Errors
    ///
    /// Returns [`ChangeError::PercentOutOfRange`] when the percentage is
    /// not a finite value in `[0, 100]`, or
    /// [`ChangeError::UnknownCategory`] when the target category is not a
    /// legend key. Writes of out-of-legend categories are rejected here,
    /// before any cell is touched.
    pub fn validate(&self, legend: &Legend) -> Result<(), ChangeError> {
        if !self.percent.is_finite() || !(0.0..=100.0).contains(&self.percent) {
            return Err(ChangeError::PercentOutOfRange {
                percent: self.percent,
            });
        }
        if !legend.contains(self.category) {
            return Err(ChangeError::UnknownCategory {
                category: self.category,
            });
        }
        Ok(())
    }
}

impl fmt::Display for ChangeSpec {
    /// Renders the replay form. `f64` display keeps the percent free of
    /// unnecessary trailing zeros (`50.0` renders as `50`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{}",
            self.region.x_min,
            self.region.y_min,
            self.region.x_max,
            self.region.y_max,
            self.category,
            self.percent
        )
    }
}
